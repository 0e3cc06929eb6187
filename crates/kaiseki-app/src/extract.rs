//! Document container to plain text.

use std::fs::{self, File};
use std::io::{Read, Seek};
use std::path::Path;

use kaiseki_core::AnalysisError;
use lazy_static::lazy_static;
use percent_encoding::percent_decode_str;
use quick_xml::Reader;
use quick_xml::escape::unescape_with;
use quick_xml::events::{BytesStart, Event};
use regex::{Captures, Regex};
use zip::ZipArchive;

lazy_static! {
    static ref HIDDEN_BLOCK: Regex =
        Regex::new(r"(?is)<head\b.*?</head\s*>|<script\b.*?</script\s*>|<style\b.*?</style\s*>")
            .unwrap();
    /// Ruby readings; the base text stays
    static ref RUBY_ANNOTATION: Regex =
        Regex::new(r"(?is)<rt\b[^>]*>.*?</rt\s*>|<rp\b[^>]*>.*?</rp\s*>").unwrap();
    static ref LINE_BREAK: Regex = Regex::new(
        r"(?i)<br\s*/?>|</(?:p|div|h[1-6]|li|tr|section|article|blockquote)\s*>"
    )
    .unwrap();
    static ref TAG: Regex = Regex::new(r"(?s)<[^>]*>").unwrap();
    static ref ENTITY: Regex = Regex::new(r"&(?:#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").unwrap();
}

const CONTAINER_PATH: &str = "META-INF/container.xml";
const XHTML_MEDIA_TYPE: &str = "application/xhtml+xml";

/// Extract all text of a supported document as one string
pub fn file_to_string(path: &Path) -> Result<String, AnalysisError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "txt" => Ok(fs::read_to_string(path)?),
        "epub" => epub_to_string(path),
        "html" | "htm" | "xhtml" => Ok(html_to_text(&fs::read_to_string(path)?)),
        "" => Err(AnalysisError::UnsupportedFormat("(none)".to_string())),
        other => Err(AnalysisError::UnsupportedFormat(format!(".{other}"))),
    }
}

/// Text of every XHTML document in the book, in manifest order
pub fn epub_to_string(path: &Path) -> Result<String, AnalysisError> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(file).map_err(extraction_error)?;

    let documents = match manifest_documents(&mut archive)? {
        Some(documents) if !documents.is_empty() => documents,
        _ => {
            tracing::warn!("No usable package manifest in {}, reading archive order", path.display());
            archive
                .file_names()
                .filter(|name| is_html_name(name))
                .map(str::to_string)
                .collect()
        }
    };

    let mut texts = Vec::with_capacity(documents.len());
    for name in &documents {
        let html = read_entry(&mut archive, name).map_err(|e| {
            AnalysisError::Extraction(format!("Missing chapter {name} in {}: {e}", path.display()))
        })?;
        texts.push(html_to_text(&html));
    }
    tracing::debug!("Extracted {} documents from {}", texts.len(), path.display());

    Ok(texts.join("\n"))
}

/// Archive paths of the XHTML items listed in the OPF manifest
fn manifest_documents<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
) -> Result<Option<Vec<String>>, AnalysisError> {
    let Ok(container) = read_entry(archive, CONTAINER_PATH) else {
        return Ok(None);
    };
    let Some(opf_path) = rootfile_path(&container)? else {
        return Ok(None);
    };
    let opf = read_entry(archive, &opf_path)?;

    let base = match opf_path.rfind('/') {
        Some(i) => &opf_path[..=i],
        None => "",
    };

    let mut documents = Vec::new();
    let mut reader = Reader::from_str(&opf);
    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(ref e) | Event::Empty(ref e) if e.local_name().as_ref() == b"item" => {
                let media_type = attribute(e, b"media-type")?;
                if !media_type.is_some_and(|m| m.eq_ignore_ascii_case(XHTML_MEDIA_TYPE)) {
                    continue;
                }
                if let Some(href) = attribute(e, b"href")? {
                    let href = percent_decode_str(&href)
                        .decode_utf8()
                        .map_err(|e| AnalysisError::Extraction(format!("Bad manifest href {href}: {e}")))?;
                    documents.push(format!("{base}{href}"));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(Some(documents))
}

/// `full-path` of the first `rootfile` in `META-INF/container.xml`
fn rootfile_path(container: &str) -> Result<Option<String>, AnalysisError> {
    let mut reader = Reader::from_str(container);
    loop {
        match reader.read_event().map_err(xml_error)? {
            Event::Start(ref e) | Event::Empty(ref e) if e.local_name().as_ref() == b"rootfile" => {
                return attribute(e, b"full-path");
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

/// Unescaped value of an attribute, matched by local name
fn attribute(element: &BytesStart, key: &[u8]) -> Result<Option<String>, AnalysisError> {
    for attr in element.attributes() {
        let attr = attr.map_err(xml_error)?;
        if attr.key.local_name().as_ref() == key {
            return Ok(Some(attr.unescape_value().map_err(xml_error)?.into_owned()));
        }
    }
    Ok(None)
}

fn read_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<String, AnalysisError> {
    let mut entry = archive.by_name(name).map_err(extraction_error)?;
    let mut content = String::new();
    entry.read_to_string(&mut content)?;
    Ok(content)
}

fn is_html_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.ends_with(".xhtml") || lower.ends_with(".html") || lower.ends_with(".htm")
}

fn extraction_error(e: zip::result::ZipError) -> AnalysisError {
    AnalysisError::Extraction(e.to_string())
}

fn xml_error(e: impl std::fmt::Display) -> AnalysisError {
    AnalysisError::Extraction(format!("Malformed package XML: {e}"))
}

/// Strip markup, keeping visible text and line structure
pub fn html_to_text(html: &str) -> String {
    let text = HIDDEN_BLOCK.replace_all(html, "");
    let text = RUBY_ANNOTATION.replace_all(&text, "");
    let text = LINE_BREAK.replace_all(&text, "\n");
    let text = TAG.replace_all(&text, "");
    ENTITY.replace_all(&text, decode_entity).into_owned()
}

/// Numeric references are decoded by quick-xml; unknown names stay as written
fn decode_entity(caps: &Captures) -> String {
    let raw = &caps[0];
    unescape_with(raw, |name| match name {
        "amp" => Some("&"),
        "lt" => Some("<"),
        "gt" => Some(">"),
        "quot" => Some("\""),
        "apos" => Some("'"),
        "nbsp" => Some("\u{00A0}"),
        _ => None,
    })
    .map_or_else(|_| raw.to_string(), |decoded| decoded.into_owned())
}
