pub mod error;
pub mod language;

pub use error::{AnalysisError, TokenizeError};
pub use language::{FrequencyProvider, Morpheme, SplitMode, Tokenizer};
