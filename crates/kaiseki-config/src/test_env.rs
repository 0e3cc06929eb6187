use std::env;
use std::sync::Mutex;

/// Environment variables are process-wide; tests touching them take turns
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Run `f` with the given variables set (`Some`) or removed (`None`),
/// restoring the previous values afterwards
pub(crate) fn with_env<T>(vars: &[(&str, Option<&str>)], f: impl FnOnce() -> T) -> T {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    let saved: Vec<_> = vars.iter().map(|(key, _)| (*key, env::var_os(key))).collect();
    for (key, value) in vars {
        set(key, value.map(Into::into));
    }

    let result = f();

    for (key, value) in saved {
        set(key, value);
    }
    result
}

fn set(key: &str, value: Option<std::ffi::OsString>) {
    // SAFETY: every test that reads or writes the environment holds ENV_LOCK
    unsafe {
        match value {
            Some(value) => env::set_var(key, value),
            None => env::remove_var(key),
        }
    }
}
