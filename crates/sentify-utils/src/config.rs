//! Environment-backed configuration helpers

use std::str::FromStr;

/// Read an environment variable, treating unset and blank values alike.
///
/// Surrounding whitespace is trimmed.
pub fn env_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Read and parse an environment variable.
///
/// Values that fail to parse are logged and ignored so a typo never aborts
/// startup.
pub fn env_parse<T>(key: &str) -> Option<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = env_var(key)?;
    match raw.parse::<T>() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, value = %raw, error = %e, "ignoring unparsable environment variable");
            None
        }
    }
}

/// Read a boolean flag (`1/true/yes/on` or `0/false/no/off`, case-insensitive).
pub fn env_flag(key: &str) -> Option<bool> {
    let raw = env_var(key)?;
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => {
            tracing::warn!(key, value = %raw, "ignoring unrecognized boolean flag");
            None
        }
    }
}
