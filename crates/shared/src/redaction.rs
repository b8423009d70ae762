//! Secret detection and redaction utilities.
//!
//! Field keys and config variables are split into words (on `_`, `-`, `.`
//! and lower-to-upper camelCase boundaries) and a key is considered secret
//! when any word names a credential.

/// The redacted placeholder string.
pub const REDACTED: &str = "[REDACTED]";

const SECRET_WORDS: &[&str] = &[
    "key",
    "apikey",
    "token",
    "secret",
    "password",
    "passwd",
    "credential",
    "credentials",
    "auth",
    "authorization",
];

/// Checks if a key/variable name likely refers to a secret.
///
/// # Examples
///
/// ```
/// use fieldlog_shared::is_secret_key;
///
/// assert!(is_secret_key("API_KEY"));
/// assert!(is_secret_key("accessToken"));
/// assert!(is_secret_key("db.password"));
/// assert!(!is_secret_key("author"));
/// assert!(!is_secret_key("LOG_LEVEL"));
/// ```
pub fn is_secret_key(key: &str) -> bool {
    key_words(key).any(|word| {
        SECRET_WORDS
            .iter()
            .any(|secret| word.eq_ignore_ascii_case(secret))
    })
}

/// Redacts a value if the key is likely a secret.
///
/// # Examples
///
/// ```
/// use fieldlog_shared::redact_if_secret;
///
/// assert_eq!(redact_if_secret("API_KEY", "sk-123"), "[REDACTED]");
/// assert_eq!(redact_if_secret("LOG_LEVEL", "debug"), "debug");
/// ```
pub fn redact_if_secret(key: &str, value: &str) -> String {
    if is_secret_key(key) {
        REDACTED.to_string()
    } else {
        value.to_string()
    }
}

fn key_words(key: &str) -> impl Iterator<Item = &str> {
    let mut words = Vec::new();
    let mut start = 0;
    let mut previous_lower = false;
    for (index, ch) in key.char_indices() {
        if matches!(ch, '_' | '-' | '.' | ' ') {
            words.push(key.get(start..index).unwrap_or(""));
            start = index + ch.len_utf8();
            previous_lower = false;
            continue;
        }
        if ch.is_ascii_uppercase() && previous_lower {
            words.push(key.get(start..index).unwrap_or(""));
            start = index;
        }
        previous_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
    }
    words.push(key.get(start..).unwrap_or(""));
    words.into_iter().filter(|word| !word.is_empty())
}
