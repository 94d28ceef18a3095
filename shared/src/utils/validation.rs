//! Username and email validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Longest accepted username
pub const USERNAME_MAX_LENGTH: usize = 64;

/// Longest accepted email address (RFC 5321 path limit)
pub const EMAIL_MAX_LENGTH: usize = 254;

/// Usernames are ASCII letters, digits, dot, underscore and hyphen.
/// They end up in URL path segments, so nothing that needs escaping.
pub static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_.\-]+$").expect("username pattern is a valid regex")
});

/// Check a username against the length bounds and character set
pub fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username.len() <= USERNAME_MAX_LENGTH
        && USERNAME_REGEX.is_match(username)
}

/// Mask an email address for logging: `alice@example.com` becomes `a***e@example.com`
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let chars: Vec<char> = local.chars().collect();
            let masked_local = match chars.len() {
                0 => String::new(),
                1 | 2 => format!("{}***", chars[0]),
                n => format!("{}***{}", chars[0], chars[n - 1]),
            };
            format!("{}@{}", masked_local, domain)
        }
        None => "***".to_string(),
    }
}
