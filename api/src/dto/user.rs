use serde::{Deserialize, Serialize};
use validator::Validate;

use av_shared::validation::USERNAME_REGEX;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Letters, digits, '_', '.' and '-'
    #[validate(
        length(min = 1, max = 64, message = "username must be 1-64 characters"),
        regex(path = *USERNAME_REGEX, message = "username may only contain letters, digits, '_', '.' and '-'")
    )]
    pub username: String,

    #[validate(
        email(message = "email must be a valid email address"),
        length(max = 254, message = "email must be at most 254 characters")
    )]
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(username: &str, email: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request("alice", "alice@x.com").validate().is_ok());
        assert!(request("a.b-c_d", "a@example.org").validate().is_ok());
    }

    #[test]
    fn test_invalid_username() {
        assert!(request("", "alice@x.com").validate().is_err());
        assert!(request("has space", "alice@x.com").validate().is_err());
        assert!(request("slash/name", "alice@x.com").validate().is_err());
        assert!(request(&"a".repeat(65), "alice@x.com").validate().is_err());
    }

    #[test]
    fn test_invalid_email() {
        let errors = request("alice", "not-an-email").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
        assert!(request("alice", "").validate().is_err());
    }
}
