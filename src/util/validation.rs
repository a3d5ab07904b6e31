use regex::Regex;
use std::sync::LazyLock;

pub const HANDLE_MIN: usize = 2;
pub const HANDLE_MAX: usize = 30;

// Both ends must be alphanumeric characters except for the leading
// underscore which is allowed for legacy handles like `_apple`.
static HANDLE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^[A-Za-z0-9_][A-Za-z0-9\.\-_]*[A-Za-z0-9]$").unwrap()
});

pub const PASSWORD_MIN: usize = 8;
pub const PASSWORD_MAX: usize = 128;

pub const BIO_MAX: usize = 160;

#[must_use]
pub fn is_valid_handle(handle: &str) -> bool {
    (HANDLE_MIN..=HANDLE_MAX).contains(&handle.len()) && HANDLE_REGEX.is_match(handle)
}

/// Checks the password and returns a message explaining why it is
/// rejected, if it is rejected.
#[must_use]
pub fn check_password(password: &str) -> Option<&'static str> {
    // All passwords must have no trailing or leading whitespaces
    if password.trim().len() != password.len() {
        Some("Passwords must not have starting or ending with spaces")
    } else if password.len() > PASSWORD_MAX {
        Some("Passwords must not be too big")
    } else if password.len() < PASSWORD_MIN {
        Some("Passwords must not be too short")
    } else {
        None
    }
}

/// Counts characters the way a person reading the post would count,
/// not the bytes it takes.
#[must_use]
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_handle() {
        assert!(is_valid_handle("alice"));
        assert!(is_valid_handle("mark.robes"));
        assert!(is_valid_handle("salmon-ella"));
        assert!(is_valid_handle("crossword_puzzle"));
        assert!(is_valid_handle("1-taylor.swift.fan"));
        assert!(is_valid_handle("2pac"));
        assert!(is_valid_handle("_apple"));

        assert!(!is_valid_handle("a"));
        assert!(!is_valid_handle("overlover_underscore_"));
        assert!(!is_valid_handle("pretty ugly"));
        assert!(!is_valid_handle("thisisaveryveryverylonghandlename"));
    }

    #[test]
    fn test_check_password() {
        static INVALID_PASSWORDS: &[&str] = &[
            "\thelloworld",
            "    hello",
            "world    ",
            "short",
            "we_dont_accept_tabs\t",
        ];

        for password in INVALID_PASSWORDS {
            assert!(check_password(password).is_some(), "{password:?} passed");
        }

        assert!(check_password(&"a".repeat(PASSWORD_MAX + 1)).is_some());
        assert_eq!(check_password("correct horse battery"), None);
    }

    #[test]
    fn test_char_len() {
        assert_eq!(char_len("hi"), 2);
        assert_eq!(char_len("héllo"), 5);
        assert_eq!(char_len("🐦🐦"), 2);
    }
}
