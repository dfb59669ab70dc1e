use once_cell::sync::Lazy;
use regex::Regex;

/// `local@domain.tld`: no whitespace or extra `@`, and a dot in the domain part.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .expect("Email regex should compile - this is a static pattern")
});

/// Validates that the input looks like an email address.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Name and email are both required; whitespace counts as content.
pub fn is_present(value: &str) -> bool {
    !value.is_empty()
}
