use regex::Regex;
use std::sync::OnceLock;

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn pattern() -> &'static Regex {
    EMAIL_PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
            .expect("email pattern compiles")
    })
}

/// Syntactic address check: `local@domain.tld`.
///
/// The local part may not start with a dot and the address may not contain `..`; the
/// `regex` crate has no lookaround, so those two rules live outside the pattern.
pub(crate) fn is_valid_email(candidate: &str) -> bool {
    !candidate.starts_with('.') && !candidate.contains("..") && pattern().is_match(candidate)
}

#[cfg(test)]
mod tests {
    use super::is_valid_email;

    #[test]
    fn accepts_common_addresses() {
        for address in [
            "test@example.com",
            "contractor@example.com",
            "first.last+tag@mail.example.co",
            "o'brien_99@sub-domain.example.org",
        ] {
            assert!(is_valid_email(address), "{address} should be accepted");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for address in [
            "",
            "not-an-email",
            "invalid-email",
            "@example.com",
            "user@",
            "user@example",
            "user@example.c",
            ".user@example.com",
            "us..er@example.com",
            "user.@example.com",
            "user@-example.com",
            "user name@example.com",
            "user@example.com ",
        ] {
            assert!(!is_valid_email(address), "{address:?} should be rejected");
        }
    }
}
