//! Login identifier classification.
//!
//! The login form accepts a single "username or email" field. Before the
//! payload goes to the auth service the raw text is tagged as one or the
//! other using a syntactic `local@domain.tld` check. No DNS lookup, no
//! uniqueness check: those belong to the auth service.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// One character that is neither `@` nor whitespace. Whitespace here is the
/// ECMAScript `\s` set, which includes U+FEFF and leaves out U+0085.
const SEGMENT_CHAR: &str = r"[^\t\n\x0B\f\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}@]";

/// `local@domain.tld`: single `@`, at least one `.` after it, no whitespace.
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!("^{SEGMENT_CHAR}+@{SEGMENT_CHAR}+\\.{SEGMENT_CHAR}+$");
    Regex::new(&pattern).expect("valid email pattern")
});

/// A login identifier tagged by its shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassifiedIdentifier {
    Email(String),
    Username(String),
}

impl ClassifiedIdentifier {
    /// The raw identifier text, exactly as typed.
    pub fn as_str(&self) -> &str {
        match self {
            ClassifiedIdentifier::Email(s) | ClassifiedIdentifier::Username(s) => s,
        }
    }

    pub fn is_email(&self) -> bool {
        matches!(self, ClassifiedIdentifier::Email(_))
    }

    /// Short label used in logs and CLI output.
    pub fn kind(&self) -> &'static str {
        match self {
            ClassifiedIdentifier::Email(_) => "email",
            ClassifiedIdentifier::Username(_) => "username",
        }
    }
}

impl fmt::Display for ClassifiedIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.as_str())
    }
}

/// Returns true if `raw` has the `local@domain.tld` shape.
///
/// The input is not trimmed: leading or trailing whitespace fails the check.
pub fn is_email_shaped(raw: &str) -> bool {
    EMAIL_SHAPE.is_match(raw)
}

/// Classifies a raw login identifier as an email or a username.
///
/// Total and pure. Case is preserved and nothing is trimmed.
pub fn classify(raw: &str) -> ClassifiedIdentifier {
    if is_email_shaped(raw) {
        ClassifiedIdentifier::Email(raw.to_string())
    } else {
        ClassifiedIdentifier::Username(raw.to_string())
    }
}
