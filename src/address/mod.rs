//! Syntactic address check.
//!
//! An address is accepted when it matches `local@domain.tld`: a local part
//! drawn from `[A-Za-z0-9._%+-]`, a single `@`, and a domain of letters,
//! digits, hyphens and dots whose last label has at least two letters.

mod error;
mod types;

pub use error::ParseError;
pub use types::{Domain, EmailAddress};

use std::sync::LazyLock;

use regex::Regex;

static ADDRESS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@([a-zA-Z0-9.-]+\.[a-zA-Z]{2,})$")
        .expect("address pattern is a valid regex")
});

/// Validate `raw` and return its domain part.
pub fn parse(raw: &str) -> Result<Domain, ParseError> {
    EmailAddress::parse(raw).map(|address| address.domain())
}

impl EmailAddress {
    /// Validate `raw` and keep it as an [`EmailAddress`]. The input is not
    /// trimmed; leading or trailing whitespace makes it invalid.
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let captures = ADDRESS_PATTERN
            .captures(raw)
            .ok_or(ParseError::InvalidFormat)?;
        let domain = captures.get(1).ok_or(ParseError::InvalidFormat)?;
        // the domain group starts right after the only '@'
        Ok(Self::from_parts(raw.to_string(), domain.start() - 1))
    }
}
