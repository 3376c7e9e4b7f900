use std::fmt;

#[cfg(feature = "with-serde")]
use serde::Serialize;

/// Domain part of a syntactically valid address, case preserved.
#[cfg_attr(feature = "with-serde", derive(Serialize))]
#[cfg_attr(feature = "with-serde", serde(transparent))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Domain(String);

impl Domain {
    pub(crate) fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name queried for the DMARC policy record of this domain.
    pub fn dmarc_name(&self) -> String {
        format!("_dmarc.{}", self.0)
    }
}

impl AsRef<str> for Domain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An address that matched the `local@domain.tld` shape.
///
/// Only [`EmailAddress::parse`] builds one, so holding a value is proof the
/// text went through the parser.
#[cfg_attr(feature = "with-serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress {
    address: String,
    #[cfg_attr(feature = "with-serde", serde(skip))]
    at: usize,
}

impl EmailAddress {
    pub(crate) fn from_parts(address: String, at: usize) -> Self {
        Self { address, at }
    }

    pub fn as_str(&self) -> &str {
        &self.address
    }

    pub fn local_part(&self) -> &str {
        &self.address[..self.at]
    }

    pub fn domain(&self) -> Domain {
        Domain::new(&self.address[self.at + 1..])
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address)
    }
}
