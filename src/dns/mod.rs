//! Resolver collaborator.
//!
//! The pipeline never talks to DNS directly; it goes through [`LookupMx`] and
//! [`LookupTxt`] so tests can swap in canned answers. Both traits are
//! implemented for the synchronous `trust_dns_resolver::Resolver`, built from
//! the system configuration by [`system_resolver`].

mod error;
mod resolver;
mod types;

pub use error::LookupError;
pub use resolver::system_resolver;
pub use types::MxRecord;

/// MX lookups. An answer without records is `Ok(vec![])`.
pub trait LookupMx {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, LookupError>;
}

/// TXT lookups, one `String` per record with its character-strings joined.
pub trait LookupTxt {
    fn lookup_txt(&self, name: &str) -> Result<Vec<String>, LookupError>;
}

/// Everything the pipeline needs from DNS.
pub trait DnsResolver: LookupMx + LookupTxt {}

impl<T: LookupMx + LookupTxt + ?Sized> DnsResolver for T {}

#[cfg(test)]
pub(crate) mod testing;
