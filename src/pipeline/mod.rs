//! Parse -> inspect -> probe, one address at a time.

mod report;

pub use report::{CollectingReporter, Reporter, TracingReporter};

use std::fmt;

use thiserror::Error;

#[cfg(feature = "with-serde")]
use serde::Serialize;

use crate::address::{EmailAddress, ParseError};
use crate::dns::DnsResolver;
use crate::inspect::{self, DomainError};
use crate::smtp::{self, Connect, ProbeOptions, ProbeReport, SmtpError};

#[cfg_attr(feature = "with-serde", derive(Serialize))]
#[cfg_attr(feature = "with-serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Parse,
    Domain,
    Smtp,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse => f.write_str("parse"),
            Self::Domain => f.write_str("domain"),
            Self::Smtp => f.write_str("smtp"),
        }
    }
}

/// The first stage failure for one address.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid email: {0}")]
    Parse(#[from] ParseError),
    #[error("domain validation failed: {0}")]
    Domain(#[from] DomainError),
    #[error("SMTP validation failed: {0}")]
    Smtp(#[from] SmtpError),
}

impl ValidationError {
    pub fn stage(&self) -> Stage {
        match self {
            Self::Parse(_) => Stage::Parse,
            Self::Domain(_) => Stage::Domain,
            Self::Smtp(_) => Stage::Smtp,
        }
    }
}

pub type ValidationOutcome = Result<ProbeReport, ValidationError>;

/// Runs the three stages with injected DNS and transport collaborators.
pub struct Validator<'a, R: ?Sized, C: ?Sized> {
    resolver: &'a R,
    connector: &'a C,
    options: ProbeOptions,
}

impl<'a, R, C> Validator<'a, R, C>
where
    R: DnsResolver + ?Sized,
    C: Connect + ?Sized,
{
    pub fn new(resolver: &'a R, connector: &'a C) -> Self {
        Self::with_options(resolver, connector, ProbeOptions::default())
    }

    pub fn with_options(resolver: &'a R, connector: &'a C, options: ProbeOptions) -> Self {
        Self {
            resolver,
            connector,
            options,
        }
    }

    pub fn options(&self) -> &ProbeOptions {
        &self.options
    }

    /// Validate one address. Stops at the first failing stage; the domain
    /// report reaches `reporter` before any SMTP traffic.
    pub fn validate(&self, raw: &str, reporter: &mut dyn Reporter) -> ValidationOutcome {
        let address = EmailAddress::parse(raw)?;
        let domain = address.domain();

        inspect::inspect(self.resolver, &domain, reporter)?;

        let report = smtp::probe(
            self.resolver,
            self.connector,
            &address,
            &domain,
            &self.options,
        )?;
        tracing::info!(%address, host = %report.host, "recipient accepted");
        Ok(report)
    }
}
