use std::fmt;

#[cfg(feature = "with-serde")]
use serde::Serialize;

use crate::address::Domain;
use crate::dns::MxRecord;

/// What DNS says about a domain's mail setup.
#[cfg_attr(feature = "with-serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRecordSet {
    domain: Domain,
    mx: Vec<MxRecord>,
    spf: Option<String>,
    dmarc: Option<String>,
}

impl DomainRecordSet {
    pub(crate) fn new(
        domain: Domain,
        mx: Vec<MxRecord>,
        spf: Option<String>,
        dmarc: Option<String>,
    ) -> Self {
        Self {
            domain,
            mx,
            spf,
            dmarc,
        }
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// MX records in resolver order.
    pub fn mx_records(&self) -> &[MxRecord] {
        &self.mx
    }

    pub fn has_mx(&self) -> bool {
        !self.mx.is_empty()
    }

    pub fn has_spf(&self) -> bool {
        self.spf.is_some()
    }

    /// The SPF record text, empty when none was found.
    pub fn spf_record(&self) -> &str {
        self.spf.as_deref().unwrap_or_default()
    }

    pub fn has_dmarc(&self) -> bool {
        self.dmarc.is_some()
    }

    /// The DMARC record text, empty when none was found.
    pub fn dmarc_record(&self) -> &str {
        self.dmarc.as_deref().unwrap_or_default()
    }
}

#[cfg_attr(feature = "with-serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Spf,
    Dmarc,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Spf => f.write_str("TXT"),
            Self::Dmarc => f.write_str("DMARC"),
        }
    }
}

/// A TXT lookup that failed without stopping the inspection.
#[cfg_attr(feature = "with-serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupWarning {
    pub kind: RecordKind,
    pub domain: Domain,
    pub message: String,
}

impl fmt::Display for LookupWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error looking up {} records for domain {}: {}",
            self.kind, self.domain, self.message
        )
    }
}
