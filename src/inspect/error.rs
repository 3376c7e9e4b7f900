use thiserror::Error;

use crate::dns::LookupError;

/// Fatal outcomes of domain inspection.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("error looking up MX records: {source}")]
    MxLookupFailed {
        #[source]
        source: LookupError,
    },
    #[error("no MX records found for the domain")]
    NoMxRecords,
}

impl DomainError {
    pub(crate) fn mx_lookup(source: LookupError) -> Self {
        Self::MxLookupFailed { source }
    }
}
