use thiserror::Error;
use trust_dns_resolver::error::ResolveError;

/// Errors raised by the resolver collaborator.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("resolver initialization failed: {source}")]
    ResolverInit {
        #[source]
        source: std::io::Error,
    },
    #[error("lookup failed for {name}: {source}")]
    Resolve {
        name: String,
        #[source]
        source: ResolveError,
    },
    #[error("TXT record {name} contains invalid UTF-8 data: {source}")]
    TxtDataUtf8 {
        name: String,
        #[source]
        source: std::str::Utf8Error,
    },
}

impl LookupError {
    pub(crate) fn resolver_init(source: std::io::Error) -> Self {
        Self::ResolverInit { source }
    }

    pub(crate) fn resolve(name: impl Into<String>, source: ResolveError) -> Self {
        Self::Resolve {
            name: name.into(),
            source,
        }
    }

    pub(crate) fn txt_data_utf8(name: impl Into<String>, source: std::str::Utf8Error) -> Self {
        Self::TxtDataUtf8 {
            name: name.into(),
            source,
        }
    }
}
