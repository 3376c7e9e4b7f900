use std::fmt;
use std::io;

use thiserror::Error;

use super::{ProbeState, SmtpReply};
use crate::dns::LookupError;

/// Why a dialogue step did not reach its next state.
#[derive(Debug)]
pub enum StepFailure {
    /// The server answered with a non-2xx reply.
    Reply(SmtpReply),
    /// The connection broke while sending the command or reading the reply.
    Transport(io::Error),
}

impl fmt::Display for StepFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reply(reply) => write!(f, "{reply}"),
            Self::Transport(err) => write!(f, "I/O error: {err}"),
        }
    }
}

impl std::error::Error for StepFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Reply(_) => None,
            Self::Transport(err) => Some(err),
        }
    }
}

impl From<io::Error> for StepFailure {
    fn from(err: io::Error) -> Self {
        Self::Transport(err)
    }
}

#[derive(Debug, Error)]
pub enum SmtpError {
    #[error("no MX host to probe for {domain}")]
    NoMxHost {
        domain: String,
        #[source]
        source: Option<LookupError>,
    },
    #[error("error connecting to mail server {host}: {source}")]
    ConnectFailed {
        host: String,
        #[source]
        source: io::Error,
    },
    #[error("greeting rejected: {failure}")]
    GreetingRejected {
        #[source]
        failure: StepFailure,
    },
    #[error("MAIL FROM rejected: {failure}")]
    SenderRejected {
        #[source]
        failure: StepFailure,
    },
    #[error("RCPT TO rejected: {failure}")]
    RecipientRejected {
        #[source]
        failure: StepFailure,
    },
    #[error("{command} issued while {actual:?}, expected {expected:?}")]
    OutOfSequence {
        command: &'static str,
        expected: ProbeState,
        actual: ProbeState,
    },
}

impl SmtpError {
    pub(crate) fn no_mx_host(domain: impl Into<String>, source: Option<LookupError>) -> Self {
        Self::NoMxHost {
            domain: domain.into(),
            source,
        }
    }

    pub(crate) fn greeting(failure: impl Into<StepFailure>) -> Self {
        Self::GreetingRejected {
            failure: failure.into(),
        }
    }

    pub(crate) fn sender(failure: impl Into<StepFailure>) -> Self {
        Self::SenderRejected {
            failure: failure.into(),
        }
    }

    pub(crate) fn recipient(failure: impl Into<StepFailure>) -> Self {
        Self::RecipientRejected {
            failure: failure.into(),
        }
    }

    /// The server reply behind a rejection, if the server gave one.
    pub fn reply(&self) -> Option<&SmtpReply> {
        match self {
            Self::GreetingRejected { failure }
            | Self::SenderRejected { failure }
            | Self::RecipientRejected { failure } => match failure {
                StepFailure::Reply(reply) => Some(reply),
                StepFailure::Transport(_) => None,
            },
            _ => None,
        }
    }
}

impl From<SmtpReply> for StepFailure {
    fn from(reply: SmtpReply) -> Self {
        Self::Reply(reply)
    }
}
