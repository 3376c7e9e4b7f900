#![forbid(unsafe_code)]
//! mailprobe — best-effort deliverability check for an email address:
//! format, DNS (MX/SPF/DMARC), then an SMTP `RCPT TO` probe that never
//! sends a message.

pub mod address;
pub mod dns;
pub mod inspect;
pub mod pipeline;
pub mod smtp;

pub use address::{Domain, EmailAddress, ParseError, parse};
pub use dns::{DnsResolver, LookupError, LookupMx, LookupTxt, MxRecord, system_resolver};
pub use inspect::{DomainError, DomainRecordSet, LookupWarning, RecordKind, inspect};
pub use pipeline::{
    CollectingReporter, Reporter, Stage, TracingReporter, ValidationError, ValidationOutcome,
    Validator,
};
pub use smtp::{
    Connect, Probe, ProbeOptions, ProbeReport, ProbeState, SmtpError, SmtpReply, StepFailure,
    TcpConnector, probe,
};
