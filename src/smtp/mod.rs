//! SMTP recipient probe.
//!
//! [`probe`] connects to the primary mail exchanger of a domain, runs
//! EHLO/HELO, `MAIL FROM` and `RCPT TO` for the address under test, and quits
//! without ever sending `DATA`. A 2xx reply to `RCPT TO` is the success
//! signal; any other reply (or a broken connection) maps to the
//! [`SmtpError`] of the step where it happened. No TLS, no retries, no
//! fallback to other MX hosts.

mod connect;
mod error;
mod options;
mod probe;
mod reply;
mod session;

pub use connect::{Connect, TcpConnector};
pub use error::{SmtpError, StepFailure};
pub use options::ProbeOptions;
pub use probe::{Probe, ProbeReport, ProbeState, probe};
pub use reply::SmtpReply;
pub use session::SmtpSession;

#[cfg(test)]
pub(crate) mod testing;
