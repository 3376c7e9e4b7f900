use std::io::{Read, Write};

#[cfg(feature = "with-serde")]
use serde::Serialize;

use super::{Connect, ProbeOptions, SmtpError, SmtpReply, SmtpSession, StepFailure};
use crate::address::{Domain, EmailAddress};
use crate::dns::LookupMx;

#[cfg_attr(feature = "with-serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeState {
    Connected,
    Greeted,
    SenderAccepted,
    RecipientAccepted,
    Closed,
}

/// Successful probe: the primary MX accepted the recipient.
#[cfg_attr(feature = "with-serde", derive(Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub host: String,
    pub recipient_reply: SmtpReply,
    pub transcript: Vec<String>,
}

/// One partial SMTP transaction, driven step by step.
///
/// `Connected -> Greeted -> SenderAccepted -> RecipientAccepted`, then
/// `Closed`. A step either advances the state or returns the matching
/// [`SmtpError`] and leaves the state where it was. `QUIT` goes out exactly
/// once, from [`Probe::close`] or from `Drop`; `DATA` is never sent.
pub struct Probe<S: Read + Write> {
    session: SmtpSession<S>,
    state: ProbeState,
}

impl<S: Read + Write> Probe<S> {
    /// Take over a freshly opened connection and read the server banner.
    pub fn start(stream: S) -> Result<Self, SmtpError> {
        let mut probe = Self {
            session: SmtpSession::new(stream),
            state: ProbeState::Connected,
        };
        let banner = probe.session.read_reply().map_err(SmtpError::greeting)?;
        if !banner.is_positive_completion() {
            return Err(SmtpError::greeting(banner));
        }
        Ok(probe)
    }

    pub fn state(&self) -> ProbeState {
        self.state
    }

    pub fn transcript(&self) -> &[String] {
        self.session.transcript()
    }

    /// EHLO, falling back to HELO when the server refuses EHLO.
    pub fn greet(&mut self, identity: &str) -> Result<SmtpReply, SmtpError> {
        self.expect_state("HELO", ProbeState::Connected)?;
        let ehlo = self
            .session
            .command(&format!("EHLO {identity}"))
            .map_err(SmtpError::greeting)?;
        let reply = if ehlo.is_positive_completion() {
            ehlo
        } else {
            self.session
                .command(&format!("HELO {identity}"))
                .map_err(SmtpError::greeting)?
        };
        self.advance(reply, ProbeState::Greeted, |f| SmtpError::greeting(f))
    }

    pub fn mail_from(&mut self, sender: &str) -> Result<SmtpReply, SmtpError> {
        self.expect_state("MAIL FROM", ProbeState::Greeted)?;
        let reply = self
            .session
            .command(&format!("MAIL FROM:<{sender}>"))
            .map_err(SmtpError::sender)?;
        self.advance(reply, ProbeState::SenderAccepted, |f| SmtpError::sender(f))
    }

    pub fn rcpt_to(&mut self, recipient: &str) -> Result<SmtpReply, SmtpError> {
        self.expect_state("RCPT TO", ProbeState::SenderAccepted)?;
        let reply = self
            .session
            .command(&format!("RCPT TO:<{recipient}>"))
            .map_err(SmtpError::recipient)?;
        self.advance(reply, ProbeState::RecipientAccepted, |f| {
            SmtpError::recipient(f)
        })
    }

    /// Send QUIT and hand back the transcript. The connection is released
    /// when the probe is dropped at the end of this call.
    pub fn close(mut self) -> Vec<String> {
        self.quit();
        self.session.take_transcript()
    }

    fn quit(&mut self) {
        if self.state == ProbeState::Closed {
            return;
        }
        self.state = ProbeState::Closed;
        if let Err(err) = self.session.command("QUIT") {
            tracing::debug!("QUIT not acknowledged: {err}");
        }
    }

    fn expect_state(&self, command: &'static str, expected: ProbeState) -> Result<(), SmtpError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(SmtpError::OutOfSequence {
                command,
                expected,
                actual: self.state,
            })
        }
    }

    fn advance(
        &mut self,
        reply: SmtpReply,
        next: ProbeState,
        reject: fn(StepFailure) -> SmtpError,
    ) -> Result<SmtpReply, SmtpError> {
        if reply.is_positive_completion() {
            self.state = next;
            Ok(reply)
        } else {
            Err(reject(StepFailure::Reply(reply)))
        }
    }
}

impl<S: Read + Write> Drop for Probe<S> {
    fn drop(&mut self) {
        self.quit();
    }
}

/// Ask the domain's primary mail exchanger whether it accepts `address`.
///
/// MX records are resolved again here; the host with the lowest preference
/// is used (resolver order breaks ties) and no other host is tried.
pub fn probe<R, C>(
    resolver: &R,
    connector: &C,
    address: &EmailAddress,
    domain: &Domain,
    options: &ProbeOptions,
) -> Result<ProbeReport, SmtpError>
where
    R: LookupMx + ?Sized,
    C: Connect + ?Sized,
{
    let host = primary_exchange(resolver, domain)?;
    let stream = connector
        .connect(&host, options.port)
        .map_err(|source| SmtpError::ConnectFailed {
            host: host.clone(),
            source,
        })?;
    tracing::debug!(%host, port = options.port, "connected to mail exchanger");

    let mut probe = Probe::start(stream)?;
    probe.greet(&options.helo_domain)?;
    probe.mail_from(&options.mail_from)?;
    let recipient_reply = probe.rcpt_to(address.as_str())?;
    let transcript = probe.close();

    Ok(ProbeReport {
        host,
        recipient_reply,
        transcript,
    })
}

fn primary_exchange<R>(resolver: &R, domain: &Domain) -> Result<String, SmtpError>
where
    R: LookupMx + ?Sized,
{
    let records = resolver
        .lookup_mx(domain.as_str())
        .map_err(|err| SmtpError::no_mx_host(domain.as_str(), Some(err)))?;
    records
        .into_iter()
        // a null MX (".") means the domain takes no mail
        .filter(|record| !record.exchange.is_empty())
        .min_by_key(|record| record.preference)
        .map(|record| record.exchange)
        .ok_or_else(|| SmtpError::no_mx_host(domain.as_str(), None))
}
