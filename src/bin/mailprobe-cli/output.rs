use std::io::{self, Write};

use mailprobe::{DomainRecordSet, LookupWarning, Reporter};

/// Prints the domain report block as soon as inspection is done.
pub struct HumanReporter<W: Write> {
    out: W,
    error: Option<io::Error>,
}

impl<W: Write> HumanReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out, error: None }
    }

    /// Surface the first write error, if any.
    pub fn finish(self) -> io::Result<()> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn write_records(&mut self, records: &DomainRecordSet) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "=> Email Domain: {}", records.domain())?;
        writeln!(self.out, "=> hasMX: {}", records.has_mx())?;
        writeln!(self.out, "=> hasSPF: {}", records.has_spf())?;
        writeln!(self.out, "=> spfRecord: {}", records.spf_record())?;
        writeln!(self.out, "=> hasDMARC: {}", records.has_dmarc())?;
        writeln!(self.out, "=> dmarcRecord: {}", records.dmarc_record())?;
        Ok(())
    }
}

impl<W: Write> Reporter for HumanReporter<W> {
    fn domain_inspected(&mut self, records: &DomainRecordSet) {
        if self.error.is_some() {
            return;
        }
        if let Err(err) = self.write_records(records) {
            self.error = Some(err);
        }
    }

    fn lookup_warning(&mut self, warning: &LookupWarning) {
        tracing::warn!("{warning}");
    }
}

#[cfg(feature = "with-serde")]
pub use json::JsonRow;

#[cfg(feature = "with-serde")]
mod json {
    use serde::Serialize;

    use mailprobe::{
        CollectingReporter, DomainRecordSet, LookupWarning, SmtpReply, Stage, ValidationOutcome,
    };

    /// One line of `--format json` output.
    #[derive(Serialize)]
    pub struct JsonRow<'a> {
        pub email: &'a str,
        pub valid: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub stage: Option<Stage>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub error: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub domain: Option<&'a DomainRecordSet>,
        pub warnings: &'a [LookupWarning],
        #[serde(skip_serializing_if = "Option::is_none")]
        pub mx_host: Option<&'a str>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub rcpt_reply: Option<&'a SmtpReply>,
    }

    impl<'a> JsonRow<'a> {
        pub fn new(
            email: &'a str,
            outcome: &'a ValidationOutcome,
            reporter: &'a CollectingReporter,
        ) -> Self {
            let (stage, error, mx_host, rcpt_reply) = match outcome {
                Ok(report) => (
                    None,
                    None,
                    Some(report.host.as_str()),
                    Some(&report.recipient_reply),
                ),
                Err(err) => (Some(err.stage()), Some(err.to_string()), None, None),
            };
            Self {
                email,
                valid: outcome.is_ok(),
                stage,
                error,
                domain: reporter.records.first(),
                warnings: &reporter.warnings,
                mx_host,
                rcpt_reply,
            }
        }
    }
}
