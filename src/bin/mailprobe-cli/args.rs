use clap::Parser;
use mailprobe::ProbeOptions;

/// Reads one address per line on stdin and checks each: format, DNS, SMTP.
#[derive(Parser)]
#[command(name = "mailprobe-cli", version)]
pub struct Cli {
    /// format: human|json
    #[arg(long, default_value = "human")]
    pub format: String,

    /// name announced in EHLO/HELO
    #[arg(long, default_value = "localhost")]
    pub helo: String,

    /// envelope sender for MAIL FROM (never a real mailbox)
    #[arg(long, default_value = "test@example.com")]
    pub mail_from: String,

    /// log filter used when RUST_LOG is unset (ex: warn, debug, mailprobe=trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    pub fn probe_options(&self) -> ProbeOptions {
        ProbeOptions {
            helo_domain: self.helo.clone(),
            mail_from: self.mail_from.clone(),
            ..ProbeOptions::default()
        }
    }
}
