use anyhow::{Context, Result, bail};
use clap::Parser;
use mailprobe::{Connect, DnsResolver, TcpConnector, Validator, system_resolver};

use std::io::{self, BufRead, Write};

mod args;
mod logging;
mod output;

#[cfg(test)]
mod tests;

use args::Cli;
use output::HumanReporter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level)?;

    if !matches!(cli.format.as_str(), "human" | "json") {
        bail!("unknown --format '{}', use: human|json", cli.format);
    }

    let resolver = system_resolver().context("create DNS resolver")?;
    let validator = Validator::with_options(&resolver, &TcpConnector, cli.probe_options());

    let input = io::stdin().lock();
    let out = io::stdout().lock();
    match cli.format.as_str() {
        "json" => run_json(&validator, input, out),
        _ => run_human(&validator, input, out),
    }
}

/// Next input line without its `\n` / `\r\n` ending. Bytes that are not
/// UTF-8 are replaced, so the parser rejects that line instead of the
/// stream failing. `None` on EOF or on a read error, which is logged.
fn next_line<I: BufRead>(input: &mut I) -> Option<String> {
    let mut buf = Vec::new();
    match input.read_until(b'\n', &mut buf) {
        Ok(0) => None,
        Ok(_) => {
            let text = String::from_utf8_lossy(&buf);
            let line = text.strip_suffix('\n').unwrap_or(text.as_ref());
            let line = line.strip_suffix('\r').unwrap_or(line);
            Some(line.to_string())
        }
        Err(err) => {
            tracing::error!("could not read from input: {err}");
            None
        }
    }
}

fn run_human<R, C, I, W>(validator: &Validator<'_, R, C>, mut input: I, mut out: W) -> Result<()>
where
    R: DnsResolver + ?Sized,
    C: Connect + ?Sized,
    I: BufRead,
    W: Write,
{
    writeln!(out, "Email validation tool")?;
    writeln!(out, "Input an email address:")?;
    out.flush()?;

    while let Some(email) = next_line(&mut input) {
        let mut reporter = HumanReporter::new(&mut out);
        let outcome = validator.validate(&email, &mut reporter);
        reporter.finish().context("write report")?;

        match outcome {
            Ok(_) => writeln!(out, "Email validated successfully!")?,
            Err(err) => writeln!(out, "Error: {err}")?,
        }
        write!(out, "\nInput an email address: ")?;
        out.flush()?;
    }
    Ok(())
}

#[cfg(feature = "with-serde")]
fn run_json<R, C, I, W>(validator: &Validator<'_, R, C>, mut input: I, mut out: W) -> Result<()>
where
    R: DnsResolver + ?Sized,
    C: Connect + ?Sized,
    I: BufRead,
    W: Write,
{
    use mailprobe::CollectingReporter;

    while let Some(email) = next_line(&mut input) {
        let mut reporter = CollectingReporter::default();
        let outcome = validator.validate(&email, &mut reporter);
        for warning in &reporter.warnings {
            tracing::warn!("{warning}");
        }
        let row = output::JsonRow::new(&email, &outcome, &reporter);
        writeln!(out, "{}", serde_json::to_string(&row)?)?;
        out.flush()?;
    }
    Ok(())
}

#[cfg(not(feature = "with-serde"))]
fn run_json<R, C, I, W>(_validator: &Validator<'_, R, C>, _input: I, _out: W) -> Result<()>
where
    R: DnsResolver + ?Sized,
    C: Connect + ?Sized,
    I: BufRead,
    W: Write,
{
    bail!("--format json requires the 'with-serde' feature")
}
