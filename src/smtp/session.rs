use std::io::{self, Read, Write};

use super::SmtpReply;

/// Line-oriented SMTP client transport over any byte stream.
///
/// Every command and reply line is kept in a transcript (`C: ...` /
/// `S: ...`) and logged at debug level.
#[derive(Debug)]
pub struct SmtpSession<S> {
    stream: S,
    buffer: Vec<u8>,
    transcript: Vec<String>,
}

impl<S: Read + Write> SmtpSession<S> {
    pub fn new(stream: S) -> Self {
        Self {
            stream,
            buffer: Vec::new(),
            transcript: Vec::new(),
        }
    }

    /// Send `command` and wait for the complete reply.
    pub fn command(&mut self, command: &str) -> io::Result<SmtpReply> {
        self.send_line(command)?;
        self.read_reply()
    }

    pub fn send_line(&mut self, command: &str) -> io::Result<()> {
        self.record("C", command);
        let mut data = command.as_bytes().to_vec();
        data.extend_from_slice(b"\r\n");
        self.stream.write_all(&data)?;
        self.stream.flush()
    }

    pub fn read_reply(&mut self) -> io::Result<SmtpReply> {
        let mut lines = Vec::new();
        let mut code: Option<u16> = None;
        loop {
            let line = self.read_line()?;
            self.record("S", &line);
            if line.len() < 3 || !line.is_char_boundary(3) {
                return Err(invalid_data(format!("invalid SMTP reply: '{line}'")));
            }
            let parsed_code = line[..3]
                .parse::<u16>()
                .map_err(|_| invalid_data(format!("invalid SMTP status code in: '{line}'")))?;
            if let Some(existing) = code {
                if existing != parsed_code {
                    return Err(invalid_data(format!(
                        "inconsistent SMTP reply codes: {existing} vs {parsed_code}"
                    )));
                }
            } else {
                code = Some(parsed_code);
            }
            let continuation = line.as_bytes().get(3) == Some(&b'-');
            let text = line.get(4..).unwrap_or_default().to_string();
            lines.push(text);
            if !continuation {
                break;
            }
        }
        let code = code.ok_or_else(|| invalid_data("SMTP reply missing status code".into()))?;
        Ok(SmtpReply::new(code, lines))
    }

    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub fn take_transcript(&mut self) -> Vec<String> {
        std::mem::take(&mut self.transcript)
    }

    fn read_line(&mut self) -> io::Result<String> {
        loop {
            if let Some(pos) = self.buffer.iter().position(|byte| *byte == b'\n') {
                let mut line = self.buffer.drain(..=pos).collect::<Vec<_>>();
                line.pop();
                if line.last() == Some(&b'\r') {
                    line.pop();
                }
                return String::from_utf8(line)
                    .map_err(|err| invalid_data(format!("utf8 error: {err}")));
            }

            let mut buf = [0u8; 512];
            let read = self.stream.read(&mut buf)?;
            if read == 0 {
                return Err(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    "connection closed while reading reply",
                ));
            }
            self.buffer.extend_from_slice(&buf[..read]);
        }
    }

    fn record(&mut self, direction: &str, message: &str) {
        tracing::debug!("{direction}: {message}");
        self.transcript.push(format!("{direction}: {message}"));
    }
}

fn invalid_data(message: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, message)
}
