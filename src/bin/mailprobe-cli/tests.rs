use std::cell::{Cell, RefCell};
use std::io::{self, BufReader, Cursor, Read, Write};
use std::rc::Rc;

use mailprobe::{Connect, LookupError, LookupMx, LookupTxt, MxRecord, Validator};

use super::{next_line, run_human};

const ACCEPTS_RCPT: &str =
    "220 mx ESMTP\r\n250 mx\r\n250 2.1.0 Ok\r\n250 2.1.5 Ok\r\n221 2.0.0 Bye\r\n";
const REJECTS_RCPT: &str =
    "220 mx ESMTP\r\n250 mx\r\n250 2.1.0 Ok\r\n550 5.1.1 no such user\r\n221 2.0.0 Bye\r\n";

const BANNER: &str = "Email validation tool\nInput an email address:\n";
const PROMPT: &str = "\nInput an email address: ";
const GOOD_DOMAIN_BLOCK: &str = "\n=> Email Domain: good-domain.example\n\
     => hasMX: true\n\
     => hasSPF: true\n\
     => spfRecord: v=spf1 include:_spf.example.com ~all\n\
     => hasDMARC: false\n\
     => dmarcRecord: \n";

/// `good-domain.example` with one MX and an SPF record, nothing else.
pub(crate) struct GoodDomain;

impl LookupMx for GoodDomain {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, LookupError> {
        if domain == "good-domain.example" {
            Ok(vec![MxRecord::new(10, "mx.good-domain.example")])
        } else {
            Ok(Vec::new())
        }
    }
}

impl LookupTxt for GoodDomain {
    fn lookup_txt(&self, name: &str) -> Result<Vec<String>, LookupError> {
        if name == "good-domain.example" {
            Ok(vec!["v=spf1 include:_spf.example.com ~all".to_string()])
        } else {
            Ok(Vec::new())
        }
    }
}

/// Replays the same server script on every connection.
struct ScriptedServer {
    script: &'static str,
    connects: Cell<usize>,
    written: Rc<RefCell<Vec<u8>>>,
}

impl ScriptedServer {
    fn new(script: &'static str) -> Self {
        Self {
            script,
            connects: Cell::new(0),
            written: Rc::default(),
        }
    }
}

struct ScriptedSession {
    replies: Cursor<Vec<u8>>,
    written: Rc<RefCell<Vec<u8>>>,
}

impl Read for ScriptedSession {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.replies.read(buf)
    }
}

impl Write for ScriptedSession {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Connect for ScriptedServer {
    type Stream = ScriptedSession;

    fn connect(&self, _host: &str, _port: u16) -> io::Result<ScriptedSession> {
        self.connects.set(self.connects.get() + 1);
        Ok(ScriptedSession {
            replies: Cursor::new(self.script.as_bytes().to_vec()),
            written: Rc::clone(&self.written),
        })
    }
}

struct BrokenInput;

impl Read for BrokenInput {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("terminal went away"))
    }
}

fn session(server: &ScriptedServer, input: &[u8]) -> String {
    let validator = Validator::new(&GoodDomain, server);
    let mut out = Vec::new();
    run_human(&validator, input, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn malformed_address_prints_error_and_prompts_again() {
    let server = ScriptedServer::new(ACCEPTS_RCPT);

    let text = session(&server, b"not-an-email\n");

    assert_eq!(
        text,
        format!("{BANNER}Error: invalid email: invalid email format\n{PROMPT}")
    );
    assert_eq!(server.connects.get(), 0);
}

#[test]
fn rejected_recipient_prints_records_then_error() {
    let server = ScriptedServer::new(REJECTS_RCPT);

    let text = session(&server, b"user@good-domain.example\r\n");

    assert_eq!(
        text,
        format!(
            "{BANNER}{GOOD_DOMAIN_BLOCK}\
             Error: SMTP validation failed: RCPT TO rejected: 550 5.1.1 no such user\n\
             {PROMPT}"
        )
    );
    let written = String::from_utf8(server.written.borrow().clone()).unwrap();
    assert!(written.contains("RCPT TO:<user@good-domain.example>\r\n"));
    assert!(written.ends_with("QUIT\r\n"));
}

#[test]
fn accepted_recipient_prints_success() {
    let server = ScriptedServer::new(ACCEPTS_RCPT);

    let text = session(&server, b"user@good-domain.example");

    assert_eq!(
        text,
        format!("{BANNER}{GOOD_DOMAIN_BLOCK}Email validated successfully!\n{PROMPT}")
    );
    assert_eq!(server.connects.get(), 1);
}

#[test]
fn empty_input_prints_banner_only() {
    let server = ScriptedServer::new(ACCEPTS_RCPT);

    assert_eq!(session(&server, b""), BANNER);
}

#[test]
fn non_utf8_line_is_rejected_and_loop_continues() {
    let server = ScriptedServer::new(ACCEPTS_RCPT);

    let text = session(&server, b"caf\xe9@good-domain.example\nnot-an-email\n");

    let error = "Error: invalid email: invalid email format\n";
    assert_eq!(text, format!("{BANNER}{error}{PROMPT}{error}{PROMPT}"));
    assert_eq!(server.connects.get(), 0);
}

#[test]
fn read_error_ends_loop_cleanly() {
    let server = ScriptedServer::new(ACCEPTS_RCPT);
    let validator = Validator::new(&GoodDomain, &server);
    let mut out = Vec::new();

    run_human(&validator, BufReader::new(BrokenInput), &mut out).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), BANNER);
}

#[test]
fn next_line_strips_one_line_ending() {
    let mut input: &[u8] = b"a@b.example\r\nsecond\n\r\nlast";
    assert_eq!(next_line(&mut input).as_deref(), Some("a@b.example"));
    assert_eq!(next_line(&mut input).as_deref(), Some("second"));
    assert_eq!(next_line(&mut input).as_deref(), Some(""));
    assert_eq!(next_line(&mut input).as_deref(), Some("last"));
    assert_eq!(next_line(&mut input), None);
}
