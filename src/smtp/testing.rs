use std::cell::{Cell, RefCell};
use std::io::{self, Cursor, Read, Write};
use std::rc::Rc;

use super::Connect;

/// Bytes written by the client, shared with the test after the stream moves.
#[derive(Debug, Clone, Default)]
pub(crate) struct Written(Rc<RefCell<Vec<u8>>>);

impl Written {
    pub(crate) fn text(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    /// Client commands without their CRLF terminators.
    pub(crate) fn commands(&self) -> Vec<String> {
        self.text()
            .split("\r\n")
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// A fake server connection: reads come from a fixed script, writes are kept.
#[derive(Debug)]
pub(crate) struct ScriptedStream {
    input: Cursor<Vec<u8>>,
    written: Written,
}

impl ScriptedStream {
    pub(crate) fn new(script: &str) -> (Self, Written) {
        let written = Written::default();
        let stream = Self {
            input: Cursor::new(script.as_bytes().to_vec()),
            written: written.clone(),
        };
        (stream, written)
    }
}

impl Read for ScriptedStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.input.read(buf)
    }
}

impl Write for ScriptedStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Hands out one [`ScriptedStream`] per connection and remembers the targets.
pub(crate) struct ScriptedConnector {
    script: String,
    refuse: bool,
    written: Written,
    targets: RefCell<Vec<(String, u16)>>,
    connects: Cell<usize>,
}

impl ScriptedConnector {
    pub(crate) fn new(script: &str) -> Self {
        Self {
            script: script.to_string(),
            refuse: false,
            written: Written::default(),
            targets: RefCell::new(Vec::new()),
            connects: Cell::new(0),
        }
    }

    pub(crate) fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::new("")
        }
    }

    pub(crate) fn written(&self) -> &Written {
        &self.written
    }

    pub(crate) fn targets(&self) -> Vec<(String, u16)> {
        self.targets.borrow().clone()
    }

    pub(crate) fn connects(&self) -> usize {
        self.connects.get()
    }
}

impl Connect for ScriptedConnector {
    type Stream = ScriptedStream;

    fn connect(&self, host: &str, port: u16) -> io::Result<ScriptedStream> {
        self.connects.set(self.connects.get() + 1);
        self.targets.borrow_mut().push((host.to_string(), port));
        if self.refuse {
            return Err(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            ));
        }
        let (mut stream, _) = ScriptedStream::new(&self.script);
        stream.written = self.written.clone();
        Ok(stream)
    }
}
