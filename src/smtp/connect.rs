use std::io::{self, Read, Write};
use std::net::TcpStream;

/// Opens the transport the dialogue runs on.
pub trait Connect {
    type Stream: Read + Write;

    fn connect(&self, host: &str, port: u16) -> io::Result<Self::Stream>;
}

/// Plain TCP with the operating system's default timeouts.
#[derive(Debug, Default, Clone, Copy)]
pub struct TcpConnector;

impl Connect for TcpConnector {
    type Stream = TcpStream;

    fn connect(&self, host: &str, port: u16) -> io::Result<TcpStream> {
        TcpStream::connect((host, port))
    }
}
