//! Sends one request over a fresh connection and reads back the reply.
//!
//! ```rust,no_run
//! use http_peek::client::HttpClient;
//! use http_peek::protocol::HttpMethod;
//! use http_peek::url::Url;
//!
//! # fn main() -> http_peek::error::Result<()> {
//! let url = Url::parse("www.example.com")?;
//! let response = HttpClient::new().request(&url, HttpMethod::Get)?;
//! println!("{}", response.status());
//! # Ok(())
//! # }
//! ```
//!
//! By default only a single read is made from the socket, into a buffer of
//! `RequestOptions::buffer_size` bytes. Anything the server sends past that is never read, so
//! large replies come back truncated. `ReadMode::UntilClosed` reads until the server closes the
//! connection instead.
//!
//! Without a timeout every socket operation blocks for as long as the remote end takes.
use crate::error::{Error, Result};
use crate::protocol::{HttpMethod, HttpRequest};
use crate::response::RawResponse;
use crate::url::Url;
use log::{debug, warn};
use std::fmt;
use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

pub const DEFAULT_BUFFER_SIZE: usize = 4096;
/// Largest `buffer_size` a request accepts.
pub const MAX_BUFFER_SIZE: usize = 1 << 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadMode {
    /// One read of at most `buffer_size` bytes.
    SingleChunk,
    /// Read until the peer closes the connection.
    UntilClosed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOptions {
    pub buffer_size: usize,
    pub read_mode: ReadMode,
    pub timeout: Option<Duration>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        RequestOptions {
            buffer_size: DEFAULT_BUFFER_SIZE,
            read_mode: ReadMode::SingleChunk,
            timeout: None,
        }
    }
}

/// Turns a host and port into connected streams.
pub trait StreamConnector {
    type Stream: io::Read + io::Write;
    type Addr: fmt::Debug;

    /// Candidate addresses, in the order they should be tried.
    fn resolve(&self, host: &str, port: u16) -> io::Result<Vec<Self::Addr>>;
    fn connect(&self, addr: &Self::Addr) -> io::Result<Self::Stream>;
}

/// Connects over TCP to whatever the system resolver returns, IPv4 and IPv6 alike.
#[derive(Debug, Clone, Default)]
pub struct TcpConnector {
    timeout: Option<Duration>,
}

impl TcpConnector {
    pub fn new() -> Self {
        TcpConnector::default()
    }

    /// Bounds connecting, and every read and write on the connected stream, by `timeout`.
    pub fn with_timeout(timeout: Option<Duration>) -> Self {
        TcpConnector { timeout }
    }
}

impl StreamConnector for TcpConnector {
    type Stream = TcpStream;
    type Addr = SocketAddr;

    fn resolve(&self, host: &str, port: u16) -> io::Result<Vec<SocketAddr>> {
        Ok((host, port).to_socket_addrs()?.collect())
    }

    fn connect(&self, addr: &SocketAddr) -> io::Result<TcpStream> {
        let stream = match self.timeout {
            Some(timeout) => TcpStream::connect_timeout(addr, timeout)?,
            None => TcpStream::connect(addr)?,
        };
        stream.set_read_timeout(self.timeout)?;
        stream.set_write_timeout(self.timeout)?;
        Ok(stream)
    }
}

pub struct HttpClient<C: StreamConnector = TcpConnector> {
    connector: C,
    options: RequestOptions,
}

impl HttpClient<TcpConnector> {
    pub fn new() -> Self {
        HttpClient::with_options(RequestOptions::default())
    }

    pub fn with_options(options: RequestOptions) -> Self {
        HttpClient {
            connector: TcpConnector::with_timeout(options.timeout),
            options,
        }
    }
}

impl Default for HttpClient<TcpConnector> {
    fn default() -> Self {
        HttpClient::new()
    }
}

impl<C: StreamConnector> HttpClient<C> {
    pub fn with_connector(connector: C, options: RequestOptions) -> Self {
        HttpClient { connector, options }
    }

    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    /// Connects to the first candidate address for `url` that accepts.
    fn open(&self, url: &Url) -> Result<C::Stream> {
        let port = url.port_number()?;
        let unreachable = || Error::ConnectionFailed(format!("{}:{}", url.host(), url.port()));

        let candidates = self.connector.resolve(url.host(), port).map_err(|e| {
            debug!("failed to resolve {}: {}", url.host(), e);
            unreachable()
        })?;
        debug!("{} resolved to {:?}", url.host(), candidates);

        for addr in &candidates {
            match self.connector.connect(addr) {
                Ok(stream) => {
                    debug!("connected to {:?}", addr);
                    return Ok(stream);
                }
                Err(e) => debug!("failed to connect to {:?}: {}", addr, e),
            }
        }
        Err(unreachable())
    }

    fn read_response<R: io::Read>(&self, stream: &mut R) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        match self.options.read_mode {
            ReadMode::SingleChunk => {
                data.resize(self.options.buffer_size, 0);
                let n = loop {
                    match stream.read(&mut data) {
                        Ok(n) => break n,
                        Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                        Err(e) => return Err(e.into()),
                    }
                };
                if n > 0 && n == data.len() {
                    warn!("response filled the {} byte buffer, it may be truncated", n);
                }
                data.truncate(n);
            }
            ReadMode::UntilClosed => {
                stream.read_to_end(&mut data)?;
            }
        }
        debug!("received {} bytes", data.len());
        Ok(data)
    }

    /// Performs the whole exchange for `url`. The connection is dropped before this returns,
    /// whether or not it succeeds.
    pub fn request(&self, url: &Url, method: HttpMethod) -> Result<RawResponse> {
        let buffer_size = self.options.buffer_size;
        if buffer_size == 0 || buffer_size > MAX_BUFFER_SIZE {
            return Err(Error::InvalidBufferSize(buffer_size));
        }
        let mut stream = self.open(url)?;

        let request = HttpRequest::for_url(method, url).to_bytes();
        stream.write_all(&request)?;
        stream.flush()?;
        debug!("sent {} bytes", request.len());

        let data = self.read_response(&mut stream)?;
        drop(stream);
        RawResponse::new(data)
    }
}

/// Fetches `url` with default options.
pub fn get(url: &str) -> Result<RawResponse> {
    let url = Url::parse(url)?;
    HttpClient::new().request(&url, HttpMethod::Get)
}
