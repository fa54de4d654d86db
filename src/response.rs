//! A view over the bytes of a reply.
//!
//! The bytes are decoded once, when the `RawResponse` is built. The status line, header block and
//! body are sliced out of that text each time they are asked for. Nothing is parsed beyond
//! splitting on lines, so a reply cut short by a bounded read still yields whatever lines arrived.
use crate::error::Result;
use std::fmt;
use std::str;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    data: Vec<u8>,
    decoded: String,
}

impl RawResponse {
    /// Fails with `MalformedResponse` when `data` is not UTF-8. A read that stops in the middle of
    /// a multi-byte character counts as not UTF-8.
    pub fn new(data: Vec<u8>) -> Result<Self> {
        let decoded = str::from_utf8(&data)?.to_owned();
        Ok(RawResponse { data, decoded })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn text(&self) -> &str {
        &self.decoded
    }

    /// The first line, or an empty string if nothing was received.
    pub fn status(&self) -> &str {
        self.decoded.lines().next().unwrap_or("")
    }

    /// The lines after the status line up to the first empty line.
    pub fn header(&self) -> String {
        self.decoded
            .lines()
            .take_while(|line| !line.is_empty())
            .skip(1)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Everything after the first empty line.
    pub fn body(&self) -> String {
        self.decoded
            .lines()
            .skip_while(|line| !line.is_empty())
            .skip(1)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for RawResponse {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.decoded)
    }
}
