//! Parsing of the loose `[http://]host[:port][path][?query]` form accepted on the command line.
//!
//! Any part but the host may be left out, and gets a default:
//!
//! ```rust
//! use http_peek::url::Url;
//!
//! let url: Url = "www.example.com".parse().unwrap();
//! assert_eq!(url.scheme(), "http");
//! assert_eq!(url.port(), "80");
//! assert_eq!(url.path(), "/");
//! assert_eq!(url.query(), "");
//! ```
//!
//! The scan is anchored at the start of the input but does not have to consume all of it. Whatever
//! follows the last recognized part (a `#fragment`, a stray space in the path) is dropped.
use crate::error::{Error, Result};
use std::fmt;
use std::str;

pub const DEFAULT_SCHEME: &str = "http";
pub const DEFAULT_PORT: &str = "80";
pub const DEFAULT_PATH: &str = "/";

fn is_host_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "$-.+!*'(),%".contains(c)
}

fn is_path_char(c: char) -> bool {
    is_host_char(c) || "/;&=".contains(c)
}

fn is_query_char(c: char) -> bool {
    is_path_char(c) || c == ' ' || c == '?'
}

struct Scanner<'a> {
    s: &'a str,
    position: usize,
}

impl<'a> Scanner<'a> {
    fn new(s: &'a str) -> Self {
        Scanner { s, position: 0 }
    }

    fn remaining(&self) -> &'a str {
        &self.s[self.position..]
    }

    fn eat(&mut self, expected: &str) -> bool {
        if self.remaining().starts_with(expected) {
            self.position += expected.len();
            true
        } else {
            false
        }
    }

    /// Consumes the longest non-empty run of characters matching `pred`.
    fn take_while<F: Fn(char) -> bool>(&mut self, pred: F) -> Option<&'a str> {
        let remaining = self.remaining();
        let end = remaining.find(|c: char| !pred(c)).unwrap_or(remaining.len());
        self.position += end;
        if end == 0 {
            None
        } else {
            Some(&remaining[..end])
        }
    }
}

#[cfg(test)]
mod scanner_tests {
    use super::Scanner;

    #[test]
    fn eat() {
        let mut scanner = Scanner::new("abcdef");
        assert!(scanner.eat("abc"));
        assert!(!scanner.eat("abc"));
        assert!(scanner.eat("def"));
        assert_eq!(scanner.remaining(), "");
    }

    #[test]
    fn take_while() {
        let mut scanner = Scanner::new("123abc");
        assert_eq!(scanner.take_while(|c| c.is_ascii_digit()), Some("123"));
        assert_eq!(scanner.take_while(|c| c.is_ascii_digit()), None);
        assert_eq!(scanner.remaining(), "abc");
    }

    #[test]
    fn take_while_to_end() {
        let mut scanner = Scanner::new("abc");
        assert_eq!(scanner.take_while(|c| c.is_ascii_alphabetic()), Some("abc"));
        assert_eq!(scanner.take_while(|_| true), None);
    }
}

/// A parsed url. Every part is kept as the exact substring of the input it came from, or as the
/// default when the input left it out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url {
    input: String,
    scheme: String,
    host: String,
    port: String,
    path: String,
    query: String,
}

impl Url {
    pub fn parse(input: &str) -> Result<Self> {
        let mut scanner = Scanner::new(input);

        // A bare "http" prefix is part of the host unless the separator follows it.
        let scheme = if scanner.remaining().starts_with("http://") {
            scanner.eat("http");
            Some("http")
        } else {
            None
        };
        scanner.eat("://");

        // Digits and dots are host characters, so dotted-quad addresses take this path too.
        let host = scanner
            .take_while(is_host_char)
            .ok_or_else(|| Error::MalformedUrl(input.into()))?;

        let port = if scanner.eat(":") {
            scanner.take_while(|c| c.is_ascii_digit())
        } else {
            None
        };
        let path = scanner.take_while(is_path_char);
        let query = if scanner.eat("?") {
            scanner.take_while(is_query_char)
        } else {
            None
        };

        Ok(Url {
            input: input.into(),
            scheme: scheme.unwrap_or(DEFAULT_SCHEME).into(),
            host: host.into(),
            port: port.unwrap_or(DEFAULT_PORT).into(),
            path: path.unwrap_or(DEFAULT_PATH).into(),
            query: query.unwrap_or("").into(),
        })
    }

    /// The string this url was parsed from.
    pub fn as_str(&self) -> &str {
        &self.input
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> &str {
        &self.port
    }

    /// The port as a number. The scanner only checks for digits, so this fails for ports that do
    /// not fit in 16 bits.
    pub fn port_number(&self) -> Result<u16> {
        self.port
            .parse()
            .map_err(|_| Error::MalformedUrl(self.input.clone()))
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// What goes between the method and the version on the request line.
    pub fn request_target(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }
}

impl str::FromStr for Url {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Url::parse(s)
    }
}

impl TryFrom<&str> for Url {
    type Error = Error;

    fn try_from(s: &str) -> Result<Self> {
        Url::parse(s)
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}://{}:{}{}",
            self.scheme,
            self.host,
            self.port,
            self.request_target()
        )
    }
}
