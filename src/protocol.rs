use crate::error::{Error, Result};
use crate::url::Url;
use std::fmt;
use std::str;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct HttpVersion {
    major: u32,
    minor: u32,
}

impl HttpVersion {
    pub const HTTP_1_1: HttpVersion = HttpVersion::new(1, 1);

    pub const fn new(major: u32, minor: u32) -> Self {
        HttpVersion { major, minor }
    }
}

impl fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "HTTP/{}.{}", self.major, self.minor)
    }
}


/// Request methods this client can send. Only `GET` exists, so asking for anything else is
/// rejected when the method string is parsed rather than quietly sent as a `GET`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum HttpMethod {
    Get,
}

impl str::FromStr for HttpMethod {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            _ => Err(Error::UnsupportedMethod(s.into())),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
        }
    }
}

#[cfg(test)]
mod http_method_tests {
    use super::HttpMethod;
    use crate::error::Error;
    use std::string::ToString;

    #[test]
    fn parse_success() {
        assert_eq!("GET".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
    }

    #[test]
    fn parse_error() {
        assert!("GE".parse::<HttpMethod>().is_err());
        match "POST".parse::<HttpMethod>() {
            Err(Error::UnsupportedMethod(m)) => assert_eq!(&m, "POST"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn display() {
        assert_eq!(&HttpMethod::Get.to_string(), "GET");
    }
}

#[derive(Debug, PartialEq, Eq)]
struct HttpHeader {
    key: String,
    value: String,
}

/// Header lines in the order they were added.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct HttpHeaders {
    headers: Vec<HttpHeader>,
}

impl HttpHeaders {
    pub fn new() -> Self {
        HttpHeaders::default()
    }

    /// Value of the first header named `key`, compared case-insensitively.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.key.eq_ignore_ascii_case(key))
            .map(|h| h.value.as_str())
    }

    pub fn insert<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.headers.push(HttpHeader {
            key: key.into(),
            value: value.into(),
        });
    }

    /// Number of header lines.
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// True when no header has been added.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

impl fmt::Display for HttpHeaders {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for h in &self.headers {
            write!(f, "{}: {}\r\n", h.key, h.value)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod http_headers_tests {
    use super::HttpHeaders;
    use std::string::ToString;

    #[test]
    fn to_string_keeps_order() {
        let mut headers = HttpHeaders::new();
        headers.insert("c", "d");
        headers.insert("a", "b");
        assert_eq!(&headers.to_string(), "c: d\r\na: b\r\n");
    }

    #[test]
    fn to_string_empty() {
        assert_eq!(&HttpHeaders::new().to_string(), "");
    }

    #[test]
    fn get_ignores_case() {
        let mut headers = HttpHeaders::new();
        headers.insert("Host", "example.com");
        assert_eq!(headers.get("host"), Some("example.com"));
        assert_eq!(headers.get("Accept"), None);
        assert_eq!(headers.len(), 1);
        assert!(!headers.is_empty());
        assert!(HttpHeaders::new().is_empty());
    }
}

/// A request head as it goes on the wire: request line, header lines, then an empty line, all
/// terminated by CRLF. Nothing follows the head.
#[derive(Debug, PartialEq, Eq)]
pub struct HttpRequest {
    method: HttpMethod,
    uri: String,
    version: HttpVersion,
    headers: HttpHeaders,
}

impl HttpRequest {
    pub fn new<S: Into<String>>(method: HttpMethod, uri: S) -> Self {
        HttpRequest {
            method,
            uri: uri.into(),
            version: HttpVersion::HTTP_1_1,
            headers: HttpHeaders::new(),
        }
    }

    /// The request for `url`: its path and query taken verbatim, and a single `Host` header.
    pub fn for_url(method: HttpMethod, url: &Url) -> Self {
        let mut request = HttpRequest::new(method, url.request_target());
        request.add_header("Host", url.host());
        request
    }

    pub fn add_header<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.headers.insert(key, value);
    }

    /// Method written at the start of the request line.
    pub fn method(&self) -> HttpMethod {
        self.method
    }

    /// Request target, exactly as it goes on the request line.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Header lines, in wire order.
    pub fn headers(&self) -> &HttpHeaders {
        &self.headers
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

impl fmt::Display for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {} {}\r\n", self.method, self.uri, self.version)?;
        write!(f, "{}", self.headers)?;
        write!(f, "\r\n")?;
        Ok(())
    }
}
