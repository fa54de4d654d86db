use std::convert;
use std::error;
use std::fmt;
use std::io;
use std::str;

#[derive(Debug)]
pub enum Error {
    MalformedUrl(String),
    ConnectionFailed(String),
    MalformedResponse(str::Utf8Error),
    UnsupportedMethod(String),
    InvalidBufferSize(usize),
    IoError(io::Error),
}

pub type Result<R> = std::result::Result<R, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::MalformedUrl(url) => {
                write!(f, "url {} does not match url specifications", url)
            }
            Error::ConnectionFailed(addr) => write!(f, "could not connect to {}", addr),
            Error::MalformedResponse(e) => write!(f, "response is not valid utf-8: {}", e),
            Error::UnsupportedMethod(m) => write!(f, "unsupported method {}", m),
            Error::InvalidBufferSize(n) => write!(f, "invalid buffer size {}", n),
            Error::IoError(e) => write!(f, "{}", e),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::MalformedUrl(_) => None,
            Error::ConnectionFailed(_) => None,
            Error::MalformedResponse(e) => Some(e),
            Error::UnsupportedMethod(_) => None,
            Error::InvalidBufferSize(_) => None,
            Error::IoError(e) => Some(e),
        }
    }
}

impl convert::From<str::Utf8Error> for Error {
    fn from(e: str::Utf8Error) -> Self {
        Error::MalformedResponse(e)
    }
}

impl convert::From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::IoError(e)
    }
}

#[cfg(test)]
mod tests {
    use super::Error;
    use std::error::Error as _;
    use std::string::ToString;

    #[test]
    fn malformed_url_names_input() {
        let e = Error::MalformedUrl("::nope".into());
        assert_eq!(&e.to_string(), "url ::nope does not match url specifications");
        assert!(e.source().is_none());
    }

    #[test]
    fn utf8_error_converts() {
        let bytes = [0xffu8, 0xfe];
        let e: Error = std::str::from_utf8(&bytes).unwrap_err().into();
        assert!(matches!(e, Error::MalformedResponse(_)));
        assert!(e.source().is_some());
    }
}
