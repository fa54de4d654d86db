use std::process;
use std::time::Duration;

use clap::builder::TypedValueParser as _;
use clap::{ArgAction, Parser};
use http_peek::client::{
    HttpClient, ReadMode, RequestOptions, DEFAULT_BUFFER_SIZE, MAX_BUFFER_SIZE,
};
use http_peek::error::{Error, Result};
use http_peek::protocol::HttpMethod;
use http_peek::url::Url;

/// Send one HTTP/1.1 GET request and print parts of the raw reply.
#[derive(Parser, Debug)]
#[command(name = "http_peek", version)]
struct Options {
    /// [http://]host[:port][/path][?query]
    url: String,

    /// Print the status line
    #[arg(short = 's', long = "status")]
    status: bool,

    /// Print the header lines
    #[arg(short = 'H', long = "header")]
    header: bool,

    /// Print the body (the default)
    #[arg(short = 'B', long = "body")]
    body: bool,

    /// Do not print the body
    #[arg(long = "no-body", conflicts_with = "body")]
    no_body: bool,

    /// Request method; only GET is supported
    #[arg(short = 'X', long = "method", default_value = "GET")]
    method: String,

    /// Size of the single read made from the socket
    #[arg(
        long = "buffer-size",
        default_value_t = DEFAULT_BUFFER_SIZE,
        value_parser = clap::value_parser!(u64)
            .range(1..=MAX_BUFFER_SIZE as u64)
            .try_map(|n: u64| usize::try_from(n))
    )]
    buffer_size: usize,

    /// Keep reading until the server closes the connection
    #[arg(long = "read-to-end")]
    read_to_end: bool,

    /// Give up on connecting, sending or receiving after this many seconds
    #[arg(long = "timeout", value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Log more about what is going on; repeat for more detail
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

impl Options {
    fn request_options(&self) -> RequestOptions {
        RequestOptions {
            buffer_size: self.buffer_size,
            read_mode: if self.read_to_end {
                ReadMode::UntilClosed
            } else {
                ReadMode::SingleChunk
            },
            timeout: self.timeout.map(Duration::from_secs),
        }
    }

    fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}

fn run(opts: &Options) -> Result<()> {
    let method: HttpMethod = opts.method.parse()?;
    let url = Url::parse(&opts.url)?;
    log::info!("requesting {}", url);

    let response = HttpClient::with_options(opts.request_options()).request(&url, method)?;

    if opts.status {
        println!("{}", response.status());
    }
    if opts.header {
        println!("{}", response.header());
    }
    if opts.body || !opts.no_body {
        println!("{}", response.body());
    }
    Ok(())
}

fn main() {
    let opts = Options::parse();

    env_logger::Builder::new()
        .filter_level(opts.log_level())
        .parse_default_env()
        .init();

    match run(&opts) {
        Ok(()) => {}
        Err(Error::ConnectionFailed(addr)) => {
            log::debug!("no address for {} accepted a connection", addr);
            println!("could not open socket");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Options {
        Options::try_parse_from(std::iter::once("http_peek").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let opts = parse(&["www.example.com"]);
        assert_eq!(opts.url, "www.example.com");
        assert!(!opts.status);
        assert!(!opts.header);
        assert!(!opts.no_body);
        assert_eq!(opts.method, "GET");
        assert_eq!(opts.request_options(), RequestOptions::default());
        assert_eq!(opts.log_level(), log::LevelFilter::Warn);
    }

    #[test]
    fn flags() {
        let opts = parse(&[
            "-s",
            "-H",
            "--no-body",
            "--read-to-end",
            "--buffer-size",
            "1024",
            "--timeout",
            "3",
            "-vv",
            "example.com",
        ]);
        assert!(opts.status);
        assert!(opts.header);
        assert!(opts.no_body);
        assert_eq!(
            opts.request_options(),
            RequestOptions {
                buffer_size: 1024,
                read_mode: ReadMode::UntilClosed,
                timeout: Some(Duration::from_secs(3)),
            }
        );
        assert_eq!(opts.log_level(), log::LevelFilter::Debug);
    }

    #[test]
    fn largest_buffer_size() {
        let opts = parse(&["--buffer-size", "1048576", "h"]);
        assert_eq!(opts.buffer_size, MAX_BUFFER_SIZE);
    }

    #[test]
    fn rejects_bad_arguments() {
        let args = |a: &[&'static str]| {
            Options::try_parse_from(std::iter::once("http_peek").chain(a.iter().copied()))
        };
        assert!(args(&[]).is_err());
        assert!(args(&["-B", "--no-body", "h"]).is_err());
        assert!(args(&["--buffer-size", "0", "h"]).is_err());
        assert!(args(&["--buffer-size", "1048577", "h"]).is_err());
        assert!(args(&["--buffer-size", "18446744073709551615", "h"]).is_err());
        assert!(args(&["--buffer-size", "1000000000000", "h"]).is_err());
        assert!(args(&["--timeout", "0", "h"]).is_err());
    }

    #[test]
    fn run_rejects_other_methods() {
        let opts = parse(&["-X", "POST", "127.0.0.1:1"]);
        assert!(matches!(run(&opts), Err(Error::UnsupportedMethod(_))));
    }

    #[test]
    fn run_rejects_malformed_url() {
        let opts = parse(&["/nohost"]);
        match run(&opts) {
            Err(Error::MalformedUrl(url)) => assert_eq!(url, "/nohost"),
            other => panic!("unexpected {:?}", other),
        }
    }
}
