//! A tiny HTTP/1.1 client that performs one GET per connection and exposes the raw reply.
//!
//! See the `url` module for the url forms that are accepted.
//! See the `client` module for making the request.
//! See the `response` module for pulling the status line, headers and body out of the reply.
//!
//! ```rust,no_run
//! # fn main() -> http_peek::error::Result<()> {
//! let response = http_peek::client::get("www.example.com")?;
//! println!("{}", response.body());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod protocol;
pub mod response;
pub mod url;
