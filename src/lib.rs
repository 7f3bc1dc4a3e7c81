//! # ZeroBounce Client
//! Asynchronous wrapper around the ZeroBounce email validation HTTP API, providing methods to validate addresses and check the account's credit balance from Rust using [`Client`] and [`ClientBuilder`].
//!
//! ## Audience and uses
//! For Rust services that need to check whether an address is deliverable before mailing it: configure with [`ClientBuilder`], call [`Client::validate_email`], then branch on [`EmailValidationResult::is_valid`].
//!
//! ## Runtime requirements
//! Async-only; run inside a Tokio (v1) runtime. HTTP calls use `reqwest` with a 2 second timeout by default.
//!
//! ## Response decoding
//! The service is loose about JSON types: numbers sometimes arrive quoted and booleans as text. Responses are decoded into a generic JSON object first and every field is coerced to its target type, falling back to an empty string, `0` or `false`. Decoding only fails when the body is not a JSON object.
//!
//! ## Errors
//! Transport failures and timeouts surface as [`Error::Request`], a zero-length body as [`Error::EmptyResponse`], and a body that is not JSON as [`Error::ResponseParse`]. The service also reports problems inside a successful response through its `error` field, so a returned result may still carry an error: check [`EmailValidationResult::error_message`]. The crate-wide [`Result`] alias wraps these errors.
//!
//! ## Logging
//! Request and response events are emitted through `tracing` at `debug` level, with `warn` for non-success statuses and empty bodies. The API key is never logged. Install a subscriber in your application to see them.
//!
//! ## Example
//! ```no_run
//! use zerobounce_client::Client;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), zerobounce_client::Error> {
//!     let client = Client::new("my-api-key")?;
//!
//!     let result = client.validate_email("flowerjill@aol.com").await?;
//!     if let Some(message) = result.error_message() {
//!         eprintln!("service error: {message}");
//!     } else {
//!         println!("{} is {}", result.address, result.status);
//!     }
//!
//!     let balance = client.get_credit_balance().await?;
//!     println!("Credits left: {}", balance.credits_balance()?);
//!     Ok(())
//! }
//! ```

mod client;
mod coerce;
mod error;
mod models;

pub use client::{API_KEY_ENV, BASE_URL_ENV, Client, ClientBuilder, Endpoint};
pub use error::Error;
pub use models::{CREDITS_UNAVAILABLE, CreditBalanceResult, EmailValidationResult};

/// Result type alias for ZeroBounce operations.
///
/// This is equivalent to `std::result::Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
