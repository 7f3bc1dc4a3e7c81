//! Validate the addresses given on the command line and print the balance.
//!
//! ```text
//! ZEROBOUNCE_API_KEY=... cargo run --example validate -- valid@example.com
//! ```

use zerobounce_client::Client;

#[tokio::main]
async fn main() -> Result<(), zerobounce_client::Error> {
    let client = Client::from_env()?;

    for email in std::env::args().skip(1) {
        let result = client.validate_email(&email).await?;
        match result.error_message() {
            Some(message) => println!("{email}: error: {message}"),
            None if result.is_valid() => println!("{email}: valid"),
            None => println!("{email}: {} {}", result.status, result.sub_status),
        }
    }

    let balance = client.get_credit_balance().await?;
    println!("Credits left: {}", balance.credits_balance()?);
    Ok(())
}
