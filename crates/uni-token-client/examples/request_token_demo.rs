//! Token Request Demo
//!
//! Requests an OpenAI-compatible credential from the UniToken service,
//! bootstrapping the service on first run. Persists the granted token next to
//! the executable so a second run exercises the returning-app path.
//!
//! # Usage
//!
//! ```bash
//! RUST_LOG=debug cargo run --example request_token_demo
//! ```

use anyhow::Result;
use secrecy::ExposeSecret;

use uni_token_client::request_openai_token;

const TOKEN_FILE: &str = "uni-token.key";

fn load_saved_token() -> Option<String> {
    std::fs::read_to_string(TOKEN_FILE).ok()
}

fn save_token(token: &str) -> Result<()> {
    std::fs::write(TOKEN_FILE, token)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let saved = load_saved_token();
    let access = request_openai_token(
        "Example App",
        "This is an example application.",
        saved.as_deref(),
    )
    .await?;

    let Some(api_key) = &access.api_key else {
        println!("User rejected the request");
        return Ok(());
    };
    save_token(api_key.expose_secret())?;

    println!("Gateway base URL: {}", access.base_url);
    println!("Credential granted; point any OpenAI-compatible SDK at the gateway.");

    Ok(())
}
