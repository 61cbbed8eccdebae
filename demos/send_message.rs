use std::io;

use callnowusa::{Client, CreateMessage};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let to = std::env::var("CALLNOWUSA_TO").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "CALLNOWUSA_TO environment variable is required",
        )
    })?;
    let body = std::env::var("CALLNOWUSA_MESSAGE")
        .unwrap_or_else(|_| "Hello from the callnowusa demo.".to_owned());

    let client = Client::from_env()?;
    let message = client
        .messages()
        .create(CreateMessage::new(body, to)?)
        .await?;
    println!("sid: {}", message.sid());

    let details = message.fetch().await?;
    println!("sid: {}, status: {:?}", details.sid, details.status);

    Ok(())
}
