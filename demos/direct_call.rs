use std::io;

use callnowusa::{Client, CreateCall};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let to = std::env::var("CALLNOWUSA_TO").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "CALLNOWUSA_TO environment variable is required",
        )
    })?;
    let auto_hang = std::env::var("CALLNOWUSA_AUTO_HANG").is_ok_and(|value| value == "true");

    let client = Client::from_env()?;
    let call = client
        .calls()
        .create(CreateCall::new(to)?.auto_hang(auto_hang))
        .await?;
    println!("sid: {}", call.sid());

    let details = call.fetch().await?;
    println!(
        "sid: {}, status: {:?}, duration: {:?}",
        details.sid, details.status, details.duration
    );

    Ok(())
}
