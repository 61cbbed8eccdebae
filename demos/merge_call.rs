use std::io;

use callnowusa::{Client, MergeCalls};

fn required(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let phone_1 = required("CALLNOWUSA_PHONE_1")?;
    let phone_2 = required("CALLNOWUSA_PHONE_2")?;

    let client = Client::from_env()?;
    let call = client
        .calls()
        .merge(MergeCalls::new(phone_1, phone_2)?)
        .await?;

    let details = call.fetch().await?;
    println!(
        "sid: {}, status: {:?}, duration: {:?}",
        details.sid, details.status, details.duration
    );

    Ok(())
}
