//! Typed Rust client for the CallNowUSA SMS and calling HTTP API.
//!
//! The crate has a domain layer of validated types, a transport layer for
//! wire-format details, and a small client layer that sends one authenticated
//! request per operation.
//!
//! ```rust,no_run
//! use callnowusa::{CallUpdateStatus, Client, CreateCall, CreateMessage, MergeCalls};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), callnowusa::CallNowError> {
//!     let client = Client::new("AC...", "token", "default")?;
//!
//!     let message = client
//!         .messages()
//!         .create(CreateMessage::new("hello", "+19876543210")?)
//!         .await?;
//!     println!("message status: {:?}", message.fetch().await?.status);
//!
//!     let call = client
//!         .calls()
//!         .create(CreateCall::new("+19876543210")?.auto_hang(false))
//!         .await?;
//!     call.update(CallUpdateStatus::Completed).await?;
//!
//!     let merged = client
//!         .calls()
//!         .merge(MergeCalls::new("+19876543210", "+15550001111")?)
//!         .await?;
//!     println!("merged call: {}", merged.sid());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
mod transport;

pub use client::{
    ACCOUNT_SID_ENV, AUTH_TOKEN_ENV, BASE_URL_ENV, Call, CallKind, CallNowError, CallsResource,
    Client, ClientBuilder, Credentials, Message, MessagesResource, NUMBER_ENV,
};
pub use domain::{
    AccountSid, AuthToken, CallDetails, CallUpdateStatus, CreateCall, CreateMessage, MergeCalls,
    MessageBody, MessageDetails, OutboundNumber, PhoneNumber, RawPhoneNumber, Sid, UpdateCall,
    ValidationError,
};
pub use transport::DecodeError;
