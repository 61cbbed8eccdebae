//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::{CallUpdateStatus, CreateCall, CreateMessage, MergeCalls, UpdateCall};
pub use response::{CallDetails, MessageDetails};
pub use validation::ValidationError;
pub use value::{
    AccountSid, AuthToken, MessageBody, OutboundNumber, PhoneNumber, RawPhoneNumber, Sid,
};
