use std::fmt;

use super::{CallNowError, HttpMethod, Transport};
use crate::domain::{
    CallDetails, CallUpdateStatus, CreateCall, MergeCalls, OutboundNumber, RawPhoneNumber, Sid,
    UpdateCall,
};
use crate::transport::{
    decode_call_details, decode_created_sid, encode_create_call_form, encode_merge_calls_form,
    encode_update_call_form,
};

const CALLS_PATH: &str = "calls";
const MERGE_PATH: &str = "merge";

#[derive(Clone)]
/// Call operations of a [`Client`](super::Client).
pub struct CallsResource {
    transport: Transport,
    from: OutboundNumber,
}

impl CallsResource {
    pub(super) fn new(transport: Transport, from: OutboundNumber) -> Self {
        Self { transport, from }
    }

    /// Number used as `from` when a request does not set its own.
    pub fn from_number(&self) -> &OutboundNumber {
        &self.from
    }

    /// Place a direct call through `POST /calls`.
    ///
    /// Errors:
    /// - [`CallNowError::Api`] for non-2xx HTTP responses,
    /// - [`CallNowError::MalformedResponse`] when the response has no `sid`.
    pub async fn create(&self, request: CreateCall) -> Result<Call, CallNowError> {
        let params = encode_create_call_form(&request, &self.from);
        let response = self
            .transport
            .request(HttpMethod::Post, &[CALLS_PATH], params)
            .await?;

        Ok(Call {
            sid: decode_created_sid(&response)?,
            from: self.resolve_from(request.from_number()),
            kind: CallKind::Direct {
                to: request.to().clone(),
                auto_hang: request.is_auto_hang(),
            },
            transport: self.transport.clone(),
        })
    }

    /// Bridge two numbers into one session through `POST /calls/merge`.
    pub async fn merge(&self, request: MergeCalls) -> Result<Call, CallNowError> {
        let params = encode_merge_calls_form(&request, &self.from);
        let response = self
            .transport
            .request(HttpMethod::Post, &[CALLS_PATH, MERGE_PATH], params)
            .await?;

        Ok(Call {
            sid: decode_created_sid(&response)?,
            from: self.resolve_from(request.from_number()),
            kind: CallKind::Merge {
                phone_1: request.phone_1().clone(),
                phone_2: request.phone_2().clone(),
            },
            transport: self.transport.clone(),
        })
    }

    /// Change the status of a call (`POST /calls/{sid}`), e.g. to hang it up.
    pub async fn update(&self, request: UpdateCall) -> Result<CallDetails, CallNowError> {
        update_call(&self.transport, request).await
    }

    /// Read the current state of a call by sid (`GET /calls/{sid}`).
    pub async fn fetch(&self, sid: &Sid) -> Result<CallDetails, CallNowError> {
        fetch_call(&self.transport, sid).await
    }

    fn resolve_from(&self, from: Option<&OutboundNumber>) -> OutboundNumber {
        from.cloned().unwrap_or_else(|| self.from.clone())
    }

    #[cfg(test)]
    pub(super) fn transport(&self) -> &Transport {
        &self.transport
    }
}

async fn fetch_call(transport: &Transport, sid: &Sid) -> Result<CallDetails, CallNowError> {
    let response = transport
        .request(HttpMethod::Get, &[CALLS_PATH, sid.as_str()], Vec::new())
        .await?;
    Ok(decode_call_details(response)?)
}

async fn update_call(
    transport: &Transport,
    request: UpdateCall,
) -> Result<CallDetails, CallNowError> {
    let params = encode_update_call_form(&request);
    let response = transport
        .request(HttpMethod::Post, &[CALLS_PATH, request.sid().as_str()], params)
        .await?;
    Ok(decode_call_details(response)?)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallKind {
    /// One outbound call. `auto_hang = true` ends it once the callee picks up.
    Direct { to: RawPhoneNumber, auto_hang: bool },
    /// Two numbers bridged into one session.
    Merge {
        phone_1: RawPhoneNumber,
        phone_2: RawPhoneNumber,
    },
}

#[derive(Clone)]
/// A call accepted by CallNowUSA.
pub struct Call {
    sid: Sid,
    from: OutboundNumber,
    kind: CallKind,
    transport: Transport,
}

impl Call {
    pub fn sid(&self) -> &Sid {
        &self.sid
    }

    pub fn from_number(&self) -> &OutboundNumber {
        &self.from
    }

    pub fn kind(&self) -> &CallKind {
        &self.kind
    }

    /// Re-read this call from the server. `self` is left untouched.
    pub async fn fetch(&self) -> Result<CallDetails, CallNowError> {
        fetch_call(&self.transport, &self.sid).await
    }

    /// Change the status of this call; see [`CallsResource::update`].
    pub async fn update(&self, status: CallUpdateStatus) -> Result<CallDetails, CallNowError> {
        update_call(&self.transport, UpdateCall::new(self.sid.clone(), status)).await
    }
}

impl fmt::Debug for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Call")
            .field("sid", &self.sid)
            .field("from", &self.from)
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
