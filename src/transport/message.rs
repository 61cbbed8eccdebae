use serde::Deserialize;

use super::scalar::TransportScalar;
use super::{DecodeError, JsonResponse, decode_created_sid, lowercase_status, push_param};
use crate::domain::{CreateMessage, MessageBody, MessageDetails, OutboundNumber, RawPhoneNumber};

#[derive(Debug, Clone, Deserialize)]
struct MessageJsonDetails {
    #[serde(default)]
    status: Option<TransportScalar>,
}

/// Form parameters for `POST /messages`; `from` is used when the request has no sender override.
pub fn encode_create_message_form(
    request: &CreateMessage,
    from: &OutboundNumber,
) -> Vec<(String, String)> {
    let from = request.from_number().unwrap_or(from);

    let mut params = Vec::<(String, String)>::new();
    push_param(&mut params, MessageBody::FIELD, request.body().as_str());
    push_param(&mut params, OutboundNumber::FIELD, from.as_str());
    push_param(&mut params, RawPhoneNumber::FIELD, request.to().raw());
    params
}

/// A `status` that is not a JSON string leaves [`MessageDetails::status`] empty; the value
/// is still available in `fields`.
pub fn decode_message_details(response: JsonResponse) -> Result<MessageDetails, DecodeError> {
    let sid = decode_created_sid(&response)?;
    let parsed: MessageJsonDetails = serde_json::from_str(response.body())?;

    Ok(MessageDetails {
        sid,
        status: lowercase_status(parsed.status.and_then(TransportScalar::into_text)),
        fields: response.into_object(),
    })
}
