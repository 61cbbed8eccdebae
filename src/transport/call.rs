use serde::Deserialize;

use super::scalar::TransportScalar;
use super::{DecodeError, JsonResponse, decode_created_sid, lowercase_status, push_param};
use crate::domain::{
    CallDetails, CallUpdateStatus, CreateCall, MergeCalls, OutboundNumber, RawPhoneNumber,
    UpdateCall,
};

#[derive(Debug, Clone, Deserialize)]
struct CallJsonDetails {
    #[serde(default)]
    status: Option<TransportScalar>,
    #[serde(default)]
    duration: Option<TransportScalar>,
}

/// Form parameters for `POST /calls`.
pub fn encode_create_call_form(
    request: &CreateCall,
    from: &OutboundNumber,
) -> Vec<(String, String)> {
    let from = request.from_number().unwrap_or(from);

    let mut params = Vec::<(String, String)>::new();
    push_param(&mut params, RawPhoneNumber::FIELD, request.to().raw());
    push_param(&mut params, OutboundNumber::FIELD, from.as_str());
    push_param(
        &mut params,
        CreateCall::AUTO_HANG_FIELD,
        if request.is_auto_hang() { "true" } else { "false" },
    );
    params
}

/// Form parameters for `POST /calls/merge`.
pub fn encode_merge_calls_form(
    request: &MergeCalls,
    from: &OutboundNumber,
) -> Vec<(String, String)> {
    let from = request.from_number().unwrap_or(from);

    let mut params = Vec::<(String, String)>::new();
    push_param(&mut params, MergeCalls::PHONE_1_FIELD, request.phone_1().raw());
    push_param(&mut params, MergeCalls::PHONE_2_FIELD, request.phone_2().raw());
    push_param(&mut params, OutboundNumber::FIELD, from.as_str());
    params
}

/// Form parameters for `POST /calls/{sid}`. Unlike creation, `from` is only sent when set.
pub fn encode_update_call_form(request: &UpdateCall) -> Vec<(String, String)> {
    let mut params = Vec::<(String, String)>::new();
    push_param(
        &mut params,
        CallUpdateStatus::FIELD,
        request.status().as_str(),
    );
    if let Some(from) = request.from_number() {
        push_param(&mut params, OutboundNumber::FIELD, from.as_str());
    }
    if let Some(to) = request.to_number() {
        push_param(&mut params, RawPhoneNumber::FIELD, to.raw());
    }
    params
}

/// `duration` keeps the raw token of a JSON number. Typed fields of an unexpected JSON type
/// are left empty; the values are still available in `fields`.
pub fn decode_call_details(response: JsonResponse) -> Result<CallDetails, DecodeError> {
    let sid = decode_created_sid(&response)?;
    let parsed: CallJsonDetails = serde_json::from_str(response.body())?;

    Ok(CallDetails {
        sid,
        status: lowercase_status(parsed.status.and_then(TransportScalar::into_text)),
        duration: parsed
            .duration
            .and_then(TransportScalar::into_text_or_number),
        fields: response.into_object(),
    })
}
