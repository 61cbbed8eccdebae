use std::fmt;

use super::{CallNowError, HttpMethod, Transport};
use crate::domain::{
    CreateMessage, MessageBody, MessageDetails, OutboundNumber, RawPhoneNumber, Sid,
};
use crate::transport::{decode_created_sid, decode_message_details, encode_create_message_form};

const MESSAGES_PATH: &str = "messages";

#[derive(Clone)]
/// SMS operations of a [`Client`](super::Client).
pub struct MessagesResource {
    transport: Transport,
    from: OutboundNumber,
}

impl MessagesResource {
    pub(super) fn new(transport: Transport, from: OutboundNumber) -> Self {
        Self { transport, from }
    }

    /// Number used as `from` when a request does not set its own.
    pub fn from_number(&self) -> &OutboundNumber {
        &self.from
    }

    /// Send an SMS through `POST /messages`.
    ///
    /// Errors:
    /// - [`CallNowError::Api`] for non-2xx HTTP responses,
    /// - [`CallNowError::MalformedResponse`] when the response has no `sid`.
    pub async fn create(&self, request: CreateMessage) -> Result<Message, CallNowError> {
        let params = encode_create_message_form(&request, &self.from);
        let response = self
            .transport
            .request(HttpMethod::Post, &[MESSAGES_PATH], params)
            .await?;
        let sid = decode_created_sid(&response)?;

        Ok(Message {
            sid,
            body: request.body().clone(),
            to: request.to().clone(),
            from: request
                .from_number()
                .cloned()
                .unwrap_or_else(|| self.from.clone()),
            transport: self.transport.clone(),
        })
    }

    /// Read the current state of a message by sid (`GET /messages/{sid}`).
    pub async fn fetch(&self, sid: &Sid) -> Result<MessageDetails, CallNowError> {
        fetch_message(&self.transport, sid).await
    }

    pub(super) fn transport(&self) -> &Transport {
        &self.transport
    }
}

async fn fetch_message(transport: &Transport, sid: &Sid) -> Result<MessageDetails, CallNowError> {
    let response = transport
        .request(HttpMethod::Get, &[MESSAGES_PATH, sid.as_str()], Vec::new())
        .await?;
    Ok(decode_message_details(response)?)
}

#[derive(Clone)]
/// A message accepted by CallNowUSA.
pub struct Message {
    sid: Sid,
    body: MessageBody,
    to: RawPhoneNumber,
    from: OutboundNumber,
    transport: Transport,
}

impl Message {
    pub fn sid(&self) -> &Sid {
        &self.sid
    }

    pub fn body(&self) -> &MessageBody {
        &self.body
    }

    pub fn to(&self) -> &RawPhoneNumber {
        &self.to
    }

    pub fn from_number(&self) -> &OutboundNumber {
        &self.from
    }

    /// Re-read this message from the server. `self` is left untouched.
    pub async fn fetch(&self) -> Result<MessageDetails, CallNowError> {
        fetch_message(&self.transport, &self.sid).await
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Message")
            .field("sid", &self.sid)
            .field("body", &self.body)
            .field("to", &self.to)
            .field("from", &self.from)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::super::fake::{FakeTransport, make_client, make_client_from};
    use super::*;

    fn assert_param(params: &[(String, String)], key: &str, value: &str) {
        assert!(
            params.iter().any(|(k, v)| k == key && v == value),
            "missing param {key}={value}; got: {params:?}"
        );
    }

    #[tokio::test]
    async fn create_sends_one_post_and_returns_server_sid() {
        let transport = FakeTransport::new(201, r#"{"sid": "SM_abc", "status": "queued"}"#);
        let client = make_client(transport.clone());

        let request = CreateMessage::new("hello", "+19876543210").unwrap();
        let message = client.messages().create(request).await.unwrap();
        assert_eq!(message.sid().as_str(), "SM_abc");
        assert_eq!(message.body().as_str(), "hello");
        assert_eq!(message.to().raw(), "+19876543210");
        assert_eq!(message.from_number(), &OutboundNumber::Default);

        let request = transport.single_request();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "https://example.invalid/v1/messages");
        assert_param(&request.params, "body", "hello");
        assert_param(&request.params, "from", "default");
        assert_param(&request.params, "to", "+19876543210");
    }

    #[tokio::test]
    async fn create_uses_client_number_unless_overridden() {
        let client_number = OutboundNumber::parse("+15550001111").unwrap();
        let transport = FakeTransport::new(200, r#"{"sid": "SM_1"}"#);
        let client = make_client_from(transport.clone(), client_number.clone());

        let message = client
            .messages()
            .create(CreateMessage::new("hi", "+19876543210").unwrap())
            .await
            .unwrap();
        assert_eq!(message.from_number(), &client_number);
        assert_param(&transport.single_request().params, "from", "+15550001111");

        let transport = FakeTransport::new(200, r#"{"sid": "SM_2"}"#);
        let client = make_client_from(transport.clone(), client_number);
        let request = CreateMessage::new("hi", "+19876543210")
            .unwrap()
            .from(OutboundNumber::Default);
        client.messages().create(request).await.unwrap();
        assert_param(&transport.single_request().params, "from", "default");
    }

    #[tokio::test]
    async fn create_without_sid_is_malformed() {
        for status in [200, 201, 202] {
            let transport = FakeTransport::new(status, r#"{"status": "queued"}"#);
            let client = make_client(transport);

            let err = client
                .messages()
                .create(CreateMessage::new("hello", "+19876543210").unwrap())
                .await
                .unwrap_err();
            assert!(
                matches!(err, CallNowError::MalformedResponse(_)),
                "status {status} gave {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn create_passes_api_errors_through() {
        let transport = FakeTransport::new(400, r#"{"error": "Missing required fields"}"#);
        let client = make_client(transport);

        let err = client
            .messages()
            .create(CreateMessage::new("hello", "+19876543210").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, CallNowError::Api { status: 400, .. }));
    }

    #[test]
    fn empty_recipient_fails_before_any_request() {
        let err: CallNowError = CreateMessage::new("hello", "").unwrap_err().into();
        assert!(matches!(err, CallNowError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn fetch_reads_message_by_sid() {
        let transport = FakeTransport::new(200, r#"{"sid": "SM_abc"}"#).then(
            200,
            r#"{"sid": "SM_abc", "status": "Delivered", "price": "0.01"}"#,
        );
        let client = make_client(transport.clone());

        let message = client
            .messages()
            .create(CreateMessage::new("hello", "+19876543210").unwrap())
            .await
            .unwrap();
        let details = message.fetch().await.unwrap();
        assert_eq!(details.sid, *message.sid());
        assert_eq!(details.status.as_deref(), Some("delivered"));
        assert_eq!(
            details.fields.get("price").and_then(|v| v.as_str()),
            Some("0.01")
        );
        assert_eq!(message.sid().as_str(), "SM_abc");

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].method, HttpMethod::Get);
        assert_eq!(requests[1].url, "https://example.invalid/v1/messages/SM_abc");
        assert!(requests[1].params.is_empty());
    }

    #[tokio::test]
    async fn fetch_by_sid_without_message_value() {
        let transport = FakeTransport::new(200, r#"{"sid": "SM_9", "status": "sent"}"#);
        let client = make_client(transport.clone());

        let details = client
            .messages()
            .fetch(&Sid::new("SM_9").unwrap())
            .await
            .unwrap();
        assert_eq!(details.status.as_deref(), Some("sent"));
        assert_eq!(
            transport.single_request().url,
            "https://example.invalid/v1/messages/SM_9"
        );
    }

    #[test]
    fn debug_output_skips_transport() {
        let transport = FakeTransport::new(200, "{}");
        let client = make_client(transport);
        let message = Message {
            sid: Sid::new("SM_1").unwrap(),
            body: MessageBody::new("hello").unwrap(),
            to: RawPhoneNumber::new("+19876543210").unwrap(),
            from: OutboundNumber::Default,
            transport: client.messages().transport().clone(),
        };
        let rendered = format!("{message:?}");
        assert!(rendered.contains("SM_1"));
        assert!(!rendered.contains("AUTH_1"));
    }
}
