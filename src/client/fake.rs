use std::collections::VecDeque;
use std::error::Error as StdError;
use std::sync::{Arc, Mutex};

use url::Url;

use super::{BoxFuture, Client, Credentials, HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::domain::OutboundNumber;

#[derive(Debug, Clone)]
pub(crate) struct RecordedRequest {
    pub method: HttpMethod,
    pub url: String,
    pub params: Vec<(String, String)>,
    pub account_sid: String,
    pub auth_token: String,
}

#[derive(Debug)]
enum FakeReply {
    Response { status: u16, body: String },
    Failure(String),
}

/// Records every request and answers from a queue of canned replies.
///
/// The last reply is repeated once the queue is down to one entry.
#[derive(Debug, Clone)]
pub(crate) struct FakeTransport {
    state: Arc<Mutex<FakeTransportState>>,
}

#[derive(Debug)]
struct FakeTransportState {
    requests: Vec<RecordedRequest>,
    replies: VecDeque<FakeReply>,
}

impl FakeTransport {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self::with_reply(FakeReply::Response {
            status,
            body: body.into(),
        })
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_reply(FakeReply::Failure(message.into()))
    }

    fn with_reply(reply: FakeReply) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeTransportState {
                requests: Vec::new(),
                replies: VecDeque::from([reply]),
            })),
        }
    }

    /// Queue another response after the ones already configured.
    pub fn then(self, status: u16, body: impl Into<String>) -> Self {
        self.state
            .lock()
            .unwrap()
            .replies
            .push_back(FakeReply::Response {
                status,
                body: body.into(),
            });
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn single_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected one request, got: {requests:?}");
        requests.into_iter().next().unwrap()
    }
}

impl HttpTransport for FakeTransport {
    fn send<'a>(
        &'a self,
        request: HttpRequest<'a>,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let mut state = self.state.lock().unwrap();
            state.requests.push(RecordedRequest {
                method: request.method,
                url: request.url.to_string(),
                params: request.params,
                account_sid: request.credentials.account_sid.as_str().to_owned(),
                auth_token: request.credentials.auth_token.as_str().to_owned(),
            });

            let popped = if state.replies.len() > 1 {
                state.replies.pop_front()
            } else {
                None
            };
            let reply = popped.as_ref().or(state.replies.front());
            let result: Result<HttpResponse, Box<dyn StdError + Send + Sync>> = match reply {
                Some(FakeReply::Response { status, body }) => Ok(HttpResponse {
                    status: *status,
                    body: body.clone(),
                }),
                Some(FakeReply::Failure(message)) => Err(message.clone().into()),
                None => Err("no reply configured".into()),
            };
            drop(state);
            result
        })
    }
}

pub(crate) fn make_client(transport: FakeTransport) -> Client {
    make_client_from(transport, OutboundNumber::Default)
}

pub(crate) fn make_client_from(transport: FakeTransport, from: OutboundNumber) -> Client {
    Client::with_http(
        Credentials::new("SID_1", "AUTH_1").unwrap(),
        from,
        Url::parse("https://example.invalid/v1").unwrap(),
        Arc::new(transport),
    )
}
