mod session;

use crate::api::{Backend, EmailRequest, RawResponse, ShortenRequest};
use crate::error::{ClientError, Result};
use crate::protocol::UserIdentity;
use crate::session::Session;
use std::cell::RefCell;
use std::collections::VecDeque;

/// One request as seen by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Login(String),
    CreateUser(String),
    Shorten(ShortenRequest),
    Resolve(String),
    UserUrls(String),
    AllUrls,
}

enum Reply {
    Response(RawResponse),
    Unreachable,
}

/// Records every call and answers from a queue of canned replies.
#[derive(Default)]
pub(crate) struct FakeBackend {
    replies: RefCell<VecDeque<Reply>>,
    calls: RefCell<Vec<Call>>,
}

impl FakeBackend {
    pub(crate) fn new() -> Self {
        FakeBackend::default()
    }

    pub(crate) fn respond(self, res: RawResponse) -> Self {
        self.replies.borrow_mut().push_back(Reply::Response(res));
        self
    }

    pub(crate) fn unreachable(self) -> Self {
        self.replies.borrow_mut().push_back(Reply::Unreachable);
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: Call) -> Result<RawResponse> {
        self.calls.borrow_mut().push(call);
        match self.replies.borrow_mut().pop_front() {
            Some(Reply::Response(res)) => Ok(res),
            Some(Reply::Unreachable) => Err(transport_error()),
            None => panic!("unexpected request: no reply queued"),
        }
    }
}

impl Backend for FakeBackend {
    fn login(&self, req: &EmailRequest) -> Result<RawResponse> {
        self.record(Call::Login(req.email.clone()))
    }

    fn create_user(&self, req: &EmailRequest) -> Result<RawResponse> {
        self.record(Call::CreateUser(req.email.clone()))
    }

    fn shorten(&self, req: &ShortenRequest) -> Result<RawResponse> {
        self.record(Call::Shorten(req.clone()))
    }

    fn resolve(&self, short_code: &str) -> Result<RawResponse> {
        self.record(Call::Resolve(short_code.to_string()))
    }

    fn user_urls(&self, user_id: &str) -> Result<RawResponse> {
        self.record(Call::UserUrls(user_id.to_string()))
    }

    fn all_urls(&self) -> Result<RawResponse> {
        self.record(Call::AllUrls)
    }
}

/// A genuine `reqwest::Error`, produced without touching the network by
/// sending a request with an unparseable URL.
pub(crate) fn transport_error() -> ClientError {
    let source = reqwest::blocking::Client::new()
        .get("not a url")
        .send()
        .unwrap_err();
    ClientError::Transport {
        operation: "test",
        source,
    }
}

pub(crate) fn session(user_id: &str) -> Session {
    Session::new(UserIdentity {
        user_id: user_id.to_string(),
        email: "a@b.com".to_string(),
    })
}
