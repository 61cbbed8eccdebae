use crate::domain::validation::ValidationError;
use crate::domain::value::{MessageBody, OutboundNumber, RawPhoneNumber, Sid};

#[derive(Debug, Clone)]
pub struct CreateMessage {
    body: MessageBody,
    to: RawPhoneNumber,
    from: Option<OutboundNumber>,
}

impl CreateMessage {
    pub fn new(body: impl Into<String>, to: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            body: MessageBody::new(body)?,
            to: RawPhoneNumber::new(to)?,
            from: None,
        })
    }

    /// Send from `from` instead of the client's configured number.
    pub fn from(mut self, from: impl Into<OutboundNumber>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn body(&self) -> &MessageBody {
        &self.body
    }

    pub fn to(&self) -> &RawPhoneNumber {
        &self.to
    }

    pub fn from_number(&self) -> Option<&OutboundNumber> {
        self.from.as_ref()
    }
}

#[derive(Debug, Clone)]
pub struct CreateCall {
    to: RawPhoneNumber,
    from: Option<OutboundNumber>,
    auto_hang: bool,
}

impl CreateCall {
    pub const AUTO_HANG_FIELD: &'static str = "auto_hang";

    /// A direct call to `to`. The call stays up after connect unless
    /// [`CreateCall::auto_hang`] is set.
    pub fn new(to: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            to: RawPhoneNumber::new(to)?,
            from: None,
            auto_hang: false,
        })
    }

    pub fn from(mut self, from: impl Into<OutboundNumber>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// `true` hangs up automatically once the callee connects.
    pub fn auto_hang(mut self, auto_hang: bool) -> Self {
        self.auto_hang = auto_hang;
        self
    }

    pub fn to(&self) -> &RawPhoneNumber {
        &self.to
    }

    pub fn from_number(&self) -> Option<&OutboundNumber> {
        self.from.as_ref()
    }

    pub fn is_auto_hang(&self) -> bool {
        self.auto_hang
    }
}

#[derive(Debug, Clone)]
pub struct MergeCalls {
    phone_1: RawPhoneNumber,
    phone_2: RawPhoneNumber,
    from: Option<OutboundNumber>,
}

impl MergeCalls {
    pub const PHONE_1_FIELD: &'static str = "phone_1";
    pub const PHONE_2_FIELD: &'static str = "phone_2";

    /// Bridge `phone_1` and `phone_2` into one session.
    ///
    /// Both numbers must be non-empty and must differ after trimming.
    /// [`PhoneNumber`](crate::PhoneNumber) values are compared in their E.164 form.
    pub fn new(
        phone_1: impl Into<String>,
        phone_2: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let phone_1 = RawPhoneNumber::for_field(Self::PHONE_1_FIELD, phone_1)?;
        let phone_2 = RawPhoneNumber::for_field(Self::PHONE_2_FIELD, phone_2)?;
        if phone_1 == phone_2 {
            return Err(ValidationError::IdenticalNumbers {
                number: phone_1.raw().to_owned(),
            });
        }
        Ok(Self {
            phone_1,
            phone_2,
            from: None,
        })
    }

    pub fn from(mut self, from: impl Into<OutboundNumber>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn phone_1(&self) -> &RawPhoneNumber {
        &self.phone_1
    }

    pub fn phone_2(&self) -> &RawPhoneNumber {
        &self.phone_2
    }

    pub fn from_number(&self) -> Option<&OutboundNumber> {
        self.from.as_ref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallUpdateStatus {
    /// Hang up a call in progress.
    Completed,
    /// Cancel a call that has not connected yet.
    Canceled,
}

impl CallUpdateStatus {
    pub const FIELD: &'static str = "status";

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Canceled => "canceled",
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateCall {
    sid: Sid,
    status: CallUpdateStatus,
    from: Option<OutboundNumber>,
    to: Option<RawPhoneNumber>,
}

impl UpdateCall {
    pub fn new(sid: Sid, status: CallUpdateStatus) -> Self {
        Self {
            sid,
            status,
            from: None,
            to: None,
        }
    }

    /// Shorthand for `UpdateCall::new(sid, CallUpdateStatus::Completed)`.
    pub fn hang_up(sid: Sid) -> Self {
        Self::new(sid, CallUpdateStatus::Completed)
    }

    pub fn from(mut self, from: impl Into<OutboundNumber>) -> Self {
        self.from = Some(from.into());
        self
    }

    pub fn to(mut self, to: RawPhoneNumber) -> Self {
        self.to = Some(to);
        self
    }

    pub fn sid(&self) -> &Sid {
        &self.sid
    }

    pub fn status(&self) -> CallUpdateStatus {
        self.status
    }

    pub fn from_number(&self) -> Option<&OutboundNumber> {
        self.from.as_ref()
    }

    pub fn to_number(&self) -> Option<&RawPhoneNumber> {
        self.to.as_ref()
    }
}
