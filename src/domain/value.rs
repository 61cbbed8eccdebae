use std::fmt;

use phonenumber::country;
use zeroize::Zeroizing;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// CallNowUSA account identifier.
///
/// Invariant: non-empty after trimming.
pub struct AccountSid(String);

impl AccountSid {
    /// Field name used in validation errors (`account_sid`).
    pub const FIELD: &'static str = "account_sid";

    /// Create a validated [`AccountSid`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated account sid.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq)]
/// CallNowUSA auth token.
///
/// Invariant: must not be empty (whitespace is preserved and allowed). The value is wiped
/// from memory on drop and never shows up in `Debug` output.
pub struct AuthToken(Zeroizing<String>);

impl AuthToken {
    /// Field name used in validation errors (`auth_token`).
    pub const FIELD: &'static str = "auth_token";

    /// Create a validated [`AuthToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = Zeroizing::new(value.into());
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the token as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Server-assigned identifier of a message or call.
///
/// Invariant: non-empty after trimming.
pub struct Sid(String);

impl Sid {
    /// JSON field name used by CallNowUSA (`sid`).
    pub const FIELD: &'static str = "sid";

    /// Create a validated [`Sid`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Accept a sid assigned by the server without trimming it.
    ///
    /// Only blank values are rejected, so later requests address exactly what was returned.
    pub(crate) fn verbatim(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the validated sid.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Sid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`body`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageBody(String);

impl MessageBody {
    /// Form field name used by CallNowUSA (`body`).
    pub const FIELD: &'static str = "body";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Unvalidated phone number as sent to CallNowUSA.
///
/// Invariant: non-empty after trimming. This type does not normalize; if you want E.164
/// normalization, parse into [`PhoneNumber`] and convert it into [`RawPhoneNumber`].
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// Form field name used by CallNowUSA for the recipient (`to`).
    pub const FIELD: &'static str = "to";

    /// Create a validated (non-empty) raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Self::for_field(Self::FIELD, value)
    }

    /// Same as [`RawPhoneNumber::new`], reporting `field` on failure.
    pub(crate) fn for_field(
        field: &'static str,
        value: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to CallNowUSA.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<RawPhoneNumber> for String {
    fn from(value: RawPhoneNumber) -> Self {
        value.0
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    /// Convert an already-parsed phone number to a normalized raw value (E.164).
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164)
    }
}

#[derive(Debug, Clone)]
/// Parsed phone number with an E.164 representation.
///
/// Equality, ordering, and hashing are based on the E.164 form.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Parse and normalize a phone number into E.164.
    ///
    /// `default_region` is used when the input does not contain an explicit country prefix.
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty {
                field: RawPhoneNumber::FIELD,
            });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// Parse a number, treating inputs without a country prefix as US numbers.
    pub fn parse_us(input: impl Into<String>) -> Result<Self, ValidationError> {
        Self::parse(Some(country::Id::US), input)
    }

    /// Raw input after trimming.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Normalized E.164 representation.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    /// The parsed phone number from the `phonenumber` crate.
    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl From<PhoneNumber> for String {
    /// The E.164 form, so parsed numbers can be passed wherever a raw number is accepted.
    fn from(value: PhoneNumber) -> Self {
        value.e164
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

impl std::cmp::PartialOrd for PhoneNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for PhoneNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.e164.cmp(&other.e164)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
/// Number a message or call originates from (`from`).
///
/// [`OutboundNumber::Default`] is sent as the literal `default` and tells CallNowUSA to use
/// the number assigned to the account.
pub enum OutboundNumber {
    #[default]
    Default,
    Number(RawPhoneNumber),
}

impl OutboundNumber {
    /// Form field name used by CallNowUSA (`from`).
    pub const FIELD: &'static str = "from";

    /// Wire value of [`OutboundNumber::Default`].
    pub const DEFAULT: &'static str = "default";

    /// Parse either the `default` sentinel or a phone number.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim() == Self::DEFAULT {
            return Ok(Self::Default);
        }
        Ok(Self::Number(RawPhoneNumber::for_field(Self::FIELD, value)?))
    }

    /// Value as sent on the wire.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Default => Self::DEFAULT,
            Self::Number(number) => number.raw(),
        }
    }
}

impl From<RawPhoneNumber> for OutboundNumber {
    fn from(value: RawPhoneNumber) -> Self {
        Self::Number(value)
    }
}

impl From<PhoneNumber> for OutboundNumber {
    fn from(value: PhoneNumber) -> Self {
        Self::Number(value.into())
    }
}
