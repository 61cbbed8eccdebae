use serde::Deserialize;
use serde::de::Error as DeError;

/// Scalar field that CallNowUSA may send as a JSON string, a JSON number, or something else.
///
/// Numbers keep their raw JSON token (`1.50` stays `"1.50"`, `1e3` stays `"1e3"`).
/// Any other JSON value decodes to [`TransportScalar::Other`] instead of failing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransportScalar {
    String(String),
    Number(String),
    Other,
}

impl TransportScalar {
    /// Text of a JSON string, `None` for anything else or a blank string.
    pub fn into_text(self) -> Option<String> {
        match self {
            Self::String(value) => non_blank(value),
            Self::Number(_) | Self::Other => None,
        }
    }

    /// Text of a JSON string or the raw token of a JSON number, `None` when blank or neither.
    pub fn into_text_or_number(self) -> Option<String> {
        match self {
            Self::String(value) => non_blank(value),
            Self::Number(token) => Some(token),
            Self::Other => None,
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

impl<'de> Deserialize<'de> for TransportScalar {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: Box<serde_json::value::RawValue> = Deserialize::deserialize(deserializer)?;
        let token = raw.get();

        match token.as_bytes().first().copied() {
            Some(b'"') => {
                let parsed = serde_json::from_str::<String>(token).map_err(D::Error::custom)?;
                Ok(Self::String(parsed))
            }
            Some(b'-' | b'0'..=b'9') => Ok(Self::Number(token.to_owned())),
            _ => Ok(Self::Other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TransportScalar;

    fn scalar(json: &str) -> TransportScalar {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn numbers_keep_their_raw_token() {
        assert_eq!(scalar("42"), TransportScalar::Number("42".to_owned()));
        assert_eq!(scalar("1.50"), TransportScalar::Number("1.50".to_owned()));
        assert_eq!(scalar("1e3"), TransportScalar::Number("1e3".to_owned()));
        assert_eq!(scalar("-0.0"), TransportScalar::Number("-0.0".to_owned()));
    }

    #[test]
    fn strings_are_unescaped() {
        assert_eq!(
            scalar(r#""in-progress""#),
            TransportScalar::String("in-progress".to_owned())
        );
    }

    #[test]
    fn other_json_values_do_not_fail() {
        for json in ["true", "[]", r#"{"seconds": 3}"#] {
            assert_eq!(scalar(json), TransportScalar::Other, "value {json}");
        }
    }

    #[test]
    fn text_helpers_filter_by_kind() {
        assert_eq!(scalar(r#""queued""#).into_text().as_deref(), Some("queued"));
        assert_eq!(scalar("3").into_text(), None);
        assert_eq!(scalar(r#""  ""#).into_text(), None);

        assert_eq!(scalar("1.50").into_text_or_number().as_deref(), Some("1.50"));
        assert_eq!(scalar(r#""12""#).into_text_or_number().as_deref(), Some("12"));
        assert_eq!(scalar(r#""""#).into_text_or_number(), None);
        assert_eq!(scalar("false").into_text_or_number(), None);
    }
}
