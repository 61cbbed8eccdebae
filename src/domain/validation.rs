use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    InvalidPhoneNumber { input: String },
    IdenticalNumbers { number: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::InvalidPhoneNumber { input } => write!(f, "invalid phone number: {input}"),
            Self::IdenticalNumbers { number } => {
                write!(f, "cannot merge a number with itself: {number}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::ValidationError;

    #[test]
    fn display_messages_are_human_readable() {
        let err = ValidationError::Empty { field: "to" };
        assert_eq!(err.to_string(), "to must not be empty");

        let err = ValidationError::InvalidPhoneNumber {
            input: "bad".to_owned(),
        };
        assert_eq!(err.to_string(), "invalid phone number: bad");

        let err = ValidationError::IdenticalNumbers {
            number: "+19876543210".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "cannot merge a number with itself: +19876543210"
        );
    }
}
