use thiserror::Error;

/// Errors raised while generating the tests of one source class.
///
/// Every variant aborts generation of the current class only. None of them is
/// transient, so callers are expected to fix the input instead of retrying.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GenerateError {
    #[error("configuration property {property} must be of type {expected}")]
    ConfigValidation { property: String, expected: String },

    #[error("cannot generate tests for method {member}, {reason}")]
    UnsupportedMember { member: String, reason: String },

    #[error("cannot resolve type {type_name}: {reason}")]
    Resolution { type_name: String, reason: String },
}

impl GenerateError {
    pub fn config_validation(property: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::ConfigValidation {
            property: property.into(),
            expected: expected.into(),
        }
    }

    pub fn unsupported_member(member: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UnsupportedMember {
            member: member.into(),
            reason: reason.into(),
        }
    }

    pub fn resolution(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Resolution {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GenerateError>;
