use thiserror::Error;

/// Rejected style arguments.
///
/// These are caller bugs (a negative offset, a zero-pixel target) and are
/// never clamped. Missing or unrenderable media is not an error; see
/// [`StyleEncoder::build`](super::StyleEncoder::build).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    #[error("Invalid argument `{parameter}`: {reason}")]
    InvalidArgument {
        parameter: &'static str,
        reason: String,
    },
}

impl StyleError {
    pub(crate) fn invalid(parameter: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            parameter,
            reason: reason.into(),
        }
    }

    /// Name of the offending parameter.
    pub fn parameter(&self) -> &'static str {
        match self {
            Self::InvalidArgument { parameter, .. } => parameter,
        }
    }
}
