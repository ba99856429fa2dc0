use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TokenError {
    /// A color channel is missing or unusable.
    #[error("invalid color: channel `{channel}` is {reason}")]
    InvalidColor {
        channel: &'static str,
        reason: &'static str,
    },
}

pub type Result<T, E = TokenError> = std::result::Result<T, E>;
