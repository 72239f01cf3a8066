use thiserror::Error;

/// Rejections raised by the session controller. The message is shown to the operator as is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a callout name")]
    EmptyName,

    #[error("Double-click the map to pick a location first")]
    NoPointPicked,

    #[error("Callout index {index} out of range (total: {total})")]
    IndexOutOfRange { index: usize, total: usize },

    #[error("Reset the session before changing the map")]
    MapLocked,

    #[error("Reset the session before changing the difficulty")]
    DifficultyLocked,
}

pub type Result<T> = std::result::Result<T, ValidationError>;
