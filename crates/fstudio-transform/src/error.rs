use thiserror::Error;

/// Why a raw record was dropped by the transformer.
///
/// Rejections are never fatal to a run; they are counted and logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Error)]
pub enum RejectReason {
    #[error("title is empty or a placeholder")]
    InvalidTitle,

    #[error("price is missing")]
    MissingPrice,

    #[error("price is not a positive dollar amount")]
    InvalidPrice,

    #[error("rating is missing")]
    MissingRating,

    #[error("rating has no numeric value")]
    InvalidRating,

    #[error("rating is outside the allowed range")]
    RatingOutOfRange,

    #[error("colour count is missing")]
    MissingColors,

    #[error("colour count has no integer value")]
    InvalidColors,

    #[error("size is missing or empty")]
    MissingSize,

    #[error("gender is missing or empty")]
    MissingGender,
}
