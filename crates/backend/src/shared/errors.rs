use thiserror::Error;

/// Input rejected by aggregate validation; handlers answer it with
/// `400 Bad Request`.
#[derive(Debug, Error)]
#[error("Validation failed: {0}")]
pub struct ValidationError(pub String);

/// True when the error chain carries a [`ValidationError`].
pub fn is_validation_error(e: &anyhow::Error) -> bool {
    e.downcast_ref::<ValidationError>().is_some()
}
