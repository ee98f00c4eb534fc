use super::Error;

/// Error when a single result was requested but the pass produced none.
#[derive(Debug)]
pub(super) struct NoResultError;

impl std::error::Error for NoResultError {}

impl core::fmt::Display for NoResultError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("no result")
    }
}

impl Error {
    /// Creates a no result error.
    pub fn no_result() -> Error {
        Error::from(super::ErrorKind::NoResult(NoResultError))
    }

    /// Returns `true` if this error is a no result error.
    pub fn is_no_result(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::NoResult(_)))
    }
}
