use super::Error;

/// Error when a single result was requested but the pass produced several.
#[derive(Debug)]
pub(super) struct NonUniqueResultError {
    found: usize,
}

impl std::error::Error for NonUniqueResultError {}

impl core::fmt::Display for NonUniqueResultError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "non-unique result: expected exactly one result, found {}",
            self.found
        )
    }
}

impl Error {
    /// Creates a non-unique result error.
    pub fn non_unique_result(found: usize) -> Error {
        Error::from(super::ErrorKind::NonUniqueResult(NonUniqueResultError {
            found,
        }))
    }

    /// Returns `true` if this error is a non-unique result error.
    pub fn is_non_unique_result(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::NonUniqueResult(_)))
    }
}
