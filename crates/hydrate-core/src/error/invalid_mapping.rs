use super::Error;

/// Error when a mapping descriptor is structurally invalid.
///
/// This occurs when:
/// - A column, member or join column name is empty
/// - An entity or embeddable declares the same member twice
/// - A tuple or compound has no elements
/// - An entity resolves to no identifier members
///
/// These errors surface before any row is read and are never retried.
#[derive(Debug)]
pub(super) struct InvalidMappingError {
    message: Box<str>,
}

impl std::error::Error for InvalidMappingError {}

impl core::fmt::Display for InvalidMappingError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid mapping: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid mapping error.
    pub fn invalid_mapping(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidMapping(InvalidMappingError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid mapping error.
    pub fn is_invalid_mapping(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InvalidMapping(_)))
    }
}
