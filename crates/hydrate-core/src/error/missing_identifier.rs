use super::Error;

/// Error when a required entity's identifier column is null.
///
/// Entities reached through an association are optional and a null identifier
/// makes the association absent instead.
#[derive(Debug)]
pub(super) struct MissingIdentifierError {
    entity: Box<str>,
    column: Box<str>,
}

impl std::error::Error for MissingIdentifierError {}

impl core::fmt::Display for MissingIdentifierError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "missing identifier for entity `{}`: column `{}` is null",
            self.entity, self.column
        )
    }
}

impl Error {
    /// Creates a missing identifier error.
    pub fn missing_identifier(entity: impl Into<String>, column: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MissingIdentifier(MissingIdentifierError {
            entity: entity.into().into(),
            column: column.into().into(),
        }))
    }

    /// Returns `true` if this error is a missing identifier error.
    pub fn is_missing_identifier(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::MissingIdentifier(_)))
    }
}
