use super::Error;

/// Error when a later row disagrees with data already recorded for an
/// identity.
///
/// Neither version is preferred: the query produced conflicting data for one
/// logical object and assembly order cannot decide which is correct.
#[derive(Debug)]
pub(super) struct InconsistentRowError {
    entity: Box<str>,
    identifier: Box<str>,
    member: Box<str>,
}

impl std::error::Error for InconsistentRowError {}

impl core::fmt::Display for InconsistentRowError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "inconsistent row: entity `{}` with identifier {} has conflicting values for `{}`",
            self.entity, self.identifier, self.member
        )
    }
}

impl Error {
    /// Creates an inconsistent row error for `member` of the given identity.
    pub fn inconsistent_row(
        entity: impl Into<String>,
        identifier: impl Into<String>,
        member: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::InconsistentRow(InconsistentRowError {
            entity: entity.into().into(),
            identifier: identifier.into().into(),
            member: member.into().into(),
        }))
    }

    /// Returns `true` if this error is an inconsistent row error.
    pub fn is_inconsistent_row(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::InconsistentRow(_)))
    }
}
