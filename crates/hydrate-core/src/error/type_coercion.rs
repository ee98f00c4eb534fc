use super::Error;
use crate::value::Type;

/// Error when a raw column value cannot be converted to its declared type.
#[derive(Debug)]
pub(super) struct TypeCoercionError {
    column: Option<Box<str>>,
    from: Type,
    to: Type,
    reason: Option<Box<str>>,
}

impl std::error::Error for TypeCoercionError {}

impl core::fmt::Display for TypeCoercionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self.column {
            Some(ref column) => write!(
                f,
                "cannot coerce column `{}` from {} to {}",
                column, self.from, self.to
            )?,
            None => write!(f, "cannot coerce {} to {}", self.from, self.to)?,
        }

        if let Some(ref reason) = self.reason {
            write!(f, ": {}", reason)?;
        }

        Ok(())
    }
}

impl Error {
    /// Creates a type coercion error.
    ///
    /// `column` is `None` when the conversion happens outside of a row, for
    /// example when loading an already materialized value into a Rust type.
    pub fn type_coercion(column: Option<&str>, from: Type, to: Type) -> Error {
        Error::from(super::ErrorKind::TypeCoercion(TypeCoercionError {
            column: column.map(Into::into),
            from,
            to,
            reason: None,
        }))
    }

    /// Creates a type coercion error that explains why the conversion failed.
    pub fn type_coercion_because(
        column: Option<&str>,
        from: Type,
        to: Type,
        reason: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::TypeCoercion(TypeCoercionError {
            column: column.map(Into::into),
            from,
            to,
            reason: Some(reason.into().into()),
        }))
    }

    /// Returns `true` if this error is a type coercion error.
    pub fn is_type_coercion(&self) -> bool {
        self.any_kind(|kind| matches!(kind, super::ErrorKind::TypeCoercion(_)))
    }
}
