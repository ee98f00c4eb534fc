use super::{Association, Embedded};
use crate::value::Type;

/// A member of an entity or embeddable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Member {
    Field(Field),
    Embedded(Embedded),
    Association(Association),
}

/// A scalar member read from one column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    member_name: String,
    target_type: Type,
    column_name: String,
}

impl Member {
    pub fn member_name(&self) -> &str {
        match self {
            Self::Field(field) => field.member_name(),
            Self::Embedded(embedded) => embedded.member_name(),
            Self::Association(association) => association.member_name(),
        }
    }

    pub fn as_field(&self) -> Option<&Field> {
        match self {
            Self::Field(field) => Some(field),
            _ => None,
        }
    }

    pub fn as_embedded(&self) -> Option<&Embedded> {
        match self {
            Self::Embedded(embedded) => Some(embedded),
            _ => None,
        }
    }

    pub fn as_association(&self) -> Option<&Association> {
        match self {
            Self::Association(association) => Some(association),
            _ => None,
        }
    }
}

impl Field {
    /// Creates a field. Names are validated by the enclosing entity or
    /// embeddable builder.
    pub fn new(
        member_name: impl Into<String>,
        target_type: Type,
        column_name: impl Into<String>,
    ) -> Self {
        Self {
            member_name: member_name.into(),
            target_type,
            column_name: column_name.into(),
        }
    }

    pub fn member_name(&self) -> &str {
        &self.member_name
    }

    pub fn target_type(&self) -> &Type {
        &self.target_type
    }

    pub fn column_name(&self) -> &str {
        &self.column_name
    }
}

impl From<Field> for Member {
    fn from(value: Field) -> Self {
        Self::Field(value)
    }
}

impl From<Embedded> for Member {
    fn from(value: Embedded) -> Self {
        Self::Embedded(value)
    }
}

impl From<Association> for Member {
    fn from(value: Association) -> Self {
        Self::Association(value)
    }
}
