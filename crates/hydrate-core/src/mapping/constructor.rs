use super::{validate, Column, TypeName};
use crate::{value::Type, Result};

/// A value object built positionally from columns.
///
/// Never registered for identity: every row yields a fresh value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constructor {
    target_type: TypeName,
    ordered_columns: Vec<Column>,
}

#[derive(Debug)]
pub struct ConstructorBuilder {
    target_type: TypeName,
    columns: Vec<(String, Type)>,
}

impl Constructor {
    pub fn builder(target_type: impl Into<TypeName>) -> ConstructorBuilder {
        ConstructorBuilder {
            target_type: target_type.into(),
            columns: vec![],
        }
    }

    pub fn target_type(&self) -> &TypeName {
        &self.target_type
    }

    pub fn ordered_columns(&self) -> &[Column] {
        &self.ordered_columns
    }
}

impl ConstructorBuilder {
    /// Appends the next positional argument.
    pub fn column(mut self, name: impl Into<String>, target_type: Type) -> Self {
        self.columns.push((name.into(), target_type));
        self
    }

    pub fn build(self) -> Result<Constructor> {
        validate::name("constructor target type", self.target_type.as_str())?;

        let ordered_columns = self
            .columns
            .into_iter()
            .map(|(name, ty)| Column::new(name, ty))
            .collect::<Result<Vec<_>>>()?;

        Ok(Constructor {
            target_type: self.target_type,
            ordered_columns,
        })
    }
}
