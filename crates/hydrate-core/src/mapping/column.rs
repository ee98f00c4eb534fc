use super::validate;
use crate::{value::Type, Result};

/// A scalar leaf: one column coerced to a declared type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column {
    name: String,
    target_type: Type,
}

impl Column {
    pub fn new(name: impl Into<String>, target_type: Type) -> Result<Self> {
        let name = name.into();
        validate::name("column name", &name)?;
        Ok(Self { name, target_type })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target_type(&self) -> &Type {
        &self.target_type
    }
}
