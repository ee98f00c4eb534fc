use super::{validate, Association, Entity, Field, Member, TypeName};
use crate::{value::Type, Result};

/// A value object nested in an entity (or another embeddable) whose columns
/// live in the same row as its owner.
///
/// Embeddables carry no identity. They share the identity of the entity that
/// contains them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Embedded {
    container_type: TypeName,
    embeddable_type: TypeName,
    member_name: String,
    fields: Vec<Member>,
}

#[derive(Debug)]
pub struct EmbeddedBuilder {
    container_type: TypeName,
    embeddable_type: TypeName,
    member_name: String,
    fields: Vec<Member>,
}

impl Embedded {
    /// Starts an embeddable stored in `container_type::member_name`.
    pub fn builder(
        container_type: impl Into<TypeName>,
        member_name: impl Into<String>,
        embeddable_type: impl Into<TypeName>,
    ) -> EmbeddedBuilder {
        EmbeddedBuilder {
            container_type: container_type.into(),
            embeddable_type: embeddable_type.into(),
            member_name: member_name.into(),
            fields: vec![],
        }
    }

    pub fn container_type(&self) -> &TypeName {
        &self.container_type
    }

    pub fn embeddable_type(&self) -> &TypeName {
        &self.embeddable_type
    }

    pub fn member_name(&self) -> &str {
        &self.member_name
    }

    pub fn fields(&self) -> &[Member] {
        &self.fields
    }
}

impl EmbeddedBuilder {
    pub fn field(
        self,
        member_name: impl Into<String>,
        target_type: Type,
        column_name: impl Into<String>,
    ) -> Self {
        self.member(Field::new(member_name, target_type, column_name))
    }

    pub fn embedded(self, embedded: Embedded) -> Self {
        self.member(embedded)
    }

    pub fn to_one<I>(self, member_name: impl Into<String>, target: Entity, join_columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.member(Association::to_one(member_name, target, join_columns))
    }

    pub fn to_many<I>(self, member_name: impl Into<String>, target: Entity, join_columns: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.member(Association::to_many(member_name, target, join_columns))
    }

    pub fn member(mut self, member: impl Into<Member>) -> Self {
        self.fields.push(member.into());
        self
    }

    pub fn build(self) -> Result<Embedded> {
        validate::name("container type", self.container_type.as_str())?;
        validate::name("embeddable type", self.embeddable_type.as_str())?;
        validate::name(
            &format!("embedded member name in `{}`", self.container_type),
            &self.member_name,
        )?;
        validate::members(self.embeddable_type.as_str(), &self.fields)?;

        Ok(Embedded {
            container_type: self.container_type,
            embeddable_type: self.embeddable_type,
            member_name: self.member_name,
            fields: self.fields,
        })
    }
}
