use super::{validate, Association, Embedded, Field, LockHint, Member, TypeName};
use crate::{value::Type, Result};

/// An identity-bearing node.
///
/// Identifier members are not declared here; they are resolved per entity
/// type through the entity metadata provider when a pass starts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Entity {
    entity_type: TypeName,
    lock_hint: LockHint,
    discriminator_column: Option<String>,
    members: Vec<Member>,
}

#[derive(Debug)]
pub struct EntityBuilder {
    entity_type: TypeName,
    lock_hint: LockHint,
    discriminator_column: Option<String>,
    members: Vec<Member>,
}

impl Entity {
    pub fn builder(entity_type: impl Into<TypeName>) -> EntityBuilder {
        EntityBuilder {
            entity_type: entity_type.into(),
            lock_hint: LockHint::None,
            discriminator_column: None,
            members: vec![],
        }
    }

    pub fn entity_type(&self) -> &TypeName {
        &self.entity_type
    }

    pub fn lock_hint(&self) -> LockHint {
        self.lock_hint
    }

    pub fn discriminator_column(&self) -> Option<&str> {
        self.discriminator_column.as_deref()
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members
            .iter()
            .find(|member| member.member_name() == name)
    }

    pub fn associations(&self) -> impl Iterator<Item = &Association> + '_ {
        self.members.iter().filter_map(Member::as_association)
    }
}

impl EntityBuilder {
    pub fn lock_hint(mut self, lock_hint: LockHint) -> Self {
        self.lock_hint = lock_hint;
        self
    }

    /// Sets the column carrying the discriminator of an inheritance hierarchy.
    pub fn discriminator(mut self, column: impl Into<String>) -> Self {
        self.discriminator_column = Some(column.into());
        self
    }

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
        self.members.push(member.into());
        self
    }

    pub fn build(self) -> Result<Entity> {
        validate::name("entity type", self.entity_type.as_str())?;

        if let Some(column) = &self.discriminator_column {
            validate::name(
                &format!("discriminator column of `{}`", self.entity_type),
                column,
            )?;
        }

        validate::members(self.entity_type.as_str(), &self.members)?;

        Ok(Entity {
            entity_type: self.entity_type,
            lock_hint: self.lock_hint,
            discriminator_column: self.discriminator_column,
            members: self.members,
        })
    }
}
