use super::Entity;

/// A reference from an entity (or embeddable) to another entity, resolved
/// through join columns present in the same row.
///
/// A to-one association (`plural == false`) holds at most one target. A
/// to-many association accumulates one element per distinct target identity
/// across all rows of the pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Association {
    member_name: String,
    target: Box<Entity>,
    join_column_names: Vec<String>,
    plural: bool,
}

impl Association {
    /// A to-one reference. Join columns are validated by the enclosing
    /// builder.
    pub fn to_one<I>(member_name: impl Into<String>, target: Entity, join_column_names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::new(member_name, target, join_column_names, false)
    }

    /// A to-many reference.
    pub fn to_many<I>(member_name: impl Into<String>, target: Entity, join_column_names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::new(member_name, target, join_column_names, true)
    }

    fn new<I>(member_name: impl Into<String>, target: Entity, join_column_names: I, plural: bool) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self {
            member_name: member_name.into(),
            target: Box::new(target),
            join_column_names: join_column_names.into_iter().map(Into::into).collect(),
            plural,
        }
    }

    pub fn member_name(&self) -> &str {
        &self.member_name
    }

    pub fn target(&self) -> &Entity {
        &self.target
    }

    pub fn join_column_names(&self) -> &[String] {
        &self.join_column_names
    }

    pub fn is_plural(&self) -> bool {
        self.plural
    }
}
