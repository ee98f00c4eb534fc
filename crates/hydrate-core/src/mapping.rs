//! Declarative description of how one query's flat rows map onto a graph of
//! application values.
//!
//! A mapping is built once, validated on construction, and read-only from then
//! on. Every constructor that can produce an invalid descriptor returns
//! `Result` and fails with an invalid mapping error, so a `MappingNode` that
//! exists is always structurally valid.

mod association;
pub use association::Association;

mod column;
pub use column::Column;

mod compound;
pub use compound::Compound;

mod constructor;
pub use constructor::{Constructor, ConstructorBuilder};

mod embedded;
pub use embedded::{Embedded, EmbeddedBuilder};

mod entity;
pub use entity::{Entity, EntityBuilder};

mod lock_hint;
pub use lock_hint::LockHint;

mod member;
pub use member::{Field, Member};

mod tuple;
pub use tuple::{Tuple, TupleBuilder, TupleElement, TupleHandle};

mod type_name;
pub use type_name::TypeName;

mod validate;

pub mod visit;
pub use visit::Visit;

/// The target shape of one query's results.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MappingNode {
    /// A scalar read from one column.
    Column(Column),

    /// A value object built positionally from columns.
    Constructor(Constructor),

    /// An identity-bearing entity.
    Entity(Entity),

    /// A value object nested inside an entity, read from the same row.
    Embedded(Embedded),

    /// A positional array of independently evaluated nodes.
    Compound(Compound),

    /// Like `Compound`, with elements addressed by handle or alias.
    Tuple(Tuple),
}

impl MappingNode {
    /// Returns `true` if results of this node are deduplicated by identity.
    pub fn is_identity_bearing(&self) -> bool {
        matches!(self, Self::Entity(_))
    }

    pub fn as_entity(&self) -> Option<&Entity> {
        match self {
            Self::Entity(entity) => Some(entity),
            _ => None,
        }
    }

    /// Calls `f` for every entity node in the tree, including association
    /// targets, in depth-first order.
    pub fn for_each_entity<'a, F>(&'a self, f: F)
    where
        F: FnMut(&'a Entity),
    {
        visit::for_each_entity(self, f);
    }
}

impl From<Column> for MappingNode {
    fn from(value: Column) -> Self {
        Self::Column(value)
    }
}

impl From<Constructor> for MappingNode {
    fn from(value: Constructor) -> Self {
        Self::Constructor(value)
    }
}

impl From<Entity> for MappingNode {
    fn from(value: Entity) -> Self {
        Self::Entity(value)
    }
}

impl From<Embedded> for MappingNode {
    fn from(value: Embedded) -> Self {
        Self::Embedded(value)
    }
}

impl From<Compound> for MappingNode {
    fn from(value: Compound) -> Self {
        Self::Compound(value)
    }
}

impl From<Tuple> for MappingNode {
    fn from(value: Tuple) -> Self {
        Self::Tuple(value)
    }
}
