use hydrate_core::{mapping::TypeName, Value};

use indexmap::{IndexMap, IndexSet};
use std::fmt;

/// Index of an entity instance inside a [`Graph`](super::Graph).
///
/// Two references to the same identity within one pass always carry the same
/// `InstanceId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstanceId(pub(crate) usize);

/// Entity type plus the ordered identifier values.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey {
    entity_type: TypeName,
    identifier: Vec<Value>,
}

/// One materialized entity.
#[derive(Debug, Clone)]
pub struct Instance {
    pub(crate) key: IdentityKey,
    pub(crate) discriminator: Option<Value>,
    pub(crate) slots: Slots,
}

/// Member values, keyed by member name, in mapping order.
pub type Slots = IndexMap<String, Slot>;

#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    Value(Value),
    Embedded(EmbeddedValue),

    /// To-one association. `None` when the row carried no target.
    One(Option<InstanceId>),

    /// To-many association, in first-appearance order, without duplicates.
    Many(IndexSet<InstanceId>),
}

/// An embeddable value object. Owned by exactly one instance or result.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedValue {
    pub(crate) embeddable_type: TypeName,
    pub(crate) slots: Slots,
}

/// Name of the member whose recorded value disagrees with a later row.
#[derive(Debug)]
pub(crate) struct Conflict(pub(crate) String);

impl InstanceId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl IdentityKey {
    pub fn new(entity_type: impl Into<TypeName>, identifier: Vec<Value>) -> Self {
        Self {
            entity_type: entity_type.into(),
            identifier,
        }
    }

    pub fn entity_type(&self) -> &TypeName {
        &self.entity_type
    }

    pub fn identifier(&self) -> &[Value] {
        &self.identifier
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.identifier.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}

impl Instance {
    pub(crate) fn new(key: IdentityKey) -> Self {
        Self {
            key,
            discriminator: None,
            slots: Slots::new(),
        }
    }

    pub fn key(&self) -> &IdentityKey {
        &self.key
    }

    pub fn discriminator(&self) -> Option<&Value> {
        self.discriminator.as_ref()
    }

    pub fn slots(&self) -> &Slots {
        &self.slots
    }

    /// Records the discriminator seen on a row, or checks it against the one
    /// already recorded.
    pub(crate) fn merge_discriminator(&mut self, value: Option<Value>) -> Result<(), Conflict> {
        match (&self.discriminator, value) {
            (_, None) => Ok(()),
            (None, Some(value)) => {
                self.discriminator = Some(value);
                Ok(())
            }
            (Some(recorded), Some(value)) if *recorded == value => Ok(()),
            (Some(_), Some(_)) => Err(Conflict("<discriminator>".to_string())),
        }
    }
}

impl EmbeddedValue {
    pub(crate) fn new(embeddable_type: TypeName, slots: Slots) -> Self {
        Self {
            embeddable_type,
            slots,
        }
    }

    pub fn embeddable_type(&self) -> &TypeName {
        &self.embeddable_type
    }

    pub fn slots(&self) -> &Slots {
        &self.slots
    }
}

/// Folds the slots built from one row into the slots already recorded.
///
/// Members seen for the first time are recorded. Scalar values and to-one
/// targets must agree with what is recorded. To-many targets are appended
/// unless already present.
pub(crate) fn merge_slots(recorded: &mut Slots, fresh: Slots) -> Result<(), Conflict> {
    for (member, slot) in fresh {
        merge_slot(recorded, member, slot)?;
    }

    Ok(())
}

pub(crate) fn merge_slot(recorded: &mut Slots, member: String, slot: Slot) -> Result<(), Conflict> {
    let Some(existing) = recorded.get_mut(&member) else {
        recorded.insert(member, slot);
        return Ok(());
    };

    match (existing, slot) {
        (Slot::Value(existing), Slot::Value(value)) if *existing == value => Ok(()),
        (Slot::One(existing), Slot::One(target)) if *existing == target => Ok(()),
        (Slot::Many(existing), Slot::Many(targets)) => {
            existing.extend(targets);
            Ok(())
        }
        (Slot::Embedded(existing), Slot::Embedded(value)) => {
            merge_slots(&mut existing.slots, value.slots)
                .map_err(|Conflict(path)| Conflict(format!("{member}.{path}")))
        }
        _ => Err(Conflict(member)),
    }
}
