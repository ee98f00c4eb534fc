//! The owned result of one materialization pass.

mod instance;
pub use instance::{EmbeddedValue, IdentityKey, Instance, InstanceId, Slot, Slots};
pub(crate) use instance::{merge_slot, Conflict};

mod view;
pub use view::{
    CompoundRef, ConstructedRef, EmbeddedRef, EntityRef, Members, OutputRef, TupleRef,
};

use crate::{Load, Result};
use hydrate_core::{mapping::TypeName, Error, Value};

use std::sync::Arc;

/// Entity instances reachable from the results plus the ordered top-level
/// results themselves.
#[derive(Debug, Default, Clone)]
pub struct Graph {
    instances: Vec<Instance>,
    results: Vec<Output>,
}

/// One top-level result, or one element of a compound result.
#[derive(Debug, Clone, PartialEq)]
pub enum Output {
    Value(Value),
    Entity(InstanceId),
    Embedded(EmbeddedValue),
    Constructed(Constructed),
    Compound(Vec<Output>),
    Tuple(TupleValue),
}

/// A value object built positionally by a constructor node.
#[derive(Debug, Clone, PartialEq)]
pub struct Constructed {
    pub(crate) target_type: TypeName,
    pub(crate) args: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TupleValue {
    pub(crate) aliases: Arc<[Option<String>]>,
    pub(crate) elements: Vec<Output>,
}

impl Graph {
    pub(crate) fn new(instances: Vec<Instance>, results: Vec<Output>) -> Self {
        Self { instances, results }
    }

    /// Number of top-level results.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn result(&self, index: usize) -> Option<OutputRef<'_>> {
        self.results
            .get(index)
            .map(|output| OutputRef::new(self, output))
    }

    pub fn results(&self) -> impl ExactSizeIterator<Item = OutputRef<'_>> + '_ {
        self.results.iter().map(|output| OutputRef::new(self, output))
    }

    /// Returns the only result, failing when there are none or several.
    pub fn single(&self) -> Result<OutputRef<'_>> {
        match &self.results[..] {
            [output] => Ok(OutputRef::new(self, output)),
            [] => Err(Error::no_result()),
            results => Err(Error::non_unique_result(results.len())),
        }
    }

    /// Loads every top-level result as `T`, in order.
    pub fn load<T: Load>(&self) -> Result<Vec<T>> {
        self.results().map(T::load).collect()
    }

    pub fn instance(&self, id: InstanceId) -> Option<EntityRef<'_>> {
        self.instances
            .get(id.0)
            .map(|instance| EntityRef::new(self, id, instance))
    }

    /// Every instance materialized during the pass, in allocation order.
    pub fn instances(&self) -> impl Iterator<Item = EntityRef<'_>> + '_ {
        self.instances
            .iter()
            .enumerate()
            .map(|(index, instance)| EntityRef::new(self, InstanceId(index), instance))
    }

    /// Instances of one entity type, in allocation order.
    pub fn instances_of<'g>(
        &'g self,
        entity_type: &'g str,
    ) -> impl Iterator<Item = EntityRef<'g>> + 'g {
        self.instances()
            .filter(move |entity| *entity.entity_type() == entity_type)
    }

    pub(crate) fn get(&self, id: InstanceId) -> &Instance {
        &self.instances[id.0]
    }
}

impl Constructed {
    pub fn target_type(&self) -> &TypeName {
        &self.target_type
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }
}

impl TupleValue {
    pub fn elements(&self) -> &[Output] {
        &self.elements
    }

    pub(crate) fn position(&self, alias: &str) -> Option<usize> {
        self.aliases
            .iter()
            .position(|candidate| candidate.as_deref() == Some(alias))
    }
}
