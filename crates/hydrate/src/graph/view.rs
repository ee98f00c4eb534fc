use super::{
    Constructed, EmbeddedValue, Graph, IdentityKey, Instance, InstanceId, Output, Slot, Slots,
    TupleValue,
};
use crate::{Load, Result};
use hydrate_core::{err, mapping::TupleHandle, mapping::TypeName, Value};

use std::{fmt, ops::Deref};

/// Borrowed view of one output inside a [`Graph`].
#[derive(Debug, Clone, Copy)]
pub enum OutputRef<'g> {
    Value(&'g Value),
    Entity(EntityRef<'g>),
    Embedded(EmbeddedRef<'g>),
    Constructed(ConstructedRef<'g>),
    Compound(CompoundRef<'g>),
    Tuple(TupleRef<'g>),
}

/// Member values of an entity or embedded value.
#[derive(Clone, Copy)]
pub struct Members<'g> {
    graph: &'g Graph,
    owner: &'g TypeName,
    slots: &'g Slots,
}

#[derive(Debug, Clone, Copy)]
pub struct EntityRef<'g> {
    id: InstanceId,
    instance: &'g Instance,
    members: Members<'g>,
}

#[derive(Debug, Clone, Copy)]
pub struct EmbeddedRef<'g> {
    value: &'g EmbeddedValue,
    members: Members<'g>,
}

#[derive(Debug, Clone, Copy)]
pub struct ConstructedRef<'g> {
    value: &'g Constructed,
}

#[derive(Debug, Clone, Copy)]
pub struct CompoundRef<'g> {
    graph: &'g Graph,
    elements: &'g [Output],
}

#[derive(Debug, Clone, Copy)]
pub struct TupleRef<'g> {
    graph: &'g Graph,
    value: &'g TupleValue,
}

impl<'g> OutputRef<'g> {
    pub(crate) fn new(graph: &'g Graph, output: &'g Output) -> Self {
        match output {
            Output::Value(value) => Self::Value(value),
            Output::Entity(id) => Self::Entity(EntityRef::new(graph, *id, graph.get(*id))),
            Output::Embedded(value) => Self::Embedded(EmbeddedRef::new(graph, value)),
            Output::Constructed(value) => Self::Constructed(ConstructedRef { value }),
            Output::Compound(elements) => Self::Compound(CompoundRef { graph, elements }),
            Output::Tuple(value) => Self::Tuple(TupleRef { graph, value }),
        }
    }

    pub fn load<T: Load>(self) -> Result<T> {
        T::load(self)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Value(_) => "value",
            Self::Entity(_) => "entity",
            Self::Embedded(_) => "embedded value",
            Self::Constructed(_) => "constructed value",
            Self::Compound(_) => "compound",
            Self::Tuple(_) => "tuple",
        }
    }

    pub fn as_value(&self) -> Option<&'g Value> {
        match *self {
            Self::Value(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_entity(&self) -> Option<EntityRef<'g>> {
        match *self {
            Self::Entity(entity) => Some(entity),
            _ => None,
        }
    }

    pub fn as_embedded(&self) -> Option<EmbeddedRef<'g>> {
        match *self {
            Self::Embedded(embedded) => Some(embedded),
            _ => None,
        }
    }

    pub fn as_constructed(&self) -> Option<ConstructedRef<'g>> {
        match *self {
            Self::Constructed(constructed) => Some(constructed),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<CompoundRef<'g>> {
        match *self {
            Self::Compound(compound) => Some(compound),
            _ => None,
        }
    }

    pub fn as_tuple(&self) -> Option<TupleRef<'g>> {
        match *self {
            Self::Tuple(tuple) => Some(tuple),
            _ => None,
        }
    }

    pub fn expect_value(self) -> Result<&'g Value> {
        self.as_value()
            .ok_or_else(|| err!("expected a value, found {}", self.kind()))
    }

    pub fn expect_entity(self) -> Result<EntityRef<'g>> {
        self.as_entity()
            .ok_or_else(|| err!("expected an entity, found {}", self.kind()))
    }

    pub fn expect_embedded(self) -> Result<EmbeddedRef<'g>> {
        self.as_embedded()
            .ok_or_else(|| err!("expected an embedded value, found {}", self.kind()))
    }

    pub fn expect_constructed(self) -> Result<ConstructedRef<'g>> {
        self.as_constructed()
            .ok_or_else(|| err!("expected a constructed value, found {}", self.kind()))
    }
}

impl<'g> Members<'g> {
    pub fn owner(&self) -> &'g TypeName {
        self.owner
    }

    /// Raw slot of a member, if the member was mapped.
    pub fn slot(&self, member: &str) -> Option<&'g Slot> {
        self.slots.get(member)
    }

    pub fn slots(&self) -> impl Iterator<Item = (&'g str, &'g Slot)> + 'g {
        self.slots.iter().map(|(name, slot)| (name.as_str(), slot))
    }

    /// Raw value of a scalar member.
    pub fn get(&self, member: &str) -> Option<&'g Value> {
        match self.slot(member)? {
            Slot::Value(value) => Some(value),
            _ => None,
        }
    }

    /// Loads a scalar member.
    pub fn field<T: Load>(&self, member: &str) -> Result<T> {
        let value = match self.require(member)? {
            Slot::Value(value) => value,
            _ => return Err(self.not_a(member, "field")),
        };

        T::load(OutputRef::Value(value))
            .map_err(|e| e.context(err!("loading field `{}.{member}`", self.owner)))
    }

    pub fn embedded(&self, member: &str) -> Result<EmbeddedRef<'g>> {
        match self.require(member)? {
            Slot::Embedded(value) => Ok(EmbeddedRef::new(self.graph, value)),
            _ => Err(self.not_a(member, "embedded value")),
        }
    }

    /// Target of a to-one association; `None` when the association is absent.
    pub fn one_ref(&self, member: &str) -> Result<Option<EntityRef<'g>>> {
        match self.require(member)? {
            Slot::One(target) => Ok(target.map(|id| self.entity(id))),
            _ => Err(self.not_a(member, "to-one association")),
        }
    }

    pub fn one<T: Load>(&self, member: &str) -> Result<Option<T>> {
        self.one_ref(member)?
            .map(|target| T::load(OutputRef::Entity(target)))
            .transpose()
            .map_err(|e| e.context(err!("loading association `{}.{member}`", self.owner)))
    }

    /// Targets of a to-many association in first-appearance order.
    pub fn many_refs(&self, member: &str) -> Result<Vec<EntityRef<'g>>> {
        match self.require(member)? {
            Slot::Many(targets) => Ok(targets.iter().map(|id| self.entity(*id)).collect()),
            _ => Err(self.not_a(member, "to-many association")),
        }
    }

    pub fn many<T: Load>(&self, member: &str) -> Result<Vec<T>> {
        self.many_refs(member)?
            .into_iter()
            .map(|target| T::load(OutputRef::Entity(target)))
            .collect::<Result<_>>()
            .map_err(|e| e.context(err!("loading association `{}.{member}`", self.owner)))
    }

    fn entity(&self, id: InstanceId) -> EntityRef<'g> {
        EntityRef::new(self.graph, id, self.graph.get(id))
    }

    fn require(&self, member: &str) -> Result<&'g Slot> {
        self.slot(member)
            .ok_or_else(|| err!("`{}` has no member `{member}`", self.owner))
    }

    fn not_a(&self, member: &str, expected: &str) -> hydrate_core::Error {
        err!("member `{}.{member}` is not a {expected}", self.owner)
    }
}

impl fmt::Debug for Members<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Members")
            .field("owner", self.owner)
            .field("slots", self.slots)
            .finish()
    }
}

impl<'g> EntityRef<'g> {
    pub(crate) fn new(graph: &'g Graph, id: InstanceId, instance: &'g Instance) -> Self {
        Self {
            id,
            instance,
            members: Members {
                graph,
                owner: instance.key.entity_type(),
                slots: &instance.slots,
            },
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn key(&self) -> &'g IdentityKey {
        &self.instance.key
    }

    pub fn entity_type(&self) -> &'g TypeName {
        self.instance.key.entity_type()
    }

    pub fn identifier(&self) -> &'g [Value] {
        self.instance.key.identifier()
    }

    pub fn discriminator(&self) -> Option<&'g Value> {
        self.instance.discriminator.as_ref()
    }

    pub fn load<T: Load>(self) -> Result<T> {
        T::load(OutputRef::Entity(self))
    }
}

impl<'g> Deref for EntityRef<'g> {
    type Target = Members<'g>;

    fn deref(&self) -> &Members<'g> {
        &self.members
    }
}

impl PartialEq for EntityRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.members.graph, other.members.graph) && self.id == other.id
    }
}

impl<'g> EmbeddedRef<'g> {
    pub(crate) fn new(graph: &'g Graph, value: &'g EmbeddedValue) -> Self {
        Self {
            value,
            members: Members {
                graph,
                owner: &value.embeddable_type,
                slots: &value.slots,
            },
        }
    }

    pub fn embeddable_type(&self) -> &'g TypeName {
        &self.value.embeddable_type
    }

    /// Returns `true` if every scalar member of this value is null.
    pub fn is_null(&self) -> bool {
        self.value.slots.values().all(|slot| match slot {
            Slot::Value(value) => value.is_null(),
            _ => false,
        })
    }
}

impl<'g> Deref for EmbeddedRef<'g> {
    type Target = Members<'g>;

    fn deref(&self) -> &Members<'g> {
        &self.members
    }
}

impl<'g> ConstructedRef<'g> {
    pub fn target_type(&self) -> &'g TypeName {
        &self.value.target_type
    }

    pub fn args(&self) -> &'g [Value] {
        &self.value.args
    }

    /// Loads the constructor argument at `index`.
    pub fn arg<T: Load>(&self, index: usize) -> Result<T> {
        let value = self.value.args.get(index).ok_or_else(|| {
            err!(
                "constructor of `{}` has {} arguments; no argument at {index}",
                self.value.target_type,
                self.value.args.len()
            )
        })?;

        T::load(OutputRef::Value(value))
    }
}

impl<'g> CompoundRef<'g> {
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<OutputRef<'g>> {
        let graph = self.graph;
        self.elements
            .get(index)
            .map(|output| OutputRef::new(graph, output))
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = OutputRef<'g>> + 'g {
        let graph = self.graph;
        self.elements
            .iter()
            .map(move |output| OutputRef::new(graph, output))
    }
}

impl<'g> TupleRef<'g> {
    pub fn len(&self) -> usize {
        self.value.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.elements.is_empty()
    }

    /// Loads the element addressed by `handle`.
    pub fn get<T: Load>(&self, handle: TupleHandle) -> Result<T> {
        let output = self
            .element(handle.index())
            .ok_or_else(|| err!("tuple has no element at {}", handle.index()))?;
        T::load(output)
    }

    /// Loads the element with the given alias.
    pub fn alias<T: Load>(&self, alias: &str) -> Result<T> {
        let output = self
            .value
            .position(alias)
            .and_then(|index| self.element(index))
            .ok_or_else(|| err!("tuple has no element aliased `{alias}`"))?;
        T::load(output)
    }

    pub fn element(&self, index: usize) -> Option<OutputRef<'g>> {
        let graph = self.graph;
        self.value
            .elements
            .get(index)
            .map(|output| OutputRef::new(graph, output))
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = OutputRef<'g>> + 'g {
        let graph = self.graph;
        self.value
            .elements
            .iter()
            .map(move |output| OutputRef::new(graph, output))
    }
}
