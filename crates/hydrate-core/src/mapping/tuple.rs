use super::{validate, MappingNode};
use crate::{Error, Result};

use std::collections::HashSet;

/// Like [`Compound`](super::Compound), but each element is addressed by the
/// [`TupleHandle`] returned when it was added, or by its alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tuple {
    elements: Vec<TupleElement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TupleElement {
    alias: Option<String>,
    node: MappingNode,
}

/// Addresses one element of a tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TupleHandle {
    index: usize,
}

#[derive(Debug, Default)]
pub struct TupleBuilder {
    elements: Vec<TupleElement>,
}

impl Tuple {
    pub fn builder() -> TupleBuilder {
        TupleBuilder::default()
    }

    pub fn elements(&self) -> &[TupleElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Looks up the handle of the element with the given alias.
    pub fn handle(&self, alias: &str) -> Option<TupleHandle> {
        self.elements
            .iter()
            .position(|element| element.alias.as_deref() == Some(alias))
            .map(|index| TupleHandle { index })
    }
}

impl TupleElement {
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn node(&self) -> &MappingNode {
        &self.node
    }
}

impl TupleHandle {
    pub fn index(self) -> usize {
        self.index
    }
}

impl TupleBuilder {
    /// Adds an element without an alias.
    pub fn push(&mut self, node: impl Into<MappingNode>) -> TupleHandle {
        self.push_element(None, node.into())
    }

    /// Adds an element that can also be looked up by `alias`.
    pub fn push_aliased(
        &mut self,
        alias: impl Into<String>,
        node: impl Into<MappingNode>,
    ) -> TupleHandle {
        self.push_element(Some(alias.into()), node.into())
    }

    fn push_element(&mut self, alias: Option<String>, node: MappingNode) -> TupleHandle {
        let index = self.elements.len();
        self.elements.push(TupleElement { alias, node });
        TupleHandle { index }
    }

    pub fn build(self) -> Result<Tuple> {
        if self.elements.is_empty() {
            return Err(Error::invalid_mapping("tuple requires at least one element"));
        }

        let mut aliases = HashSet::new();

        for alias in self.elements.iter().filter_map(TupleElement::alias) {
            validate::name("tuple alias", alias)?;

            if !aliases.insert(alias) {
                return Err(Error::invalid_mapping(format!(
                    "tuple alias `{alias}` is used more than once"
                )));
            }
        }

        Ok(Tuple {
            elements: self.elements,
        })
    }
}
