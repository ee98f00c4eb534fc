use super::MappingNode;
use crate::{Error, Result};

/// A positional array of nodes evaluated independently against the same row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Compound {
    elements: Vec<MappingNode>,
}

impl Compound {
    /// Creates a compound; at least one element is required.
    pub fn new<I>(elements: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<MappingNode>,
    {
        let elements: Vec<_> = elements.into_iter().map(Into::into).collect();

        if elements.is_empty() {
            return Err(Error::invalid_mapping(
                "compound requires at least one element",
            ));
        }

        Ok(Self { elements })
    }

    pub fn elements(&self) -> &[MappingNode] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
