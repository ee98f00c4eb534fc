//! Answers which members of an entity type form its identifier.
//!
//! Identifier detection belongs to the declaration layer; the materializer
//! only consumes the answers.

use crate::mapping::TypeName;

use indexmap::IndexMap;

/// Entity metadata provider.
///
/// A pure query interface: implementations must answer the same way for the
/// whole duration of a materialization pass.
pub trait EntityMetadata {
    /// Ordered identifier member names of `entity_type`.
    ///
    /// An empty list means the type is not usable as an entity and fails the
    /// pass before any row is read.
    fn identifier_members(&self, entity_type: &TypeName) -> Vec<String>;

    /// Returns `true` if `member_name` holds the discriminator of
    /// `entity_type`'s inheritance hierarchy. Used for diagnostics only.
    fn is_discriminator(&self, entity_type: &TypeName, member_name: &str) -> bool {
        let _ = (entity_type, member_name);
        false
    }

    /// The optimistic-lock version member of `entity_type`, if any. Used for
    /// diagnostics only.
    fn version_member(&self, entity_type: &TypeName) -> Option<String> {
        let _ = entity_type;
        None
    }
}

/// An in-memory [`EntityMetadata`] provider populated up front.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    entities: IndexMap<TypeName, EntityInfo>,
}

/// What the catalog knows about one entity type.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EntityInfo {
    pub identifier: Vec<String>,
    pub version: Option<String>,
    pub discriminator: Option<String>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `entity_type` with the given identifier members.
    pub fn entity<I>(&mut self, entity_type: impl Into<TypeName>, identifier: I) -> &mut EntityInfo
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let info = self.entities.entry(entity_type.into()).or_default();
        info.identifier = identifier.into_iter().map(Into::into).collect();
        info
    }

    pub fn get(&self, entity_type: &TypeName) -> Option<&EntityInfo> {
        self.entities.get(entity_type)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

impl EntityInfo {
    pub fn version(&mut self, member: impl Into<String>) -> &mut Self {
        self.version = Some(member.into());
        self
    }

    pub fn discriminator(&mut self, member: impl Into<String>) -> &mut Self {
        self.discriminator = Some(member.into());
        self
    }
}

impl EntityMetadata for Catalog {
    fn identifier_members(&self, entity_type: &TypeName) -> Vec<String> {
        self.get(entity_type)
            .map(|info| info.identifier.clone())
            .unwrap_or_default()
    }

    fn is_discriminator(&self, entity_type: &TypeName, member_name: &str) -> bool {
        self.get(entity_type)
            .and_then(|info| info.discriminator.as_deref())
            .is_some_and(|member| member == member_name)
    }

    fn version_member(&self, entity_type: &TypeName) -> Option<String> {
        self.get(entity_type).and_then(|info| info.version.clone())
    }
}

impl<T: EntityMetadata + ?Sized> EntityMetadata for &T {
    fn identifier_members(&self, entity_type: &TypeName) -> Vec<String> {
        (**self).identifier_members(entity_type)
    }

    fn is_discriminator(&self, entity_type: &TypeName, member_name: &str) -> bool {
        (**self).is_discriminator(entity_type, member_name)
    }

    fn version_member(&self, entity_type: &TypeName) -> Option<String> {
        (**self).version_member(entity_type)
    }
}

impl<T: EntityMetadata + ?Sized> EntityMetadata for std::sync::Arc<T> {
    fn identifier_members(&self, entity_type: &TypeName) -> Vec<String> {
        (**self).identifier_members(entity_type)
    }

    fn is_discriminator(&self, entity_type: &TypeName, member_name: &str) -> bool {
        (**self).is_discriminator(entity_type, member_name)
    }

    fn version_member(&self, entity_type: &TypeName) -> Option<String> {
        (**self).version_member(entity_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_entity_has_no_identifier() {
        let catalog = Catalog::new();
        assert!(catalog.identifier_members(&"Order".into()).is_empty());
    }

    #[test]
    fn registered_entity_answers() {
        let mut catalog = Catalog::new();
        catalog
            .entity("Vehicle", ["vin"])
            .version("revision")
            .discriminator("kind");

        let vehicle = TypeName::from("Vehicle");
        assert_eq!(catalog.identifier_members(&vehicle), vec!["vin".to_string()]);
        assert_eq!(catalog.version_member(&vehicle).as_deref(), Some("revision"));
        assert!(catalog.is_discriminator(&vehicle, "kind"));
        assert!(!catalog.is_discriminator(&vehicle, "vin"));
    }
}
