use hydrate_core::{
    mapping::{visit, Entity, Member, Tuple, TypeName, Visit},
    EntityMetadata, Error, MappingNode, Result, Type,
};

use by_address::ByAddress;
use std::{collections::HashMap, sync::Arc};

/// Per-node facts resolved once, before the first row is read.
#[derive(Debug, Default)]
pub(crate) struct Plans<'a> {
    entities: HashMap<ByAddress<&'a Entity>, Arc<EntityPlan>>,
    tuples: HashMap<ByAddress<&'a Tuple>, Arc<[Option<String>]>>,
}

#[derive(Debug)]
pub(crate) struct EntityPlan {
    /// Columns forming the identity key, in identifier member order.
    pub(crate) identifier: Vec<IdentifierColumn>,
}

#[derive(Debug)]
pub(crate) struct IdentifierColumn {
    pub(crate) column: String,
    pub(crate) ty: Type,
}

/// Collects the nodes that need a plan.
#[derive(Default)]
struct Collect<'a> {
    entities: Vec<&'a Entity>,
    tuples: Vec<&'a Tuple>,
}

impl<'a> Visit<'a> for Collect<'a> {
    fn visit_entity(&mut self, i: &'a Entity) {
        self.entities.push(i);
        visit::visit_entity(self, i);
    }

    fn visit_tuple(&mut self, i: &'a Tuple) {
        self.tuples.push(i);
        visit::visit_tuple(self, i);
    }
}

impl<'a> Plans<'a> {
    /// Resolves identifier members for every entity node under `root`.
    ///
    /// Each entity type is looked up once per pass.
    pub(crate) fn prepare(
        root: &'a MappingNode,
        metadata: &dyn EntityMetadata,
        diagnostics: bool,
    ) -> Result<Self> {
        let mut collect = Collect::default();
        collect.visit_node(root);

        let mut identifiers: HashMap<&'a TypeName, Vec<String>> = HashMap::new();
        let mut plans = Plans::default();

        for entity in collect.entities {
            if plans.entities.contains_key(&ByAddress(entity)) {
                continue;
            }

            let members = identifiers
                .entry(entity.entity_type())
                .or_insert_with(|| metadata.identifier_members(entity.entity_type()));

            if members.is_empty() {
                return Err(Error::invalid_mapping(format!(
                    "entity type `{}` has no identifier members",
                    entity.entity_type()
                )));
            }

            let plan = EntityPlan {
                identifier: identifier_columns(entity, members)?,
            };

            if diagnostics {
                diagnose(entity, metadata);
            }

            plans.entities.insert(ByAddress(entity), Arc::new(plan));
        }

        for tuple in collect.tuples {
            let aliases = tuple
                .elements()
                .iter()
                .map(|element| element.alias().map(str::to_string))
                .collect();
            plans.tuples.insert(ByAddress(tuple), aliases);
        }

        Ok(plans)
    }

    pub(crate) fn entity(&self, node: &'a Entity) -> Result<Arc<EntityPlan>> {
        self.entities
            .get(&ByAddress(node))
            .cloned()
            .ok_or_else(|| hydrate_core::err!("entity `{}` was not prepared", node.entity_type()))
    }

    pub(crate) fn tuple_aliases(&self, node: &'a Tuple) -> Arc<[Option<String>]> {
        self.tuples
            .get(&ByAddress(node))
            .cloned()
            .unwrap_or_else(|| node.elements().iter().map(|_| None).collect())
    }
}

fn identifier_columns(entity: &Entity, members: &[String]) -> Result<Vec<IdentifierColumn>> {
    let mut columns = vec![];

    for name in members {
        match entity.member(name) {
            Some(Member::Field(field)) => columns.push(IdentifierColumn {
                column: field.column_name().to_string(),
                ty: field.target_type().non_null().clone(),
            }),
            Some(Member::Embedded(embedded)) => {
                flatten_embedded(entity, embedded.fields(), &mut columns)?
            }
            Some(Member::Association(_)) => {
                return Err(Error::invalid_mapping(format!(
                    "identifier member `{name}` of `{}` is an association",
                    entity.entity_type()
                )))
            }
            None => {
                return Err(Error::invalid_mapping(format!(
                    "entity `{}` does not map identifier member `{name}`",
                    entity.entity_type()
                )))
            }
        }
    }

    Ok(columns)
}

// Composite identifiers held in an embeddable contribute every nested field.
fn flatten_embedded(
    entity: &Entity,
    fields: &[Member],
    columns: &mut Vec<IdentifierColumn>,
) -> Result<()> {
    for member in fields {
        match member {
            Member::Field(field) => columns.push(IdentifierColumn {
                column: field.column_name().to_string(),
                ty: field.target_type().non_null().clone(),
            }),
            Member::Embedded(embedded) => flatten_embedded(entity, embedded.fields(), columns)?,
            Member::Association(association) => {
                return Err(Error::invalid_mapping(format!(
                    "embedded identifier of `{}` contains association `{}`",
                    entity.entity_type(),
                    association.member_name()
                )))
            }
        }
    }

    Ok(())
}

fn diagnose(entity: &Entity, metadata: &dyn EntityMetadata) {
    let entity_type = entity.entity_type();

    if entity.discriminator_column().is_none() {
        for member in entity.members() {
            if metadata.is_discriminator(entity_type, member.member_name()) {
                tracing::warn!(
                    entity = %entity_type,
                    member = member.member_name(),
                    "discriminator member is mapped as a plain member; subtype cannot be told apart"
                );
            }
        }
    }

    if entity.lock_hint().is_optimistic() {
        if let Some(version) = metadata.version_member(entity_type) {
            if entity.member(&version).is_none() {
                tracing::warn!(
                    entity = %entity_type,
                    member = %version,
                    "optimistic lock requested but the version member is not mapped"
                );
            }
        }
    }
}
