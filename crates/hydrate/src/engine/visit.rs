use super::Engine;
use crate::graph::{
    Constructed, EmbeddedValue, IdentityKey, Instance, InstanceId, Output, Slot, Slots,
    TupleValue,
};
use crate::materializer::ColumnCase;
use hydrate_core::{
    bail,
    mapping::{Association, Embedded, Entity, Member},
    Error, MappingNode, Result, Row, Type, Value,
};

impl<'a> Engine<'a> {
    pub(super) fn visit_node(&mut self, node: &'a MappingNode, row: &Row) -> Result<Output> {
        Ok(match node {
            MappingNode::Column(column) => {
                Output::Value(self.read(row, column.name(), column.target_type())?)
            }
            MappingNode::Constructor(constructor) => {
                let args = constructor
                    .ordered_columns()
                    .iter()
                    .map(|column| self.read(row, column.name(), column.target_type()))
                    .collect::<Result<_>>()?;

                Output::Constructed(Constructed {
                    target_type: constructor.target_type().clone(),
                    args,
                })
            }
            MappingNode::Entity(entity) => match self.visit_entity(entity, row, true)? {
                Some(id) => Output::Entity(id),
                None => bail!("entity `{}` produced no instance", entity.entity_type()),
            },
            MappingNode::Embedded(embedded) => {
                Output::Embedded(self.visit_embedded(embedded, row)?)
            }
            MappingNode::Compound(compound) => Output::Compound(
                compound
                    .elements()
                    .iter()
                    .map(|element| self.visit_node(element, row))
                    .collect::<Result<_>>()?,
            ),
            MappingNode::Tuple(tuple) => {
                let aliases = self.plans.tuple_aliases(tuple);
                let elements = tuple
                    .elements()
                    .iter()
                    .map(|element| self.visit_node(element.node(), row))
                    .collect::<Result<_>>()?;

                Output::Tuple(TupleValue { aliases, elements })
            }
        })
    }

    /// Resolves the instance an entity node refers to on this row.
    ///
    /// A null identifier column means there is no instance. That is an error
    /// when `required`, and an absent association otherwise.
    fn visit_entity(
        &mut self,
        entity: &'a Entity,
        row: &Row,
        required: bool,
    ) -> Result<Option<InstanceId>> {
        let plan = self.plans.entity(entity)?;
        let mut identifier = Vec::with_capacity(plan.identifier.len());

        for part in &plan.identifier {
            let value = self.column(row, &part.column)?;

            if value.is_null() {
                if required {
                    return Err(Error::missing_identifier(
                        entity.entity_type().as_str(),
                        part.column.as_str(),
                    ));
                }
                return Ok(None);
            }

            identifier.push(part.ty.coerce(Some(&part.column), value.clone())?);
        }

        let discriminator = match entity.discriminator_column() {
            Some(column) => Some(self.column(row, column)?.clone()),
            None => None,
        };

        let key = IdentityKey::new(entity.entity_type(), identifier);
        let (id, is_new) = self.registry.get_or_create(key, Instance::new);

        if is_new {
            tracing::trace!(
                entity = %entity.entity_type(),
                identifier = %self.registry.get(id).key(),
                "new instance"
            );
        }

        let slots = self.visit_members(entity.members(), row)?;
        self.registry.merge(id, discriminator, slots)?;

        Ok(Some(id))
    }

    fn visit_members(&mut self, members: &'a [Member], row: &Row) -> Result<Slots> {
        let mut slots = Slots::with_capacity(members.len());

        for member in members {
            let slot = match member {
                Member::Field(field) => {
                    Slot::Value(self.read(row, field.column_name(), field.target_type())?)
                }
                Member::Embedded(embedded) => Slot::Embedded(self.visit_embedded(embedded, row)?),
                Member::Association(association) => self.visit_association(association, row)?,
            };

            slots.insert(member.member_name().to_string(), slot);
        }

        Ok(slots)
    }

    /// Embedded values are built fresh from every row and never shared.
    fn visit_embedded(&mut self, embedded: &'a Embedded, row: &Row) -> Result<EmbeddedValue> {
        let slots = self.visit_members(embedded.fields(), row)?;
        Ok(EmbeddedValue::new(embedded.embeddable_type().clone(), slots))
    }

    fn visit_association(&mut self, association: &'a Association, row: &Row) -> Result<Slot> {
        let target = if self.is_join_null(association, row)? {
            None
        } else {
            self.visit_entity(association.target(), row, false)?
        };

        Ok(if association.is_plural() {
            Slot::Many(target.into_iter().collect())
        } else {
            Slot::One(target)
        })
    }

    fn is_join_null(&self, association: &Association, row: &Row) -> Result<bool> {
        for column in association.join_column_names() {
            if !self.column(row, column)?.is_null() {
                return Ok(false);
            }
        }

        Ok(true)
    }

    fn read(&self, row: &Row, column: &str, ty: &Type) -> Result<Value> {
        ty.coerce(Some(column), self.column(row, column)?.clone())
    }

    fn column<'r>(&self, row: &'r Row, column: &str) -> Result<&'r Value> {
        let value = match self.options.column_case {
            ColumnCase::Sensitive => row.get(column),
            ColumnCase::Insensitive => row.get_ignore_ascii_case(column),
        };

        value.ok_or_else(|| Error::missing_column(column))
    }
}
