use crate::graph::{merge_slot, Conflict, IdentityKey, Instance, InstanceId, Slot, Slots};
use hydrate_core::{Error, Result, Value};

use indexmap::IndexSet;
use std::collections::HashMap;

/// Identity map for one materialization pass.
///
/// Instances live in an arena and reference each other by [`InstanceId`].
/// Every identity key maps to exactly one instance for the lifetime of the
/// registry.
#[derive(Debug, Default)]
pub(crate) struct IdentityRegistry {
    instances: Vec<Instance>,
    index: HashMap<IdentityKey, InstanceId>,
}

impl IdentityRegistry {
    /// Returns the instance registered under `key`, allocating it first if
    /// the key has not been seen. The flag is `true` for a new instance.
    pub(crate) fn get_or_create(
        &mut self,
        key: IdentityKey,
        allocate: impl FnOnce(IdentityKey) -> Instance,
    ) -> (InstanceId, bool) {
        if let Some(id) = self.index.get(&key) {
            return (*id, false);
        }

        let id = InstanceId(self.instances.len());
        self.index.insert(key.clone(), id);
        self.instances.push(allocate(key));
        (id, true)
    }

    pub(crate) fn get(&self, id: InstanceId) -> &Instance {
        &self.instances[id.0]
    }

    pub(crate) fn len(&self) -> usize {
        self.instances.len()
    }

    /// Appends `child` to the to-many member of `parent` unless it is already
    /// present. Returns `true` if the child was appended.
    pub(crate) fn append_to_plural(
        &mut self,
        parent: InstanceId,
        member: &str,
        child: InstanceId,
    ) -> Result<bool> {
        let instance = &mut self.instances[parent.0];

        match plural_slot(&mut instance.slots, member) {
            Some(children) => Ok(children.insert(child)),
            None => Err(inconsistent(&instance.key, Conflict(member.to_string()))),
        }
    }

    /// Sets the to-one member of `parent`. Assigning the same target again is
    /// a no-op; assigning a different target, or flipping between present and
    /// absent, is an inconsistent row.
    pub(crate) fn assign_to_one(
        &mut self,
        parent: InstanceId,
        member: &str,
        child: Option<InstanceId>,
    ) -> Result<()> {
        let instance = &mut self.instances[parent.0];

        merge_slot(&mut instance.slots, member.to_string(), Slot::One(child))
            .map_err(|conflict| inconsistent(&instance.key, conflict))
    }

    /// Folds the member values read from one row into the instance.
    pub(crate) fn merge(
        &mut self,
        id: InstanceId,
        discriminator: Option<Value>,
        fresh: Slots,
    ) -> Result<()> {
        {
            let instance = &mut self.instances[id.0];
            instance
                .merge_discriminator(discriminator)
                .map_err(|conflict| inconsistent(&instance.key, conflict))?;
        }

        for (member, slot) in fresh {
            match slot {
                Slot::One(child) => self.assign_to_one(id, &member, child)?,
                Slot::Many(children) => {
                    let instance = &mut self.instances[id.0];
                    if plural_slot(&mut instance.slots, &member).is_none() {
                        return Err(inconsistent(&instance.key, Conflict(member)));
                    }

                    for child in children {
                        self.append_to_plural(id, &member, child)?;
                    }
                }
                slot => {
                    let instance = &mut self.instances[id.0];
                    merge_slot(&mut instance.slots, member, slot)
                        .map_err(|conflict| inconsistent(&instance.key, conflict))?;
                }
            }
        }

        Ok(())
    }

    pub(crate) fn into_instances(self) -> Vec<Instance> {
        self.instances
    }
}

fn plural_slot<'a>(slots: &'a mut Slots, member: &str) -> Option<&'a mut IndexSet<InstanceId>> {
    if !slots.contains_key(member) {
        slots.insert(member.to_string(), Slot::Many(IndexSet::new()));
    }

    match slots.get_mut(member) {
        Some(Slot::Many(children)) => Some(children),
        _ => None,
    }
}

fn inconsistent(key: &IdentityKey, Conflict(member): Conflict) -> Error {
    Error::inconsistent_row(key.entity_type().as_str(), key.to_string(), member)
}
