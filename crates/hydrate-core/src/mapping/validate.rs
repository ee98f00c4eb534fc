use super::Member;
use crate::{Error, Result};

use std::collections::HashSet;

pub(super) fn name(what: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(Error::invalid_mapping(format!("{what} must not be empty")));
    }
    Ok(())
}

/// Checks the members of an entity or embeddable named `owner`.
pub(super) fn members(owner: &str, members: &[Member]) -> Result<()> {
    let mut seen = HashSet::with_capacity(members.len());

    for member in members {
        let member_name = member.member_name();
        name(&format!("member name in `{owner}`"), member_name)?;

        if !seen.insert(member_name) {
            return Err(Error::invalid_mapping(format!(
                "`{owner}` declares member `{member_name}` more than once"
            )));
        }

        match member {
            Member::Field(field) => {
                name(
                    &format!("column name of `{owner}.{member_name}`"),
                    field.column_name(),
                )?;
            }
            Member::Association(association) => {
                if association.join_column_names().is_empty() {
                    return Err(Error::invalid_mapping(format!(
                        "association `{owner}.{member_name}` has no join columns"
                    )));
                }

                for column in association.join_column_names() {
                    name(
                        &format!("join column name of `{owner}.{member_name}`"),
                        column,
                    )?;
                }
            }
            // Validated by its own builder.
            Member::Embedded(_) => {}
        }
    }

    Ok(())
}
