//! Cross-file name collision detection
//!
//! Declarations are grouped by name into the ordered set of files that declare
//! them. A name that lives in two or more files is a conflict.

use log::{debug, trace};

use crate::{
    analysis::{Conflict, Severity},
    declarations::Declaration,
    types::{DeclarationKind, FxIndexMap, FxIndexSet},
};

/// Per-name aggregation state
struct NameMembership<'a> {
    /// Kind of the first declaration seen with this name
    kind: DeclarationKind,
    entry_point: bool,
    files: FxIndexSet<&'a str>,
}

/// Detect names declared in more than one file
///
/// Conflicts come out in the order their names were first seen. Declaring a
/// name twice inside one file is not a conflict.
pub fn detect_conflicts(declarations: &[Declaration]) -> Vec<Conflict> {
    let mut memberships: FxIndexMap<&str, NameMembership<'_>> = FxIndexMap::default();

    for declaration in declarations {
        memberships
            .entry(declaration.name.as_str())
            .or_insert_with(|| NameMembership {
                kind: declaration.kind,
                entry_point: declaration.is_entry_point(),
                files: FxIndexSet::default(),
            })
            .files
            .insert(declaration.source_file.as_str());
    }

    let conflicts: Vec<Conflict> = memberships
        .into_iter()
        .filter(|(_, membership)| membership.files.len() > 1)
        .map(|(name, membership)| {
            let severity = if membership.entry_point {
                Severity::Error
            } else {
                Severity::Warning
            };
            trace!(
                "Found conflict for '{}' across {} files",
                name,
                membership.files.len()
            );
            Conflict {
                name: name.to_owned(),
                kind: membership.kind,
                sources: membership.files.into_iter().map(str::to_owned).collect(),
                severity,
            }
        })
        .collect();

    debug!("Detected {} declaration conflicts", conflicts.len());
    conflicts
}
