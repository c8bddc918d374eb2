//! Import deduplication and canonical ordering
//!
//! The first statement seen for an identity key wins and keeps its raw text.
//! Survivors are ordered platform, then external packages, then relative
//! paths, and by path within each origin.

use log::debug;

use crate::{
    import_recognizer::{ImportKey, ImportStatement},
    types::FxIndexMap,
};

/// Drop later duplicates, keeping first-seen order
pub fn deduplicate(imports: impl IntoIterator<Item = ImportStatement>) -> Vec<ImportStatement> {
    let mut unique: FxIndexMap<ImportKey, ImportStatement> = FxIndexMap::default();
    let mut dropped = 0usize;

    for import in imports {
        let key = import.identity_key();
        if unique.contains_key(&key) {
            dropped += 1;
            continue;
        }
        unique.insert(key, import);
    }

    if dropped > 0 {
        debug!("Dropped {dropped} duplicate import statements");
    }
    unique.into_values().collect()
}

/// Stable sort by origin precedence, then byte-wise path
pub fn sort_imports(imports: &mut [ImportStatement]) {
    imports.sort_by(|a, b| a.origin.cmp(&b.origin).then_with(|| a.path.cmp(&b.path)));
}

/// Deduplicate and order a batch of imports gathered from any number of files
pub fn normalize(imports: impl IntoIterator<Item = ImportStatement>) -> Vec<ImportStatement> {
    let mut normalized = deduplicate(imports);
    sort_imports(&mut normalized);
    normalized
}
