//! Top-level declaration extraction
//!
//! Declarations are found by anchoring each known keyword at the start of a
//! line. Scopes are not tracked, so a keyword at column zero inside a string
//! or a block comment is reported too.

use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    import_recognizer::strip_imports,
    types::{DeclarationKind, SourceFile},
};

/// Reserved name of the program entry point
pub const ENTRY_POINT_NAME: &str = "main";

static DECLARATION_PATTERNS: Lazy<Vec<(DeclarationKind, Regex)>> = Lazy::new(|| {
    DeclarationKind::KEYWORDS
        .iter()
        .map(|(keyword, kind)| {
            let pattern = format!(r"(?m)^{keyword}\s+([A-Za-z0-9_$]+)");
            (
                *kind,
                Regex::new(&pattern).expect("declaration pattern is valid"),
            )
        })
        .collect()
});

/// `main(` with or without a leading `void`. Matched as a plain substring, so
/// `domain(` counts too.
const ENTRY_POINT_SIGNATURE: &str = "main(";

/// A top-level declaration header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: String,
    /// Display name of the file the header was found in
    pub source_file: String,
}

impl Declaration {
    pub fn is_entry_point(&self) -> bool {
        self.name == ENTRY_POINT_NAME
    }
}

/// Extract declaration headers from a single file
///
/// Results are grouped by keyword (all classes, then all enums, ...), each
/// group in source order, followed by at most one synthetic `main`.
pub fn extract_declarations(file: &SourceFile) -> Vec<Declaration> {
    let cleaned = strip_imports(file.content());
    let mut declarations = Vec::new();

    for (kind, pattern) in DECLARATION_PATTERNS.iter() {
        for caps in pattern.captures_iter(&cleaned) {
            let Some(name) = caps.get(1) else {
                continue;
            };
            declarations.push(Declaration {
                kind: *kind,
                name: name.as_str().to_owned(),
                source_file: file.name().to_owned(),
            });
        }
    }

    if cleaned.contains(ENTRY_POINT_SIGNATURE) {
        declarations.push(Declaration {
            kind: DeclarationKind::Function,
            name: ENTRY_POINT_NAME.to_owned(),
            source_file: file.name().to_owned(),
        });
    }

    trace!(
        "Extracted {} declarations from {}",
        declarations.len(),
        file.name()
    );
    declarations
}
