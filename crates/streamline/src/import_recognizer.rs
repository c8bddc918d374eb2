//! Import statement recognition
//!
//! Imports are matched with a single pattern rather than parsed. A statement
//! that does not fit the pattern (unterminated string, missing `;`) is simply
//! not recognized: it stays in the body text and never reaches the import
//! block. Nothing here reports an error.

use std::borrow::Cow;

use log::trace;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::ImportOrigin;

/// `import '<path>' [as <ident>] [show <list>] [hide <list>];`
///
/// The `show` list is matched lazily so that a following `hide` clause is not
/// swallowed into it.
static IMPORT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"import\s+['"]([^'"]+)['"](?:\s+as\s+([A-Za-z0-9_$]+))?(?:\s+show\s+([^;]+?))?(?:\s+hide\s+([^;]+))?\s*;"#,
    )
    .expect("import pattern is valid")
});

/// A recognized import statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStatement {
    /// The statement exactly as it appeared in the source
    pub raw: String,
    /// Library path between the quotes
    pub path: String,
    /// Prefix introduced by `as`
    pub alias: Option<String>,
    /// Names introduced by `show`; `None` when the clause is absent
    pub show: Option<Vec<String>>,
    /// Names introduced by `hide`; `None` when the clause is absent
    pub hide: Option<Vec<String>>,
    pub origin: ImportOrigin,
}

/// Composite identity of an import: two statements with equal keys import the
/// same names under the same prefix, whatever their spelling
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImportKey {
    path: String,
    alias: String,
    show: String,
    hide: String,
}

impl ImportStatement {
    pub fn identity_key(&self) -> ImportKey {
        fn joined(list: Option<&Vec<String>>) -> String {
            list.map(|names| names.join(",")).unwrap_or_default()
        }

        ImportKey {
            path: self.path.clone(),
            alias: self.alias.clone().unwrap_or_default(),
            show: joined(self.show.as_ref()),
            hide: joined(self.hide.as_ref()),
        }
    }
}

fn split_names(list: &str) -> Vec<String> {
    list.split(',').map(|name| name.trim().to_owned()).collect()
}

/// Find every import statement in `text`, in source order
pub fn recognize_imports(text: &str) -> Vec<ImportStatement> {
    let imports: Vec<ImportStatement> = IMPORT_PATTERN
        .captures_iter(text)
        .filter_map(|caps| {
            let raw = caps.get(0)?.as_str();
            let path = caps.get(1)?.as_str();
            Some(ImportStatement {
                raw: raw.to_owned(),
                path: path.to_owned(),
                alias: caps.get(2).map(|m| m.as_str().to_owned()),
                show: caps.get(3).map(|m| split_names(m.as_str())),
                hide: caps.get(4).map(|m| split_names(m.as_str())),
                origin: ImportOrigin::classify(path),
            })
        })
        .collect();

    trace!("Recognized {} import statements", imports.len());
    imports
}

/// Remove every recognized import statement from `text`
///
/// Unrecognized import-like text is left untouched.
pub fn strip_imports(text: &str) -> Cow<'_, str> {
    IMPORT_PATTERN.replace_all(text, "")
}
