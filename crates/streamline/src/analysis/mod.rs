//! Analysis of a file collection
//!
//! `analyze_files` is the single analysis entry point. It recognizes imports,
//! extracts declarations, detects cross-file conflicts and normalizes the
//! import set. The result is a fresh value every time; nothing is cached here.

pub mod conflict_detector;

pub use conflict_detector::detect_conflicts;
use log::{debug, info};

use crate::{
    declarations::{Declaration, extract_declarations},
    import_normalizer::normalize,
    import_recognizer::{ImportStatement, recognize_imports},
    types::{DeclarationKind, SourceFile},
};

/// How serious a conflict is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Advisory only, never blocks a merge
    Warning,
    /// Entry-point collision, blocks a strict merge
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A declaration name found in two or more files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub name: String,

    /// Kind of the first declaration seen with this name
    pub kind: DeclarationKind,

    /// Distinct file names in first-seen order, always at least two
    pub sources: Vec<String>,

    pub severity: Severity,
}

impl Conflict {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Conflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} `{}` declared in {}",
            self.severity,
            self.kind,
            self.name,
            self.sources.join(", ")
        )
    }
}

/// Results from analyzing a file collection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalysisResult {
    /// Deduplicated imports in canonical order
    pub imports: Vec<ImportStatement>,

    /// Every declaration found, duplicates included
    pub declarations: Vec<Declaration>,

    pub conflicts: Vec<Conflict>,

    /// Free-form diagnostics; no analysis step produces any yet
    pub warnings: Vec<String>,
}

/// Counts displayed alongside an analysis
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalysisSummary {
    pub files: usize,
    pub imports: usize,
    pub declarations: usize,
    pub conflicts: usize,
    pub errors: usize,
}

impl AnalysisResult {
    /// Whether any conflict has error severity
    pub fn has_errors(&self) -> bool {
        self.conflicts.iter().any(Conflict::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Conflict> {
        self.conflicts.iter().filter(|c| c.is_error())
    }

    pub fn summary(&self, files: usize) -> AnalysisSummary {
        AnalysisSummary {
            files,
            imports: self.imports.len(),
            declarations: self.declarations.len(),
            conflicts: self.conflicts.len(),
            errors: self.errors().count(),
        }
    }
}

/// Analyze every file, in the order given
///
/// An empty collection yields empty lists.
pub fn analyze_files(files: &[SourceFile]) -> AnalysisResult {
    debug!("Analyzing {} files", files.len());

    let mut imports = Vec::new();
    let mut declarations = Vec::new();
    for file in files {
        let file_imports = recognize_imports(file.content());
        let file_declarations = extract_declarations(file);
        debug!(
            "{}: {} imports, {} declarations",
            file.name(),
            file_imports.len(),
            file_declarations.len()
        );
        imports.extend(file_imports);
        declarations.extend(file_declarations);
    }

    let conflicts = detect_conflicts(&declarations);
    let imports = normalize(imports);

    info!(
        "Analysis complete: {} unique imports, {} declarations, {} conflicts",
        imports.len(),
        declarations.len(),
        conflicts.len()
    );

    AnalysisResult {
        imports,
        declarations,
        conflicts,
        warnings: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::types::FileId;

    fn files(sources: &[(&str, &str)]) -> Vec<SourceFile> {
        sources
            .iter()
            .zip(0u32..)
            .map(|((name, content), id)| SourceFile::new(FileId::new(id), *name, *content))
            .collect()
    }

    #[test]
    fn test_empty_collection() {
        let result = analyze_files(&[]);
        assert_eq!(result, AnalysisResult::default());
        assert!(!result.has_errors());
    }

    #[test]
    fn test_declarations_are_not_deduplicated() {
        let files = files(&[
            ("a.dart", "class Shape {}\n"),
            ("b.dart", "class Shape {}\n"),
        ]);
        let result = analyze_files(&files);
        assert_eq!(result.declarations.len(), 2);
        assert_eq!(result.conflicts.len(), 1);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_imports_are_normalized() {
        let files = files(&[
            ("a.dart", "import 'b.dart';\nimport 'dart:math';\n"),
            ("b.dart", "import 'dart:math';\nimport 'package:x/x.dart';\n"),
        ]);
        let paths: Vec<_> = analyze_files(&files)
            .imports
            .into_iter()
            .map(|i| i.path)
            .collect();
        assert_eq!(paths, vec!["dart:math", "package:x/x.dart", "b.dart"]);
    }

    #[test]
    fn test_summary_counts() {
        let files = files(&[
            ("a.dart", "import 'dart:io';\nclass A {}\nvoid main() {}\n"),
            ("b.dart", "import 'dart:io';\nclass A {}\nvoid main() {}\n"),
        ]);
        let result = analyze_files(&files);
        assert_eq!(
            result.summary(files.len()),
            AnalysisSummary {
                files: 2,
                imports: 1,
                declarations: 4,
                conflicts: 2,
                errors: 1,
            }
        );
    }

    #[test]
    fn test_conflict_display() {
        let conflict = Conflict {
            name: "main".to_owned(),
            kind: DeclarationKind::Function,
            sources: vec!["a.dart".to_owned(), "b.dart".to_owned()],
            severity: Severity::Error,
        };
        assert_snapshot!(conflict.to_string(), @"error: function `main` declared in a.dart, b.dart");
    }
}
