//! Merge assembly and the merge-mode gate
//!
//! The assembler never looks at conflicts. Whether a merge may proceed is the
//! caller's decision, made through [`MergeMode`] before calling [`merge`].

use std::fmt::Write as _;

use anyhow::{Result, bail};
use log::debug;
use serde::Deserialize;

use crate::{
    analysis::AnalysisResult,
    import_normalizer::sort_imports,
    import_recognizer::strip_imports,
    types::{ImportOrigin, SourceFile},
};

/// Provenance comment written at the top of every merged file
pub const DEFAULT_HEADER: &str = "// Merged via DartStreamline";

/// Policy deciding whether error-severity conflicts block a merge
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MergeMode {
    /// Refuse to merge while the entry point is declared in several files
    Strict,
    /// Always merge, duplicates included
    #[default]
    Lenient,
}

impl MergeMode {
    /// Whether `analysis` may be merged under this mode
    pub fn permits(self, analysis: &AnalysisResult) -> bool {
        match self {
            Self::Strict => !analysis.has_errors(),
            Self::Lenient => true,
        }
    }

    /// Like [`MergeMode::permits`], with the blocking conflicts in the error
    pub fn check(self, analysis: &AnalysisResult) -> Result<()> {
        if self.permits(analysis) {
            return Ok(());
        }
        let blocking: Vec<String> = analysis.errors().map(ToString::to_string).collect();
        bail!(
            "{} merge refused because of {} blocking conflict(s):\n  {}",
            self,
            blocking.len(),
            blocking.join("\n  ")
        )
    }
}

impl std::fmt::Display for MergeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strict => write!(f, "strict"),
            Self::Lenient => write!(f, "lenient"),
        }
    }
}

impl std::str::FromStr for MergeMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "lenient" => Ok(Self::Lenient),
            other => bail!("unknown merge mode '{other}', expected 'strict' or 'lenient'"),
        }
    }
}

/// Assembles merged text from files and their analysis
#[derive(Debug, Clone)]
pub struct MergeAssembler<'a> {
    header: &'a str,
}

impl Default for MergeAssembler<'_> {
    fn default() -> Self {
        Self::with_header(DEFAULT_HEADER)
    }
}

impl<'a> MergeAssembler<'a> {
    pub fn with_header(header: &'a str) -> Self {
        Self { header }
    }

    /// Build the merged text
    ///
    /// Layout: header, blank line, import block (one blank line between origin
    /// groups), blank line, then one marked block per file in the given order.
    pub fn assemble(&self, files: &[SourceFile], analysis: &AnalysisResult) -> String {
        let mut imports = analysis.imports.clone();
        sort_imports(&mut imports);

        let mut output = String::new();
        output.push_str(self.header);
        output.push_str("\n\n");

        let mut previous_origin: Option<ImportOrigin> = None;
        for import in &imports {
            if previous_origin.is_some_and(|origin| origin != import.origin) {
                output.push('\n');
            }
            output.push_str(&import.raw);
            output.push('\n');
            previous_origin = Some(import.origin);
        }
        output.push('\n');

        for file in files {
            let body = strip_imports(file.content());
            // Writing to a String cannot fail
            let _ = writeln!(output, "// --- Source: {} ---", file.name());
            output.push_str(body.trim());
            output.push_str("\n\n");
        }

        debug!(
            "Assembled {} bytes from {} files and {} imports",
            output.len(),
            files.len(),
            imports.len()
        );
        output
    }
}

/// Merge `files` in the given order using the default header
pub fn merge(files: &[SourceFile], analysis: &AnalysisResult) -> String {
    MergeAssembler::default().assemble(files, analysis)
}
