//! Merge several Dart library files into a single file.
//!
//! The engine is pattern based: imports and top-level declaration headers are
//! recognized with regular expressions, not parsed. [`analyze_files`] reports
//! cross-file name collisions and the deduplicated import set; [`merge`]
//! concatenates the files behind one sorted import block.

pub mod analysis;
pub mod config;
pub mod declarations;
pub mod import_normalizer;
pub mod import_recognizer;
pub mod ingest;
pub mod merge;
pub mod report;
pub mod types;
pub mod workspace;

pub use analysis::{AnalysisResult, Conflict, Severity, analyze_files};
pub use merge::{MergeAssembler, MergeMode, merge};
pub use types::{FileId, SourceFile};
