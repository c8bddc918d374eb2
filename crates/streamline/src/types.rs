//! Shared type definitions for the streamline crate
//!
//! This module contains the value types that flow between the recognizer,
//! the extractor, the normalizer and the assembler.

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxHasher;

/// Type alias for FxHasher-based IndexMap
pub type FxIndexMap<K, V> = IndexMap<K, V, std::hash::BuildHasherDefault<FxHasher>>;

/// Type alias for FxHasher-based IndexSet
pub type FxIndexSet<T> = IndexSet<T, std::hash::BuildHasherDefault<FxHasher>>;

/// Unique identifier of a file inside a [`crate::workspace::Workspace`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(u32);

impl FileId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn as_u32(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for FileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A source file handed to the engine by the ingestion layer
///
/// The content is fully decoded text. Nothing in the engine mutates it;
/// every analysis output is a new value derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    id: FileId,
    name: String,
    content: String,
    size: usize,
}

impl SourceFile {
    pub fn new(id: FileId, name: impl Into<String>, content: impl Into<String>) -> Self {
        let content = content.into();
        Self {
            id,
            name: name.into(),
            size: content.len(),
            content,
        }
    }

    pub fn id(&self) -> FileId {
        self.id
    }

    /// Display name, used in source markers and conflict reports
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Size of the content in bytes
    pub fn size(&self) -> usize {
        self.size
    }
}

/// Classification of an import path based on its prefix
///
/// The declaration order is the canonical ordering of the merged import
/// block, so the derived `Ord` is load-bearing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ImportOrigin {
    /// Libraries shipped with the SDK (`dart:core`, `dart:math`)
    Platform,

    /// Libraries resolved through the package system (`package:foo/foo.dart`)
    ExternalPackage,

    /// Anything else, usually a path relative to the importing file
    Relative,
}

impl ImportOrigin {
    pub const PLATFORM_PREFIX: &'static str = "dart:";
    pub const PACKAGE_PREFIX: &'static str = "package:";

    /// Classify a resolved import path. Purely prefix based.
    pub fn classify(path: &str) -> Self {
        if path.starts_with(Self::PLATFORM_PREFIX) {
            Self::Platform
        } else if path.starts_with(Self::PACKAGE_PREFIX) {
            Self::ExternalPackage
        } else {
            Self::Relative
        }
    }
}

impl std::fmt::Display for ImportOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Platform => write!(f, "platform"),
            Self::ExternalPackage => write!(f, "external-package"),
            Self::Relative => write!(f, "relative"),
        }
    }
}

/// Category of a top-level declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Class,
    Enum,
    Mixin,
    Extension,
    Function,
    TypeAlias,
    Other,
}

impl DeclarationKind {
    /// Keywords that introduce a declaration header at the start of a line,
    /// in scan order
    pub const KEYWORDS: [(&'static str, Self); 5] = [
        ("class", Self::Class),
        ("enum", Self::Enum),
        ("mixin", Self::Mixin),
        ("extension", Self::Extension),
        ("typedef", Self::TypeAlias),
    ];
}

impl std::fmt::Display for DeclarationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Class => write!(f, "class"),
            Self::Enum => write!(f, "enum"),
            Self::Mixin => write!(f, "mixin"),
            Self::Extension => write!(f, "extension"),
            Self::Function => write!(f, "function"),
            Self::TypeAlias => write!(f, "type-alias"),
            Self::Other => write!(f, "other"),
        }
    }
}
