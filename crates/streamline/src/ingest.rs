//! Reading source files from disk into a workspace
//!
//! This is the only place that touches the filesystem on the input side.
//! Paths whose extension is not accepted by the configuration are skipped
//! with a warning; directories contribute their accepted direct children in
//! name order.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, warn};

use crate::{config::Config, types::FileId, workspace::Workspace};

/// Display name used for a file: its final path component
pub fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

fn expand_directory(dir: &Path, config: &Config) -> Result<Vec<PathBuf>> {
    let mut children = Vec::new();
    for entry in std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory {}", dir.display()))?
    {
        let path = entry?.path();
        if path.is_file() && config.accepts(&path) {
            children.push(path);
        }
    }
    children.sort();
    debug!(
        "Directory {} contributes {} files",
        dir.display(),
        children.len()
    );
    Ok(children)
}

/// Resolve command line paths into the ordered list of files to ingest
pub fn collect_paths(paths: &[PathBuf], config: &Config) -> Result<Vec<PathBuf>> {
    let mut collected = Vec::new();
    for path in paths {
        if path.is_dir() {
            collected.extend(expand_directory(path, config)?);
        } else if config.accepts(path) {
            collected.push(path.clone());
        } else {
            warn!(
                "Skipping {}: extension not in {:?}",
                path.display(),
                config.extensions
            );
        }
    }
    Ok(collected)
}

/// Read every accepted path into `workspace`, preserving order
pub fn load_files(
    workspace: &mut Workspace,
    paths: &[PathBuf],
    config: &Config,
) -> Result<Vec<FileId>> {
    let mut ids = Vec::new();
    for path in collect_paths(paths, config)? {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read source file {}", path.display()))?;
        debug!("Read {} ({} bytes)", path.display(), content.len());
        ids.push(workspace.add_file(display_name(&path), content));
    }
    Ok(ids)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_ingest_skips_unaccepted_extensions() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let shape = temp_dir.path().join("shape.dart");
        let notes = temp_dir.path().join("notes.txt");
        fs::write(&shape, "class Shape {}\n")?;
        fs::write(&notes, "class NotDart {}\n")?;

        let mut workspace = Workspace::new();
        let ids = load_files(&mut workspace, &[notes, shape], &Config::default())?;

        assert_eq!(ids.len(), 1);
        assert_eq!(workspace.files()[0].name(), "shape.dart");
        assert_eq!(workspace.files()[0].content(), "class Shape {}\n");
        Ok(())
    }

    #[test]
    fn test_directory_children_sorted_by_name() -> Result<()> {
        let temp_dir = TempDir::new()?;
        fs::write(temp_dir.path().join("b.dart"), "")?;
        fs::write(temp_dir.path().join("a.dart"), "")?;
        fs::write(temp_dir.path().join("c.md"), "")?;
        fs::create_dir(temp_dir.path().join("nested.dart"))?;

        let paths = collect_paths(&[temp_dir.path().to_path_buf()], &Config::default())?;
        let names: Vec<_> = paths.iter().map(|p| display_name(p)).collect();
        assert_eq!(names, vec!["a.dart", "b.dart"]);
        Ok(())
    }

    #[test]
    fn test_explicit_order_is_preserved() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let z = temp_dir.path().join("z.dart");
        let a = temp_dir.path().join("a.dart");
        fs::write(&z, "")?;
        fs::write(&a, "")?;

        let mut workspace = Workspace::new();
        load_files(&mut workspace, &[z, a], &Config::default())?;
        let names: Vec<_> = workspace.files().iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["z.dart", "a.dart"]);
        Ok(())
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut workspace = Workspace::new();
        let err = load_files(
            &mut workspace,
            &[PathBuf::from("/nonexistent/missing.dart")],
            &Config::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("missing.dart"), "{err}");
    }
}
