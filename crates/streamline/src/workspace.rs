//! Ordered file collection with cached analysis and merge output
//!
//! Every change to the collection (add, remove, reorder, reset) drops the
//! cached analysis and merged text, so a stale result can never be merged.

use anyhow::{Result, anyhow, bail};
use log::debug;

use crate::{
    analysis::{AnalysisResult, analyze_files},
    merge::{MergeAssembler, MergeMode},
    types::{FileId, SourceFile},
};

#[derive(Debug, Default)]
pub struct Workspace {
    files: Vec<SourceFile>,
    next_id: u32,
    analysis: Option<AnalysisResult>,
    merged: Option<String>,
}

impl Workspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a file at the end of the merge order
    pub fn add_file(&mut self, name: impl Into<String>, content: impl Into<String>) -> FileId {
        let id = FileId::new(self.next_id);
        self.next_id += 1;
        self.files.push(SourceFile::new(id, name, content));
        self.invalidate();
        id
    }

    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    fn position(&self, id: FileId) -> Result<usize> {
        self.files
            .iter()
            .position(|file| file.id() == id)
            .ok_or_else(|| anyhow!("No file with id {id} in workspace"))
    }

    pub fn remove(&mut self, id: FileId) -> Result<SourceFile> {
        let index = self.position(id)?;
        let file = self.files.remove(index);
        self.invalidate();
        Ok(file)
    }

    /// Swap a file with its predecessor. Returns `false` if it is already first.
    pub fn move_up(&mut self, id: FileId) -> Result<bool> {
        let index = self.position(id)?;
        if index == 0 {
            return Ok(false);
        }
        self.files.swap(index, index - 1);
        self.invalidate();
        Ok(true)
    }

    /// Swap a file with its successor. Returns `false` if it is already last.
    pub fn move_down(&mut self, id: FileId) -> Result<bool> {
        let index = self.position(id)?;
        if index + 1 >= self.files.len() {
            return Ok(false);
        }
        self.files.swap(index, index + 1);
        self.invalidate();
        Ok(true)
    }

    /// Replace the merge order; `order` must name every file exactly once
    pub fn reorder(&mut self, order: &[FileId]) -> Result<()> {
        if order.len() != self.files.len() {
            bail!(
                "Reorder lists {} files but the workspace holds {}",
                order.len(),
                self.files.len()
            );
        }
        let mut reordered = Vec::with_capacity(order.len());
        for id in order {
            if reordered.iter().any(|file: &SourceFile| file.id() == *id) {
                bail!("File {id} appears twice in reorder list");
            }
            let index = self.position(*id)?;
            reordered.push(self.files[index].clone());
        }
        self.files = reordered;
        self.invalidate();
        Ok(())
    }

    /// Drop every file and cached output
    pub fn reset(&mut self) {
        self.files.clear();
        self.invalidate();
    }

    /// Run analysis over the current files, replacing any previous result
    pub fn analyze(&mut self) -> &AnalysisResult {
        self.merged = None;
        self.analysis.insert(analyze_files(&self.files))
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    /// Merge the current files, gated by `mode`
    ///
    /// Fails if no analysis is current or if `mode` refuses it.
    pub fn merge(&mut self, assembler: &MergeAssembler<'_>, mode: MergeMode) -> Result<&str> {
        let Some(analysis) = self.analysis.as_ref() else {
            bail!("Workspace has no current analysis; analyze before merging");
        };
        mode.check(analysis)?;
        let merged = assembler.assemble(&self.files, analysis);
        Ok(self.merged.insert(merged).as_str())
    }

    pub fn merged(&self) -> Option<&str> {
        self.merged.as_deref()
    }

    fn invalidate(&mut self) {
        if self.analysis.is_some() || self.merged.is_some() {
            debug!("Workspace changed, discarding cached analysis and merge output");
        }
        self.analysis = None;
        self.merged = None;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn names(workspace: &Workspace) -> Vec<&str> {
        workspace.files().iter().map(SourceFile::name).collect()
    }

    fn workspace_with(files: &[(&str, &str)]) -> (Workspace, Vec<FileId>) {
        let mut workspace = Workspace::new();
        let ids = files
            .iter()
            .map(|(name, content)| workspace.add_file(*name, *content))
            .collect();
        (workspace, ids)
    }

    #[test]
    fn test_ids_are_unique_after_removal() {
        let (mut workspace, ids) = workspace_with(&[("a.dart", ""), ("b.dart", "")]);
        workspace.remove(ids[0]).unwrap();
        let c = workspace.add_file("c.dart", "");
        assert_ne!(c, ids[0]);
        assert_ne!(c, ids[1]);
        assert_eq!(names(&workspace), vec!["b.dart", "c.dart"]);
    }

    #[test]
    fn test_move_at_bounds_is_noop() {
        let (mut workspace, ids) = workspace_with(&[("a.dart", ""), ("b.dart", "")]);
        workspace.analyze();
        assert!(!workspace.move_up(ids[0]).unwrap());
        assert!(!workspace.move_down(ids[1]).unwrap());
        // Nothing changed, so the analysis is still current
        assert!(workspace.analysis().is_some());

        assert!(workspace.move_down(ids[0]).unwrap());
        assert_eq!(names(&workspace), vec!["b.dart", "a.dart"]);
        assert!(workspace.analysis().is_none());
    }

    #[test]
    fn test_changes_invalidate_outputs() {
        let (mut workspace, ids) = workspace_with(&[("a.dart", "class A {}")]);
        workspace.analyze();
        workspace
            .merge(&MergeAssembler::default(), MergeMode::Lenient)
            .unwrap();
        assert!(workspace.merged().is_some());

        workspace.add_file("b.dart", "class B {}");
        assert!(workspace.analysis().is_none());
        assert!(workspace.merged().is_none());

        workspace.analyze();
        workspace.remove(ids[0]).unwrap();
        assert!(workspace.analysis().is_none());

        workspace.analyze();
        workspace.reset();
        assert!(workspace.is_empty());
        assert!(workspace.analysis().is_none());
    }

    #[test]
    fn test_merge_requires_analysis() {
        let (mut workspace, _) = workspace_with(&[("a.dart", "class A {}")]);
        let err = workspace
            .merge(&MergeAssembler::default(), MergeMode::Lenient)
            .unwrap_err();
        assert!(err.to_string().contains("analyze before merging"), "{err}");
    }

    #[test]
    fn test_strict_merge_refused_and_lenient_allowed() {
        let (mut workspace, _) = workspace_with(&[
            ("a.dart", "void main() {}\n"),
            ("b.dart", "void main() {}\n"),
        ]);
        workspace.analyze();
        assert!(
            workspace
                .merge(&MergeAssembler::default(), MergeMode::Strict)
                .is_err()
        );
        assert!(workspace.merged().is_none());

        let merged = workspace
            .merge(&MergeAssembler::default(), MergeMode::Lenient)
            .unwrap();
        assert_eq!(merged.matches("void main() {}").count(), 2);
    }

    #[test]
    fn test_reorder_validation() {
        let (mut workspace, ids) = workspace_with(&[("a.dart", ""), ("b.dart", ""), ("c.dart", "")]);

        assert!(workspace.reorder(&[ids[0], ids[1]]).is_err());
        assert!(workspace.reorder(&[ids[0], ids[0], ids[1]]).is_err());
        assert!(
            workspace
                .reorder(&[ids[0], ids[1], FileId::new(99)])
                .is_err()
        );

        workspace.reorder(&[ids[2], ids[0], ids[1]]).unwrap();
        assert_eq!(names(&workspace), vec!["c.dart", "a.dart", "b.dart"]);
    }

    #[test]
    fn test_unknown_id() {
        let mut workspace = Workspace::new();
        assert!(workspace.remove(FileId::new(7)).is_err());
        assert!(workspace.move_up(FileId::new(7)).is_err());
    }
}
