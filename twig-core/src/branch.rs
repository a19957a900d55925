use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::Commit;
use crate::oplog::OpLog;

/// Reversible operations a branch records about its own mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BranchOp {
    AddCommit(Commit),
}

/// The capability set of a branch: an ordered commit history plus forking,
/// joining and a mutation-scoped undo/redo log.
pub trait BranchOps: Sized {
    /// Constructs a new commit from the given data and appends it to the
    /// history.
    fn add_commit(&mut self, name: String, description: String, files: Vec<String>);

    /// Produces an independent copy of this branch's history under the same
    /// name: the full history, or the prefix up to and including
    /// `last_commit` when one is given. The copy starts with empty undo/redo
    /// logs.
    fn fork(&self, last_commit: Option<&Commit>) -> Result<Self>;

    /// Re-creates every commit of this branch inside `destination`, in
    /// order, unless any file path is touched by both histories. The check
    /// happens up front, so a conflict leaves `destination` untouched.
    fn join(&self, destination: &mut Self) -> Result<()>;

    /// Rolls back the most recently logged mutation, if any.
    fn undo(&mut self);

    /// Re-applies the most recently undone mutation, if any.
    fn redo(&mut self);

    fn commits(&self) -> &[Commit];

    fn name(&self) -> &str;
}

/// An ordered, mutable history of commits with its own undo/redo log.
///
/// A branch does not know which repository owns it, and does not enforce
/// name uniqueness; both are the owning repository's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    commits: Vec<Commit>,
    #[serde(skip)]
    log: OpLog<BranchOp>,
}

impl Branch {
    pub fn new(name: String) -> Self {
        Self {
            name,
            commits: Vec::new(),
            log: OpLog::new(),
        }
    }

    /// First file path touched by commits in both histories, if any.
    fn conflicting_path(&self, other: &Branch) -> Option<String> {
        let theirs: HashSet<&str> = other
            .commits
            .iter()
            .flat_map(|c| c.files.iter().map(String::as_str))
            .collect();

        self.commits
            .iter()
            .flat_map(|c| c.files.iter())
            .find(|path| theirs.contains(path.as_str()))
            .cloned()
    }
}

impl BranchOps for Branch {
    fn add_commit(&mut self, name: String, description: String, files: Vec<String>) {
        let commit = Commit::new(name, description, files);
        debug!(branch = %self.name, commit = %commit.name, "adding commit");
        self.commits.push(commit.clone());
        self.log.record(BranchOp::AddCommit(commit));
    }

    fn fork(&self, last_commit: Option<&Commit>) -> Result<Branch> {
        let commits = match last_commit {
            Some(last) => {
                let pos = self
                    .commits
                    .iter()
                    .position(|c| c == last)
                    .ok_or_else(|| Error::CommitNotFound(last.name.clone()))?;
                self.commits[..=pos].to_vec()
            }
            None => self.commits.clone(),
        };

        Ok(Branch {
            name: self.name.clone(),
            commits,
            log: OpLog::new(),
        })
    }

    fn join(&self, destination: &mut Branch) -> Result<()> {
        if let Some(path) = self.conflicting_path(destination) {
            return Err(Error::NotJoinable {
                source_branch: self.name.clone(),
                destination: destination.name.clone(),
                path,
            });
        }

        debug!(
            source = %self.name,
            destination = %destination.name,
            commits = self.commits.len(),
            "joining branches"
        );
        for commit in &self.commits {
            destination.add_commit(
                commit.name.clone(),
                commit.description.clone(),
                commit.files.clone(),
            );
        }

        Ok(())
    }

    fn undo(&mut self) {
        if let Some(BranchOp::AddCommit(commit)) = self.log.pop_undo() {
            if let Some(pos) = self.commits.iter().position(|c| *c == commit) {
                self.commits.remove(pos);
            }
            self.log.push_redo(BranchOp::AddCommit(commit));
        }
    }

    fn redo(&mut self) {
        if let Some(BranchOp::AddCommit(commit)) = self.log.pop_redo() {
            self.commits.push(commit.clone());
            self.log.push_undo(BranchOp::AddCommit(commit));
        }
    }

    fn commits(&self) -> &[Commit] {
        &self.commits
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Branch: {}", self.name)?;
        for commit in &self.commits {
            writeln!(f, "{commit}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn branch_with(names: &[&str]) -> Branch {
        let mut branch = Branch::new("main".to_string());
        for name in names {
            branch.add_commit(name.to_string(), format!("{name} work"), vec![]);
        }
        branch
    }

    #[test]
    fn test_add_commit_appends_in_order() {
        let branch = branch_with(&["one", "two", "three"]);

        let names: Vec<&str> = branch.commits().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_undo_removes_last_commit() {
        let mut branch = branch_with(&["one", "two"]);
        branch.undo();

        assert_eq!(branch.commits().len(), 1);
        assert_eq!(branch.commits()[0].name, "one");
    }

    #[test]
    fn test_redo_restores_identical_commit() {
        let mut branch = branch_with(&["one", "two"]);
        let second = branch.commits()[1].clone();

        branch.undo();
        branch.redo();

        assert_eq!(branch.commits().len(), 2);
        // Restored from the log, not reconstructed: the timestamp matches.
        assert_eq!(branch.commits()[1], second);
        assert_eq!(branch.commits()[1].created_at, second.created_at);
    }

    #[test]
    fn test_undo_redo_on_empty_branch_are_noops() {
        let mut branch = Branch::new("main".to_string());
        branch.undo();
        branch.redo();

        assert!(branch.commits().is_empty());
    }

    #[test]
    fn test_new_commit_after_undo_leaves_stale_redo() {
        let mut branch = branch_with(&["one", "two"]);
        branch.undo();
        branch.add_commit("three".to_string(), String::new(), vec![]);
        branch.redo();

        // "two" comes back even though "three" was added in between.
        let names: Vec<&str> = branch.commits().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["one", "three", "two"]);
    }

    #[test]
    fn test_fork_copies_full_history() {
        let mut branch = branch_with(&["one", "two"]);
        let fork = branch.fork(None).unwrap();

        assert_eq!(fork.name(), "main");
        assert_eq!(fork.commits(), branch.commits());

        branch.add_commit("three".to_string(), String::new(), vec![]);
        assert_eq!(fork.commits().len(), 2);
    }

    #[test]
    fn test_fork_truncates_at_commit() {
        let branch = branch_with(&["one", "two", "three"]);
        let second = branch.commits()[1].clone();

        let fork = branch.fork(Some(&second)).unwrap();

        let names: Vec<&str> = fork.commits().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["one", "two"]);
    }

    #[test]
    fn test_fork_starts_with_empty_log() {
        let branch = branch_with(&["one"]);
        let mut fork = branch.fork(None).unwrap();

        fork.undo();
        assert_eq!(fork.commits().len(), 1);
    }

    #[test]
    fn test_fork_unknown_commit_errors() {
        let branch = branch_with(&["one"]);
        let foreign = Commit::new("elsewhere".to_string(), String::new(), vec![]);

        let result = branch.fork(Some(&foreign));
        assert!(matches!(result, Err(Error::CommitNotFound(_))));
    }

    #[test]
    fn test_join_rejects_shared_file_path() {
        let mut source = Branch::new("feature".to_string());
        source.add_commit("a".to_string(), String::new(), vec!["x.rs".to_string()]);

        let mut destination = Branch::new("main".to_string());
        destination.add_commit("b".to_string(), String::new(), vec!["x.rs".to_string()]);

        let result = source.join(&mut destination);
        assert!(matches!(result, Err(Error::NotJoinable { .. })));
        assert_eq!(destination.commits().len(), 1);
    }

    #[test]
    fn test_join_appends_commits_in_order() {
        let mut source = Branch::new("feature".to_string());
        source.add_commit("f1".to_string(), String::new(), vec!["a.rs".to_string()]);
        source.add_commit("f2".to_string(), String::new(), vec!["c.rs".to_string()]);

        let mut destination = Branch::new("main".to_string());
        destination.add_commit("m1".to_string(), String::new(), vec!["b.rs".to_string()]);

        source.join(&mut destination).unwrap();

        let names: Vec<&str> = destination
            .commits()
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["m1", "f1", "f2"]);
        // Copy-merge: the source history is unchanged.
        assert_eq!(source.commits().len(), 2);
    }

    #[test]
    fn test_join_recreates_commits_with_fresh_identity() {
        let mut source = Branch::new("feature".to_string());
        source.add_commit("f1".to_string(), "desc".to_string(), vec!["a.rs".to_string()]);

        let mut destination = Branch::new("main".to_string());
        source.join(&mut destination).unwrap();

        let copied = &destination.commits()[0];
        assert_eq!(copied.name, "f1");
        assert_eq!(copied.files, vec!["a.rs"]);
        assert!(copied.created_at >= source.commits()[0].created_at);
    }

    #[test]
    fn test_joined_commits_are_undoable_in_destination() {
        let mut source = Branch::new("feature".to_string());
        source.add_commit("f1".to_string(), String::new(), vec!["a.rs".to_string()]);

        let mut destination = Branch::new("main".to_string());
        source.join(&mut destination).unwrap();
        destination.undo();

        assert!(destination.commits().is_empty());
    }

    #[test]
    fn test_display_lists_commits_in_order() {
        let branch = branch_with(&["one", "two"]);
        let rendered = branch.to_string();

        assert!(rendered.starts_with("Branch: main\n"));
        let one = rendered.find("Commit: one").unwrap();
        let two = rendered.find("Commit: two").unwrap();
        assert!(one < two);
    }
}
