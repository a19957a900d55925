use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::branch::{Branch, BranchOps};
use crate::error::{Error, Result};
use crate::models::Commit;
use crate::oplog::OpLog;

/// Reversible operations a repository records about branch lifecycle events.
///
/// `AddBranch` carries the inserted branch so a redo can re-insert it; the
/// other variants keep only names, so undoing or redoing them cannot
/// resurrect a deleted branch object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RepoOp {
    CreateBranch { name: String },
    RemoveBranch { name: String },
    CloneBranch { source: String, clone: String },
    AddBranch { name: String, branch: Branch },
}

/// The capability set of a repository: a name-keyed branch collection plus
/// an undo/redo log scoped to branch lifecycle events.
pub trait RepositoryOps {
    /// Creates a branch named `new_name`: empty when `base_name` is `None`,
    /// otherwise a fork of the named base branch, optionally truncated at
    /// `last_commit`. An unknown `base_name` is swallowed as a no-op.
    fn create_branch(
        &mut self,
        new_name: &str,
        base_name: Option<&str>,
        last_commit: Option<&Commit>,
    ) -> Result<()>;

    /// Removes the named branch. Unknown names are a no-op. The removed
    /// branch object is dropped, not retained in the log.
    fn remove_branch(&mut self, name: &str);

    /// Inserts a fork of the named branch under `new_name`, optionally
    /// truncated at `last_commit`. An unknown source name is a no-op.
    fn clone_branch(&mut self, name: &str, new_name: &str, last_commit: Option<&Commit>)
        -> Result<()>;

    /// Inserts `branch` under its own name.
    fn add_branch(&mut self, branch: Branch);

    fn branches(&self) -> Vec<&Branch>;

    fn name(&self) -> &str;

    /// Rolls back the most recently logged lifecycle event, if any.
    ///
    /// The rollback is shallow: log entries carry names rather than branch
    /// objects (except `AddBranch`), so undoing a removal cannot restore the
    /// removed branch, undoing a clone drops the *source* map entry, and a
    /// `create_branch` entry is popped without any reversal and without
    /// becoming redoable.
    fn undo(&mut self);

    /// Re-applies the most recently undone lifecycle event, if any, with the
    /// same shallow semantics as [`undo`](RepositoryOps::undo): only
    /// `AddBranch` entries restore an actual branch object.
    fn redo(&mut self);
}

/// A named collection of branches with an undo/redo log of lifecycle events.
///
/// The repository exclusively owns its branches. Map keys match each
/// branch's name at insertion time; renaming a branch afterwards does not
/// re-key the map.
#[derive(Debug, Serialize, Deserialize)]
pub struct Repository {
    pub name: String,
    branches: HashMap<String, Branch>,
    #[serde(skip)]
    log: OpLog<RepoOp>,
}

impl Repository {
    pub fn new(name: String) -> Self {
        Self {
            name,
            branches: HashMap::new(),
            log: OpLog::new(),
        }
    }

    pub fn branch(&self, name: &str) -> Option<&Branch> {
        self.branches.get(name)
    }

    pub fn branch_mut(&mut self, name: &str) -> Option<&mut Branch> {
        self.branches.get_mut(name)
    }

    /// Joins `source` into `destination` per [`BranchOps::join`]. Unlike the
    /// lifecycle operations, unknown names here are reported as errors, and
    /// nothing is pushed onto the repository log: the re-created commits are
    /// logged by the destination branch itself.
    pub fn join_branches(&mut self, source: &str, destination: &str) -> Result<()> {
        let src = self
            .branches
            .get(source)
            .cloned()
            .ok_or_else(|| Error::BranchNotFound(source.to_string()))?;
        let dest = self
            .branches
            .get_mut(destination)
            .ok_or_else(|| Error::BranchNotFound(destination.to_string()))?;

        src.join(dest)
    }
}

impl RepositoryOps for Repository {
    fn create_branch(
        &mut self,
        new_name: &str,
        base_name: Option<&str>,
        last_commit: Option<&Commit>,
    ) -> Result<()> {
        match base_name {
            Some(base) => {
                let Some(base_branch) = self.branches.get(base) else {
                    warn!(repo = %self.name, base, "create_branch: unknown base branch, ignoring");
                    return Ok(());
                };
                let mut forked = base_branch.fork(last_commit)?;
                forked.name = new_name.to_string();
                self.branches.insert(new_name.to_string(), forked);
            }
            None => {
                self.branches
                    .insert(new_name.to_string(), Branch::new(new_name.to_string()));
            }
        }

        debug!(repo = %self.name, branch = new_name, "created branch");
        self.log.record(RepoOp::CreateBranch {
            name: new_name.to_string(),
        });
        Ok(())
    }

    fn remove_branch(&mut self, name: &str) {
        if self.branches.remove(name).is_some() {
            debug!(repo = %self.name, branch = name, "removed branch");
            self.log.record(RepoOp::RemoveBranch {
                name: name.to_string(),
            });
        } else {
            warn!(repo = %self.name, branch = name, "remove_branch: unknown branch, ignoring");
        }
    }

    fn clone_branch(
        &mut self,
        name: &str,
        new_name: &str,
        last_commit: Option<&Commit>,
    ) -> Result<()> {
        let Some(branch) = self.branches.get(name) else {
            warn!(repo = %self.name, branch = name, "clone_branch: unknown source, ignoring");
            return Ok(());
        };
        let mut forked = branch.fork(last_commit)?;
        forked.name = new_name.to_string();
        self.branches.insert(new_name.to_string(), forked);

        debug!(repo = %self.name, source = name, clone = new_name, "cloned branch");
        self.log.record(RepoOp::CloneBranch {
            source: name.to_string(),
            clone: new_name.to_string(),
        });
        Ok(())
    }

    fn add_branch(&mut self, branch: Branch) {
        let name = branch.name.clone();
        debug!(repo = %self.name, branch = %name, "adding branch");
        self.log.record(RepoOp::AddBranch {
            name: name.clone(),
            branch: branch.clone(),
        });
        self.branches.insert(name, branch);
    }

    fn branches(&self) -> Vec<&Branch> {
        self.branches.values().collect()
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn undo(&mut self) {
        let Some(op) = self.log.pop_undo() else { return };
        match op {
            RepoOp::CreateBranch { name } => {
                // Popped and discarded: no reversal, no redo entry.
                warn!(repo = %self.name, branch = %name, "undo of create_branch is not supported");
            }
            RepoOp::RemoveBranch { name } => {
                // The log kept only the name, so there is nothing to
                // restore; the key is already absent.
                self.branches.remove(&name);
                self.log.push_redo(RepoOp::RemoveBranch { name });
            }
            RepoOp::CloneBranch { source, clone } => {
                // Drops the source map entry, not the clone.
                self.branches.remove(&source);
                self.log.push_redo(RepoOp::CloneBranch { source, clone });
            }
            RepoOp::AddBranch { name, branch } => {
                self.branches.remove(&name);
                self.log.push_redo(RepoOp::AddBranch { name, branch });
            }
        }
    }

    fn redo(&mut self) {
        let Some(op) = self.log.pop_redo() else { return };
        match op {
            RepoOp::CreateBranch { .. } => {}
            RepoOp::RemoveBranch { name } => {
                self.branches.remove(&name);
                self.log.push_undo(RepoOp::RemoveBranch { name });
            }
            RepoOp::CloneBranch { source, clone } => {
                // No branch object was retained, so only the log entry moves
                // back; the map is untouched.
                self.log.push_undo(RepoOp::CloneBranch { source, clone });
            }
            RepoOp::AddBranch { name, branch } => {
                self.branches.insert(name.clone(), branch.clone());
                self.log.push_undo(RepoOp::AddBranch { name, branch });
            }
        }
    }
}
