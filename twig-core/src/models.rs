use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An immutable record of a named change touching a set of files.
///
/// Once constructed no field changes. Commits are value objects: merging one
/// branch into another re-creates the commit data in the destination rather
/// than moving anything, so the same commit value may exist in several
/// branches at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    /// Touched file paths in insertion order. Duplicates are allowed and the
    /// order is meaningful for display and conflict comparison.
    pub files: Vec<String>,
}

impl Commit {
    pub fn new(name: String, description: String, files: Vec<String>) -> Self {
        Self {
            name,
            description,
            created_at: Utc::now(),
            files,
        }
    }
}

impl fmt::Display for Commit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Commit: {}, Description: {}, Created at: {}",
            self.name,
            self.description,
            self.created_at.format("%Y-%m-%d %H:%M:%S")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_creation() {
        let commit = Commit::new(
            "initial".to_string(),
            "first cut".to_string(),
            vec!["src/lib.rs".to_string(), "Cargo.toml".to_string()],
        );

        assert_eq!(commit.name, "initial");
        assert_eq!(commit.description, "first cut");
        assert_eq!(commit.files, vec!["src/lib.rs", "Cargo.toml"]);
        assert!(commit.created_at <= Utc::now());
    }

    #[test]
    fn test_commit_files_keep_order_and_duplicates() {
        let commit = Commit::new(
            "dup".to_string(),
            String::new(),
            vec!["a.rs".to_string(), "b.rs".to_string(), "a.rs".to_string()],
        );

        assert_eq!(commit.files, vec!["a.rs", "b.rs", "a.rs"]);
    }

    #[test]
    fn test_commit_display() {
        let commit = Commit::new("init".to_string(), "start".to_string(), vec![]);
        let rendered = commit.to_string();

        assert!(rendered.starts_with("Commit: init, Description: start"));
    }
}
