//! # twig-core
//!
//! Core library for twig - an in-memory version-control model.
//!
//! This crate provides the fundamental data structures for tracking named
//! branches of commits inside a repository: immutable [`Commit`] values,
//! [`Branch`] histories with their own undo/redo log, and a [`Repository`]
//! that owns a collection of branches and logs branch lifecycle events.

pub mod branch;
pub mod error;
pub mod models;
pub mod oplog;
pub mod repository;

pub use branch::{Branch, BranchOp, BranchOps};
pub use error::{Error, Result};
pub use models::Commit;
pub use oplog::OpLog;
pub use repository::{RepoOp, Repository, RepositoryOps};
