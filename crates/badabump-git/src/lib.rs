//! Badabump Git - Repository queries for release management
//!
//! This crate reads tags, tag messages and commit history through `git2`.

mod commits;
mod repository;
mod tags;

pub use repository::{GitRepo, Result};
