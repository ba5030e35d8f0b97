//! Badabump Changelog - Conventional commit parsing and changelog rendering
//!
//! This crate turns commit messages into a grouped changelog and renders it
//! as Markdown or reStructuredText.

pub mod changelog;
pub mod cleaners;
pub mod formatter;
pub mod parser;

pub use changelog::{ChangeLog, FormatOptions, CHANGELOG_EMPTY};
pub use cleaners::{clean_body, clean_commit_subject, clean_tag_ref};
pub use formatter::{in_development_header, version_header, version_header_on};
pub use parser::ConventionalCommit;
