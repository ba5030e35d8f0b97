//! CLI commands

mod bump;
mod ci;
mod files;

pub use bump::BumpCommand;
pub use ci::CiCommand;
