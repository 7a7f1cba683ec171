//! Loading markdown files with YAML front matter into the content store.

pub mod frontmatter;
pub mod seed;

pub use seed::{seed_directory, SeedOptions, SeedReport};
