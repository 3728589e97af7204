//! # obsidian-zola
//!
//! Prepares an Obsidian vault export for the Zola static site generator.
//!
//! ## Features
//!
//! - Relative note links rewritten to site-absolute paths, fragments kept
//! - Same-page links, block ids and breadcrumb labels fixed up
//! - `%% comments %%` removed
//! - Display math adjusted for KaTeX
//! - Fresh page frontmatter for every note
//! - An `_index.md` for every directory, keeping hand-written content
//! - Site variables substituted into `config.toml`
//!
//! ## Quick Start
//!
//! ```no_run
//! use obsidian_zola::{Config, Pipeline, SiteEnv};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::builder()
//!     .site_dir("./site")
//!     .site_env(SiteEnv::from_env())
//!     .build()?;
//!
//! Pipeline::new(config)?.run()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The conversion runs four stages, each finishing before the next starts:
//! 1. **Check**: report site variables, substituting placeholders
//! 2. **Substitute**: write the variables into the Zola config file
//! 3. **Sections**: regenerate `_index.md` in every directory
//! 4. **Notes**: frontmatter removal → link rewriting → comment stripping →
//!    math fixing → frontmatter writing, file by file
//!
//! Files are converted in place. Each write goes through a temporary file
//! that is renamed over the original, but a failed run leaves the tree
//! partially converted.

#![warn(
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]

mod comments;
mod config;
mod env;
mod error;
mod frontmatter;
mod links;
mod math;
mod note;
mod pipeline;
mod scanner;
mod section;
mod writer;

pub use comments::strip_comments;
pub use config::{Config, ConfigBuilder, DEFAULT_INDEX_MARKER};
pub use env::{SORT_BY_KEY, SiteEnv, SiteVar, SortBy};
pub use error::{Error, Result};
pub use frontmatter::{
    PageFrontmatter, SectionFrontmatter, derive_title, remove_frontmatter,
};
pub use links::{LinkRewriter, base_path};
pub use math::fix_math;
pub use pipeline::{Pipeline, PipelineStats};
pub use section::{INDEX_FILE, section_title};

/// Runs the complete conversion with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration is invalid
/// - A note, section index or the config file cannot be read or written
///
/// # Examples
///
/// ```no_run
/// use obsidian_zola::{Config, run};
///
/// # fn main() -> anyhow::Result<()> {
/// let config = Config::builder()
///     .site_dir(".")
///     .build()?;
///
/// run(config)?;
/// # Ok(())
/// # }
/// ```
pub fn run(config: Config) -> Result<PipelineStats> {
    Pipeline::new(config)?.run()
}
