//! jsdoc-defaults: keep `@default` annotations in declaration files in
//! sync with a project's runtime defaults.
//!
//! The engine edits declaration text directly, without a parser:
//!
//! - [`scan`]: bracket matching and statement ends, skipping strings and comments
//! - [`locate`]: interface bodies and their property members
//! - [`doc`]: leading documentation comments: find, parse, render, upsert
//! - [`literal`]: runtime value → `@default` literal
//! - [`inject`] / [`check`]: the write and read-only passes over one text
//! - [`extract`]: a whole declaration for preview output
//!
//! [`defaults`] and [`config`] load the inputs for the command-line tool.

pub mod check;
pub mod config;
pub mod defaults;
pub mod doc;
pub mod error;
pub mod extract;
pub mod inject;
pub mod literal;
pub mod locate;
pub mod model;
pub mod scan;

pub use check::check;
pub use doc::DefaultTag;
pub use extract::extract_block;
pub use inject::inject;
pub use literal::{format_literal, DefaultValue};
pub use model::{CheckReport, Defaults, InjectReport, Outcome};
