//! Import crawler module
//!
//! Flattens Markdown documents by inlining the documents they import.
//! Supports:
//! - `![alt](Target)` and `![alt](<Target>)` import lines
//! - Targets relative to the importing document
//! - Cycle and depth protection
//! - Crawling configured source/target links
//! - Previewing a vault's import graph

mod directive;
mod path;
mod preview;
mod resolver;
mod runner;

pub use directive::{parse_directive, split_lines, strip_angle_brackets, Directive, Line};
pub use path::{locate, normalize};
pub use preview::{list_documents, preview_vault, VaultPreview};
pub use resolver::*;
pub use runner::*;
