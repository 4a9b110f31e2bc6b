//! Markdown rendering.
//!
//! Rendering runs in three steps:
//!
//! - [`parse()`]: `pulldown-cmark` events grouped into the [`Token`] model
//! - core rules rewrite text leaves in place: bare URL autolinking, then the
//!   [typographer](crate::typography)
//! - [`flatten()`] turns the tokens back into events for `pulldown-cmark`'s HTML
//!   writer
//!
//! [`Markdown`] bundles the three behind a single [`Markdown::render`] call.

mod autolink;
mod parse;
mod render;
mod token;

pub use parse::{options, parse};
pub use render::{CoreRule, Markdown, RenderConfig};
pub use token::{Token, flatten};
