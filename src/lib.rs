//! # runbook
//!
//! A small static-site generator for operational runbooks, built around a
//! Markdown renderer with typographic punctuation replacements.
//!
//! ## Features
//!
//! - Render Markdown to HTML, turning `--` into `–`, `...` into `…`,
//!   `(c)` into `©` and so on
//! - Describe a set of runbooks in a YAML manifest
//! - Generate an index page and one page per runbook from text templates
//!
//! ## Quick Start
//!
//! ```
//! use runbook::markdown::Markdown;
//! use runbook::typography;
//!
//! // Replace punctuation in plain text
//! assert_eq!(typography::replace("a -- b"), "a – b");
//!
//! // Render Markdown (typographer enabled by default)
//! let html = Markdown::new().render("Wait... *what*?!?!");
//! assert_eq!(html, "<p>Wait… <em>what</em>?!?</p>\n");
//! ```
//!
//! ## Building a Site
//!
//! ```no_run
//! use runbook::site::{SiteOptions, build};
//!
//! let options = SiteOptions::new("index.tpl", "topic.tpl", "toc.yml");
//! let written = build(&options, "public/")?;
//! println!("wrote {} pages", written.len());
//! # Ok::<(), runbook::Error>(())
//! ```

pub mod error;
pub mod manifest;
pub mod markdown;
pub mod site;
pub mod template;
pub mod typography;
pub(crate) mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{Error, Result};
pub use manifest::{Manifest, Runbook};
pub use markdown::{Markdown, RenderConfig};
pub use site::{Site, SiteOptions};
pub use template::Template;
pub use typography::Traversal;
