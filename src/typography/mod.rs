//! Typographic punctuation replacements.
//!
//! Converts ASCII approximations into their typographic forms:
//!
//! | Input                  | Output |
//! |------------------------|--------|
//! | `(c)` `(r)` `(p)`      | `©` `®` `§` |
//! | `(tm)`                 | `™` |
//! | `+-`                   | `±` |
//! | `..`, `...`, …         | `…` (`..` right after `?` or `!`) |
//! | `?!?!`, `!!!!!`, …     | first three characters of the run |
//! | `,,`, `,,,`, …         | `,` |
//! | `--` / `---`           | `–` / `—` (longer runs are kept) |
//!
//! Symbol letters are case-insensitive. The work is split into:
//!
//! - [`classify`]: byte lookup tables (trigger, symbol letter, interrobang)
//! - [`replace`]: the single-pass scanner and its matchers
//! - [`apply`]: the rendering rule that runs the scanner over parsed text

pub mod classify;
mod rule;
mod scan;

pub use rule::{Traversal, apply};
pub use scan::{Match, Matcher, matcher_for, replace};
