//! Runbook manifest (`toc.yml`).
//!
//! ```yaml
//! runbooks:
//!   - title: Database failover
//!     subtitle: Promoting a replica
//!     source: ops/failover.md
//!     intro: What to do when the *primary* goes away.
//! ```
//!
//! Templates see the manifest and its runbooks with capitalized field names
//! (`.Runbooks`, `.Title`, `.URL`, ...).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One runbook entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "PascalCase"))]
pub struct Runbook {
    pub title: String,
    pub subtitle: String,
    /// Output path relative to the site root. Derived from `source` when
    /// empty, see [`Runbook::resolve_url`].
    #[serde(rename(serialize = "URL"))]
    pub url: String,
    /// Path of the Markdown source.
    pub source: String,
    /// Markdown before loading, rendered HTML afterwards.
    pub intro: String,
    /// Rendered HTML of `source`. Never read from the manifest.
    #[serde(skip_deserializing)]
    pub contents: String,
}

impl Runbook {
    /// Fill in `url` from `source` if it is empty.
    ///
    /// A trailing `.md` is removed and `.html` appended, so `ops/db.md`
    /// becomes `ops/db.html`.
    pub fn resolve_url(&mut self) -> &str {
        if self.url.is_empty() {
            let stem = self.source.strip_suffix(".md").unwrap_or(&self.source);
            self.url = format!("{stem}.html");
        }
        &self.url
    }
}

/// The list of runbooks to publish.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all(serialize = "PascalCase"))]
pub struct Manifest {
    pub runbooks: Vec<Runbook>,
}

impl Manifest {
    /// Parse a manifest from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Read and parse a manifest file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_yaml(&text)
    }

    /// Template context for the index page.
    pub fn to_context(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
