//! Markdown → HTML rendering with the core rule pass.

use pulldown_cmark::html;

use crate::typography::{self, Traversal};

use super::autolink;
use super::parse::parse;
use super::token::{Token, flatten};

/// Configuration for Markdown rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Turn bare URLs and email addresses into links.
    pub linkify: bool,
    /// Apply typographic replacements to text.
    pub typographer: bool,
    /// How far the typographer descends into inline content.
    pub traversal: Traversal,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            linkify: true,
            typographer: true,
            traversal: Traversal::Shallow,
        }
    }
}

impl RenderConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable bare URL autolinking.
    pub fn with_linkify(mut self, linkify: bool) -> Self {
        self.linkify = linkify;
        self
    }

    /// Enable or disable typographic replacements.
    pub fn with_typographer(mut self, typographer: bool) -> Self {
        self.typographer = typographer;
        self
    }

    /// Set the typographer traversal mode.
    pub fn with_traversal(mut self, traversal: Traversal) -> Self {
        self.traversal = traversal;
        self
    }
}

/// A core rule: runs once over the parsed tokens, before serialization.
pub type CoreRule = fn(&RenderConfig, &mut [Token<'_>]);

/// Core rules in the order they run.
const CORE_RULES: &[CoreRule] = &[autolink::apply, typography::apply];

/// Markdown renderer.
#[derive(Debug, Clone, Default)]
pub struct Markdown {
    config: RenderConfig,
}

impl Markdown {
    /// Create a renderer with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with the specified configuration.
    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// The renderer's configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Parse `source` and run the core rules, returning the rewritten tokens.
    pub fn tokens<'a>(&self, source: &'a str) -> Vec<Token<'a>> {
        let mut tokens = parse(source);
        for rule in CORE_RULES {
            rule(&self.config, &mut tokens);
        }
        tokens
    }

    /// Render `source` to an HTML fragment.
    ///
    /// ```
    /// use runbook::markdown::Markdown;
    ///
    /// let html = Markdown::new().render("Wait... (c) 2024");
    /// assert_eq!(html, "<p>Wait… © 2024</p>\n");
    /// ```
    pub fn render(&self, source: &str) -> String {
        let tokens = self.tokens(source);
        let mut out = String::with_capacity(source.len() + source.len() / 4);
        html::push_html(&mut out, flatten(tokens).into_iter());
        out
    }
}
