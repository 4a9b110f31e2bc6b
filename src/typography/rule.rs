//! The typographer rule: applies [`replace`] to parsed text.

use crate::markdown::{RenderConfig, Token};

use super::scan::replace;

/// How far the typographer descends into the token tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Traversal {
    /// Rewrite only the direct text children of top-level inline
    /// containers. Text inside a nested container (e.g. image alt text) is
    /// left as written.
    #[default]
    Shallow,
    /// Also descend into inline containers nested inside inline containers.
    Deep,
}

/// Rewrite text leaves in `tokens` when the typographer is enabled.
///
/// Only top-level [`Token::Inline`] containers are visited; every other
/// token is left untouched.
pub fn apply(config: &RenderConfig, tokens: &mut [Token<'_>]) {
    if !config.typographer {
        return;
    }

    for token in tokens.iter_mut() {
        if let Some(children) = token.children_mut() {
            rewrite_children(children, config.traversal);
        }
    }
}

fn rewrite_children(children: &mut [Token<'_>], traversal: Traversal) {
    for child in children.iter_mut() {
        match child {
            Token::Text(content) => *content = replace(content),
            Token::Inline { children } if traversal == Traversal::Deep => {
                rewrite_children(children, traversal);
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulldown_cmark::{Event, Tag, TagEnd};

    fn sample() -> Vec<Token<'static>> {
        vec![
            Token::Event(Event::Start(Tag::Paragraph)),
            Token::inline(vec![
                Token::text("Wait..."),
                Token::Event(Event::Code("a -- b".into())),
                Token::inline(vec![Token::text("(c) nested")]),
            ]),
            Token::Event(Event::End(TagEnd::Paragraph)),
            Token::text("top -- level"),
        ]
    }

    fn text_at<'t>(tokens: &'t [Token<'_>], path: &[usize]) -> &'t str {
        let (last, parents) = path.split_last().unwrap();
        let mut level = tokens;
        for &i in parents {
            level = level[i].children().unwrap();
        }
        level[*last].as_text().unwrap()
    }

    #[test]
    fn test_rewrites_direct_text_children() {
        let mut tokens = sample();
        apply(&RenderConfig::default(), &mut tokens);
        assert_eq!(text_at(&tokens, &[1, 0]), "Wait…");
    }

    #[test]
    fn test_disabled_flag_leaves_everything() {
        let mut tokens = sample();
        apply(&RenderConfig::new().with_typographer(false), &mut tokens);
        assert_eq!(tokens, sample());
    }

    #[test]
    fn test_shallow_skips_nested_containers() {
        let mut tokens = sample();
        apply(&RenderConfig::default(), &mut tokens);
        assert_eq!(text_at(&tokens, &[1, 2, 0]), "(c) nested");
    }

    #[test]
    fn test_deep_rewrites_nested_containers() {
        let mut tokens = sample();
        apply(
            &RenderConfig::new().with_traversal(Traversal::Deep),
            &mut tokens,
        );
        assert_eq!(text_at(&tokens, &[1, 2, 0]), "© nested");
    }

    #[test]
    fn test_opaque_tokens_untouched() {
        for traversal in [Traversal::Shallow, Traversal::Deep] {
            let mut tokens = sample();
            apply(&RenderConfig::new().with_traversal(traversal), &mut tokens);
            // Text outside any inline container is not visited.
            assert_eq!(text_at(&tokens, &[3]), "top -- level");
            assert_eq!(tokens[1].children().unwrap()[1], sample()[1].children().unwrap()[1]);
            assert_eq!(tokens[0], sample()[0]);
        }
    }
}
