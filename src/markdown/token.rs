//! Token model shared by the Markdown front end and the core rules.

use pulldown_cmark::{CowStr, Event};

/// A node in the parsed document.
///
/// Only two kinds of node matter to the rewriting rules: inline containers
/// and the text leaves inside them. Everything else the parser produces
/// (block boundaries, code, raw HTML, breaks, link and emphasis delimiters)
/// is carried as an opaque [`Token::Event`] and written back out unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum Token<'a> {
    /// Parser event the rules never touch.
    Event(Event<'a>),
    /// Ordered run of inline content.
    Inline { children: Vec<Token<'a>> },
    /// Literal text.
    Text(String),
}

impl<'a> Token<'a> {
    /// Create an inline container.
    pub fn inline(children: Vec<Token<'a>>) -> Self {
        Token::Inline { children }
    }

    /// Create a text leaf.
    pub fn text(content: impl Into<String>) -> Self {
        Token::Text(content.into())
    }

    /// Children of an inline container, or `None` for any other node.
    pub fn children(&self) -> Option<&[Token<'a>]> {
        match self {
            Token::Inline { children } => Some(children.as_slice()),
            _ => None,
        }
    }

    /// Mutable children of an inline container.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Token<'a>>> {
        match self {
            Token::Inline { children } => Some(children),
            _ => None,
        }
    }

    /// Payload of a text leaf, or `None` for any other node.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Token::Text(content) => Some(content.as_str()),
            _ => None,
        }
    }
}

/// Turn tokens back into parser events, in document order.
///
/// Inline containers are transparent: their children are emitted in place.
pub fn flatten<'a>(tokens: Vec<Token<'a>>) -> Vec<Event<'a>> {
    let mut events = Vec::with_capacity(tokens.len());
    flatten_into(tokens, &mut events);
    events
}

fn flatten_into<'a>(tokens: Vec<Token<'a>>, events: &mut Vec<Event<'a>>) {
    for token in tokens {
        match token {
            Token::Event(event) => events.push(event),
            Token::Inline { children } => flatten_into(children, events),
            Token::Text(content) => events.push(Event::Text(CowStr::from(content))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulldown_cmark::{Tag, TagEnd};

    #[test]
    fn test_accessors() {
        let mut inline = Token::inline(vec![Token::text("a")]);
        assert_eq!(inline.children().map(<[_]>::len), Some(1));
        assert!(inline.children_mut().is_some());
        assert_eq!(inline.as_text(), None);

        let text = Token::text("hello");
        assert_eq!(text.as_text(), Some("hello"));
        assert!(text.children().is_none());

        let event = Token::Event(Event::SoftBreak);
        assert!(event.children().is_none());
        assert!(event.as_text().is_none());
    }

    #[test]
    fn test_flatten_preserves_order() {
        let tokens = vec![
            Token::Event(Event::Start(Tag::Paragraph)),
            Token::inline(vec![
                Token::text("one"),
                Token::Event(Event::SoftBreak),
                Token::inline(vec![Token::text("two")]),
            ]),
            Token::Event(Event::End(TagEnd::Paragraph)),
        ];

        let events = flatten(tokens);
        assert_eq!(
            events,
            vec![
                Event::Start(Tag::Paragraph),
                Event::Text("one".into()),
                Event::SoftBreak,
                Event::Text("two".into()),
                Event::End(TagEnd::Paragraph),
            ]
        );
    }
}
