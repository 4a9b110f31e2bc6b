//! Markdown source → token sequence.
//!
//! `pulldown-cmark` produces a flat event stream. We group it the way the
//! rendering rules expect: every maximal run of inline-level events between
//! two block boundaries becomes one [`Token::Inline`], and plain text inside
//! that run becomes a [`Token::Text`] leaf.
//!
//! A few kinds of text are deliberately left as opaque events so the rules
//! never see them:
//! - code block bodies (inline code spans are already separate events),
//! - raw HTML,
//! - image alt text, which is wrapped in its own nested inline container
//!   together with the image's start and end events.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd, TextMergeStream};

use super::token::Token;

/// Parser extensions enabled for runbook sources.
pub fn options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH
}

/// Parse Markdown into the token model.
pub fn parse(source: &str) -> Vec<Token<'_>> {
    let events = TextMergeStream::new(Parser::new_ext(source, options()));
    let mut builder = TokenBuilder::default();
    for event in events {
        builder.push(event);
    }
    builder.finish()
}

fn is_inline_tag(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::Emphasis | Tag::Strong | Tag::Strikethrough | Tag::Link { .. }
    )
}

fn is_inline_tag_end(tag: &TagEnd) -> bool {
    matches!(
        tag,
        TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough | TagEnd::Link
    )
}

#[derive(Default)]
struct TokenBuilder<'a> {
    tokens: Vec<Token<'a>>,
    /// Inline run being collected.
    inline: Vec<Token<'a>>,
    /// Image being collected (start event, alt text, end event).
    image: Option<Vec<Token<'a>>>,
    /// Nesting depth of images inside the current image.
    image_depth: usize,
    in_code_block: bool,
}

impl<'a> TokenBuilder<'a> {
    fn push(&mut self, event: Event<'a>) {
        if let Some(image) = self.image.as_mut() {
            match &event {
                Event::Start(Tag::Image { .. }) => self.image_depth += 1,
                Event::End(TagEnd::Image) => self.image_depth -= 1,
                _ => {}
            }
            image.push(match event {
                Event::Text(text) => Token::Text(text.into_string()),
                other => Token::Event(other),
            });
            if self.image_depth == 0
                && let Some(image) = self.image.take()
            {
                self.inline.push(Token::inline(image));
            }
            return;
        }

        match event {
            Event::Start(Tag::Image { .. }) => {
                self.image_depth = 1;
                self.image = Some(vec![Token::Event(event)]);
            }
            Event::Start(tag) if is_inline_tag(&tag) => {
                self.inline.push(Token::Event(Event::Start(tag)));
            }
            Event::End(tag) if is_inline_tag_end(&tag) => {
                self.inline.push(Token::Event(Event::End(tag)));
            }
            Event::Start(Tag::CodeBlock(_)) => {
                self.in_code_block = true;
                self.block(event);
            }
            Event::End(TagEnd::CodeBlock) => {
                self.in_code_block = false;
                self.block(event);
            }
            Event::Start(_) | Event::End(_) | Event::Html(_) | Event::Rule => self.block(event),
            Event::Text(text) if !self.in_code_block => {
                self.inline.push(Token::Text(text.into_string()));
            }
            Event::Text(_) => self.block(event),
            other => self.inline.push(Token::Event(other)),
        }
    }

    fn block(&mut self, event: Event<'a>) {
        self.flush_inline();
        self.tokens.push(Token::Event(event));
    }

    fn flush_inline(&mut self) {
        if !self.inline.is_empty() {
            let children = std::mem::take(&mut self.inline);
            self.tokens.push(Token::inline(children));
        }
    }

    fn finish(mut self) -> Vec<Token<'a>> {
        if let Some(image) = self.image.take() {
            self.inline.push(Token::inline(image));
        }
        self.flush_inline();
        self.tokens
    }
}
