//! Bare URL autolinking.
//!
//! Text leaves containing a URL with a scheme (`https://…`) or an email
//! address are split around each match, and the match is wrapped in
//! autolink events. The destination keeps the URL as written. The displayed
//! text stays a [`Token::Text`] leaf, so rules that run later still see it.
//!
//! Text already inside a link (Markdown or raw `<a>` HTML) is skipped.

use linkify::{Link, LinkFinder, LinkKind};
use pulldown_cmark::{CowStr, Event, LinkType, Tag, TagEnd};

use super::render::RenderConfig;
use super::token::Token;

/// Turn bare URLs into links when linkify is enabled.
///
/// Like the typographer, only the direct children of top-level inline
/// containers are visited.
pub fn apply(config: &RenderConfig, tokens: &mut [Token<'_>]) {
    if !config.linkify {
        return;
    }

    let finder = finder();
    for token in tokens.iter_mut() {
        if let Some(children) = token.children_mut()
            && children
                .iter()
                .any(|child| child.as_text().is_some_and(|t| finder.links(t).next().is_some()))
        {
            linkify_children(&finder, children);
        }
    }
}

fn finder() -> LinkFinder {
    let mut finder = LinkFinder::new();
    finder.kinds(&[LinkKind::Url, LinkKind::Email]);
    finder.url_must_have_scheme(true);
    finder
}

fn linkify_children<'a>(finder: &LinkFinder, children: &mut Vec<Token<'a>>) {
    let mut out = Vec::with_capacity(children.len() + 2);
    let mut depth = 0usize;

    for child in children.drain(..) {
        match child {
            Token::Event(event) => {
                depth = link_depth(&event, depth);
                out.push(Token::Event(event));
            }
            Token::Text(text) if depth == 0 => split_links(finder, text, &mut out),
            other => out.push(other),
        }
    }

    *children = out;
}

fn link_depth(event: &Event<'_>, depth: usize) -> usize {
    match event {
        Event::Start(Tag::Link { .. }) => depth + 1,
        Event::End(TagEnd::Link) => depth.saturating_sub(1),
        Event::InlineHtml(html) if is_anchor_open(html) => depth + 1,
        Event::InlineHtml(html) if is_anchor_close(html) => depth.saturating_sub(1),
        _ => depth,
    }
}

/// `<a>` or `<a ...>`, any case.
fn is_anchor_open(html: &str) -> bool {
    let b = html.as_bytes();
    b.len() > 2
        && b[0] == b'<'
        && b[1].eq_ignore_ascii_case(&b'a')
        && (b[2] == b'>' || b[2].is_ascii_whitespace())
}

/// `</a>`, any case, optional whitespace before `>`.
fn is_anchor_close(html: &str) -> bool {
    html.get(..3).is_some_and(|p| p.eq_ignore_ascii_case("</a")) && html[3..].trim_start() == ">"
}

fn split_links<'a>(finder: &LinkFinder, text: String, out: &mut Vec<Token<'a>>) {
    let links: Vec<Link<'_>> = finder.links(&text).collect();
    if links.is_empty() {
        out.push(Token::Text(text));
        return;
    }

    let mut last = 0;
    for link in links {
        if link.start() > last {
            out.push(Token::text(&text[last..link.start()]));
        }
        out.push(Token::Event(Event::Start(link_tag(&link))));
        out.push(Token::text(link.as_str()));
        out.push(Token::Event(Event::End(TagEnd::Link)));
        last = link.end();
    }
    if last < text.len() {
        out.push(Token::text(&text[last..]));
    }
}

fn link_tag<'a>(link: &Link<'_>) -> Tag<'a> {
    // The HTML writer adds `mailto:` for email links.
    let link_type = match link.kind() {
        LinkKind::Email => LinkType::Email,
        _ => LinkType::Autolink,
    };
    Tag::Link {
        link_type,
        dest_url: CowStr::from(link.as_str().to_owned()),
        title: CowStr::Borrowed(""),
        id: CowStr::Borrowed(""),
    }
}
