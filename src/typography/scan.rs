//! Scan-and-rewrite driver and the per-trigger pattern matchers.
//!
//! The driver walks the input once. At a trigger byte it asks the single
//! matcher registered for that byte whether a pattern starts there; a match
//! yields the replacement text and how many input bytes it covers, anything
//! else copies the byte and moves on. Matchers only look a few bytes ahead
//! (plus the run they consume), so the scan is linear in the input length.
//!
//! All triggers are ASCII, so every cut the driver makes falls on a UTF-8
//! character boundary and multi-byte characters pass through untouched.

use super::classify::{is_interrobang, is_symbol, is_trigger};

/// A successful pattern match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match<'a> {
    /// Text to emit in place of the matched bytes.
    pub text: &'a str,
    /// Number of input bytes covered by the match.
    pub consumed: usize,
}

impl<'a> Match<'a> {
    fn new(text: &'a str, consumed: usize) -> Self {
        Self { text, consumed }
    }
}

/// A pattern matcher: given the whole input and the cursor position of a
/// trigger byte, return the replacement or `None`.
pub type Matcher = for<'a> fn(&'a str, usize) -> Option<Match<'a>>;

/// Return the matcher responsible for trigger byte `b`.
///
/// Every trigger byte maps to exactly one matcher; non-trigger bytes map to
/// none.
pub fn matcher_for(b: u8) -> Option<Matcher> {
    match b {
        b'(' => Some(match_symbol),
        b'+' => Some(match_plus_minus),
        b'.' => Some(match_dots),
        b'?' | b'!' => Some(match_interrobang),
        b',' => Some(match_commas),
        b'-' => Some(match_dashes),
        _ => None,
    }
}

/// Replace ASCII typographic approximations in `text`.
///
/// ```
/// use runbook::typography::replace;
///
/// assert_eq!(replace("(c) 2024"), "© 2024");
/// assert_eq!(replace("Wait..."), "Wait…");
/// assert_eq!(replace("a---b"), "a—b");
/// ```
pub fn replace(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    // Start of the pending run of bytes copied verbatim.
    let mut literal = 0;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if is_trigger(b)
            && let Some(m) = matcher_for(b).and_then(|matcher| matcher(text, i))
        {
            out.push_str(&text[literal..i]);
            out.push_str(m.text);
            i += m.consumed;
            literal = i;
            continue;
        }
        i += 1;
    }

    out.push_str(&text[literal..]);
    out
}

/// Length of the run of `b` starting at `start`.
fn run_len(bytes: &[u8], start: usize, b: u8) -> usize {
    bytes[start..].iter().take_while(|&&c| c == b).count()
}

/// `(c)`, `(r)`, `(p)` and `(tm)`, case-insensitive.
fn match_symbol(text: &str, i: usize) -> Option<Match<'_>> {
    let bytes = text.as_bytes();
    let letter = *bytes.get(i + 1)?;
    if !is_symbol(letter) || bytes.get(i + 2).is_none() {
        return None;
    }

    let glyph = match letter.to_ascii_lowercase() {
        b'c' => "©",
        b'r' => "®",
        b'p' => "§",
        _ => {
            let close = *bytes.get(i + 3)?;
            if close != b')' || !bytes[i + 2].eq_ignore_ascii_case(&b'm') {
                return None;
            }
            return Some(Match::new("™", 4));
        }
    };

    (bytes[i + 2] == b')').then(|| Match::new(glyph, 3))
}

/// `+-` becomes `±`.
fn match_plus_minus(text: &str, i: usize) -> Option<Match<'_>> {
    (text.as_bytes().get(i + 1) == Some(&b'-')).then(|| Match::new("±", 2))
}

/// A run of two or more dots becomes `…`, unless it directly follows `?` or
/// `!`, in which case it becomes `..`.
fn match_dots(text: &str, i: usize) -> Option<Match<'_>> {
    let bytes = text.as_bytes();
    let run = run_len(bytes, i, b'.');
    if run < 2 {
        return None;
    }

    let after_interrobang = i > 0 && is_interrobang(bytes[i - 1]);
    let glyph = if after_interrobang { ".." } else { "…" };
    Some(Match::new(glyph, run))
}

/// A run of four or more `?`/`!` keeps its first three characters and drops
/// the rest.
fn match_interrobang(text: &str, i: usize) -> Option<Match<'_>> {
    let bytes = text.as_bytes();
    let run = bytes[i..].iter().take_while(|&&b| is_interrobang(b)).count();
    if run < 4 {
        return None;
    }
    Some(Match::new(&text[i..i + 3], run))
}

/// A run of two or more commas collapses to one.
fn match_commas(text: &str, i: usize) -> Option<Match<'_>> {
    let run = run_len(text.as_bytes(), i, b',');
    (run >= 2).then(|| Match::new(",", run))
}

/// `--` becomes `–`, `---` becomes `—`; longer runs are kept as they are.
fn match_dashes(text: &str, i: usize) -> Option<Match<'_>> {
    let run = run_len(text.as_bytes(), i, b'-');
    match run {
        0 | 1 => None,
        2 => Some(Match::new("–", 2)),
        3 => Some(Match::new("—", 3)),
        _ => Some(Match::new(&text[i..i + run], run)),
    }
}
