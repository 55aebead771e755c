//! Left-to-right tokenizer for step text.
//!
//! Normalisation, pattern building, parameter inference, and method naming
//! all consume the same [`Token`] stream. Deriving every view of a step from
//! one traversal keeps the order and count of literals identical between the
//! match pattern and the generated signature.
//!
//! # Examples
//! ```
//! use stepsmith::tokens::{Token, tokenize};
//!
//! let tokens = tokenize(r#"I add 2 items to "cart""#);
//! assert_eq!(
//!     tokens,
//!     vec![
//!         Token::Text("I add "),
//!         Token::Integer("2"),
//!         Token::Text(" items to "),
//!         Token::Quoted("cart"),
//!     ]
//! );
//! ```

/// A piece of step text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    /// Plain text between literals.
    Text(&'a str),
    /// A non-empty double-quoted literal; the value excludes the quotes.
    Quoted(&'a str),
    /// A run of ASCII digits bounded by non-word characters on both sides.
    Integer(&'a str),
}

/// Block-argument phrases recognised inside plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockPhrase {
    /// `data table`
    DataTable,
    /// `doc string` or `multiline`
    DocString,
}

const PHRASES: [(&str, BlockPhrase); 3] = [
    ("data table", BlockPhrase::DataTable),
    ("doc string", BlockPhrase::DocString),
    ("multiline", BlockPhrase::DocString),
];

const fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// Split `text` into plain segments, quoted literals, and integers.
///
/// A quote opens a literal only when a closing quote follows with at least
/// one character in between; otherwise the quote stays in the surrounding
/// text. Digits glued to letters (`v2`, `3rd`) are plain text.
#[must_use]
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut pos = 0;

    while let Some(&byte) = bytes.get(pos) {
        let literal = match byte {
            b'"' => quoted_end(bytes, pos).map(|end| (end, true)),
            b'0'..=b'9' => integer_end(bytes, pos).map(|end| (end, false)),
            _ => None,
        };
        let Some((end, quoted)) = literal else {
            pos += 1;
            continue;
        };

        if let Some(plain) = text.get(text_start..pos).filter(|s| !s.is_empty()) {
            tokens.push(Token::Text(plain));
        }
        let token = if quoted {
            text.get(pos + 1..end - 1).map(Token::Quoted)
        } else {
            text.get(pos..end).map(Token::Integer)
        };
        tokens.extend(token);
        pos = end;
        text_start = end;
    }

    if let Some(plain) = text.get(text_start..).filter(|s| !s.is_empty()) {
        tokens.push(Token::Text(plain));
    }
    tokens
}

/// Exclusive end of a quoted literal opening at `start`.
fn quoted_end(bytes: &[u8], start: usize) -> Option<usize> {
    let rest = bytes.get(start + 1..)?;
    let close = rest.iter().position(|b| *b == b'"')?;
    (close > 0).then_some(start + 1 + close + 1)
}

/// Exclusive end of an integer starting at `start`, if the digit run is
/// bounded by non-word characters.
fn integer_end(bytes: &[u8], start: usize) -> Option<usize> {
    let preceded_by_word = start
        .checked_sub(1)
        .and_then(|prev| bytes.get(prev))
        .is_some_and(|b| is_word_byte(*b));
    if preceded_by_word {
        return None;
    }
    let run = bytes
        .get(start..)?
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    let end = start + run;
    let followed_by_word = bytes.get(end).is_some_and(|b| is_word_byte(*b));
    (!followed_by_word).then_some(end)
}

/// Rewrite every block phrase in `text`, case-insensitively, using `spell`.
///
/// Text outside the phrases is copied unchanged.
///
/// # Examples
/// ```
/// use stepsmith::tokens::{BlockPhrase, rewrite_block_phrases};
///
/// let out = rewrite_block_phrases("the following Data Table", |phrase| match phrase {
///     BlockPhrase::DataTable => "datatable",
///     BlockPhrase::DocString => "docstring",
/// });
/// assert_eq!(out, "the following datatable");
/// ```
pub fn rewrite_block_phrases(text: &str, spell: impl Fn(BlockPhrase) -> &'static str) -> String {
    let lower = text.to_ascii_lowercase();
    let mut out = String::with_capacity(text.len());
    let mut pos = 0;
    let mut copied = 0;

    while pos < lower.len() {
        let hit = lower.get(pos..).and_then(|rest| {
            PHRASES
                .iter()
                .find(|(phrase, _)| rest.starts_with(phrase))
        });
        if let Some((phrase, kind)) = hit {
            out.push_str(text.get(copied..pos).unwrap_or_default());
            out.push_str(spell(*kind));
            pos += phrase.len();
            copied = pos;
        } else {
            pos += lower
                .get(pos..)
                .and_then(|rest| rest.chars().next())
                .map_or(1, char::len_utf8);
        }
    }
    out.push_str(text.get(copied..).unwrap_or_default());
    out
}

/// Block phrases mentioned in the plain-text parts of `tokens`.
///
/// Returns `(mentions_data_table, mentions_doc_string)`.
#[must_use]
pub fn block_mentions(tokens: &[Token<'_>]) -> (bool, bool) {
    tokens
        .iter()
        .filter_map(|token| match token {
            Token::Text(plain) => Some(plain.to_ascii_lowercase()),
            Token::Quoted(_) | Token::Integer(_) => None,
        })
        .fold((false, false), |(table, doc), plain| {
            (
                table || plain.contains("data table"),
                doc || plain.contains("doc string") || plain.contains("multiline"),
            )
        })
}
