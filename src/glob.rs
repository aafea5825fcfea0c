//! Glob pattern compiler.
//!
//! Translates the restricted glob grammar into an anchored regular expression
//! in a single left-to-right pass:
//!
//! | Pattern    | Matches                                              |
//! |------------|------------------------------------------------------|
//! | `\c`       | the literal character `c`                            |
//! | `?`        | exactly one character other than `/`                 |
//! | `*`        | any run of characters other than `/`                 |
//! | `**`       | any run of characters, `/` included                  |
//! | `{a,b,c}`  | one of the literal alternatives (groups do not nest) |
//!
//! Everything else is literal. The whole name must match.

use std::fmt;
use std::iter::Peekable;
use std::str::{Chars, FromStr};

use regex::{Regex, RegexBuilder};
use thiserror::Error;

use crate::traits::NameMatcher;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A glob pattern that could not be compiled.
///
/// `index` is a character index into the original pattern text, not into the
/// generated expression.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} near index {index}\n{pattern}")]
pub struct PatternError {
    kind:    PatternErrorKind,
    pattern: String,
    index:   usize,
}

impl PatternError {
    fn new(kind: PatternErrorKind, pattern: &str, index: usize) -> Self {
        Self {
            kind,
            pattern: pattern.to_owned(),
            index,
        }
    }

    /// What went wrong.
    pub fn kind(&self) -> &PatternErrorKind {
        &self.kind
    }

    /// The pattern as given by the caller.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Character index of the offending character.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// The reason a pattern was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternErrorKind {
    #[error("no character to escape")]
    NoCharacterToEscape,

    #[error("cannot nest groups")]
    NestedGroup,

    #[error("missing closing brace")]
    MissingClosingBrace,

    /// The regex backend refused the generated expression.
    #[error("invalid expression: {0}")]
    Regex(String),
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    /// `\` and the character it escapes, `None` at end of pattern.
    Escape(Option<char>),
    Separator,
    OpenGroup,
    Comma,
    CloseGroup,
    /// `**`
    AnyPath,
    /// `*`
    AnySegment,
    /// `?`
    AnyChar,
    Literal(char),
}

/// Splits a pattern into `(char index, token)` pairs.
struct Tokens<'p> {
    chars: Peekable<Chars<'p>>,
    index: usize,
}

impl<'p> Tokens<'p> {
    fn new(pattern: &'p str) -> Self {
        Self {
            chars: pattern.chars().peekable(),
            index: 0,
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.index += 1;
        Some(c)
    }
}

impl Iterator for Tokens<'_> {
    type Item = (usize, Token);

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.index;
        let token = match self.bump()? {
            '\\' => Token::Escape(self.bump()),
            '/'  => Token::Separator,
            '{'  => Token::OpenGroup,
            ','  => Token::Comma,
            '}'  => Token::CloseGroup,
            '?'  => Token::AnyChar,
            '*'  => {
                if self.chars.peek() == Some(&'*') {
                    self.bump();
                    Token::AnyPath
                } else {
                    Token::AnySegment
                }
            }
            c => Token::Literal(c),
        };
        Some((start, token))
    }
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    InGroup,
}

/// What a token contributes to the expression.
enum Emit {
    Fragment(&'static str),
    Literal(char),
}

/// The transition table: `(state, token) -> (output, next state)`.
fn transition(state: State, token: Token) -> Result<(Emit, State), PatternErrorKind> {
    use State::*;
    use Token::*;

    let step = match (state, token) {
        (_, Escape(None))        => return Err(PatternErrorKind::NoCharacterToEscape),
        (_, Escape(Some(c)))     => (Emit::Literal(c), state),
        (_, Separator)           => (Emit::Fragment("/"), state),
        (Outside, OpenGroup)     => (Emit::Fragment("(?:(?:"), InGroup),
        (InGroup, OpenGroup)     => return Err(PatternErrorKind::NestedGroup),
        (InGroup, Comma)         => (Emit::Fragment(")|(?:"), InGroup),
        (Outside, Comma)         => (Emit::Literal(','), Outside),
        (InGroup, CloseGroup)    => (Emit::Fragment("))"), Outside),
        (Outside, CloseGroup)    => (Emit::Literal('}'), Outside),
        (_, AnyPath)             => (Emit::Fragment(".*"), state),
        (_, AnySegment)          => (Emit::Fragment("[^/]*"), state),
        (_, AnyChar)             => (Emit::Fragment("[^/]"), state),
        (_, Literal(c))          => (Emit::Literal(c), state),
    };
    Ok(step)
}

fn push_literal(out: &mut String, c: char) {
    let mut buf = [0u8; 4];
    out.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}

/// Translate a glob pattern into anchored regular-expression source.
///
/// ```rust
/// assert_eq!(resloc::glob_to_regex("a/*.txt").unwrap(), r"^a/[^/]*\.txt$");
/// assert_eq!(resloc::glob_to_regex("r.{txt,md}").unwrap(), r"^r\.(?:(?:txt)|(?:md))$");
/// ```
///
/// # Errors
///
/// Returns a [`PatternError`] on a trailing `\`, a nested `{`, or a group
/// left open at the end of the pattern.
pub fn glob_to_regex(pattern: &str) -> Result<String, PatternError> {
    let mut regex = String::with_capacity(pattern.len() * 2 + 2);
    regex.push('^');

    let mut state = State::Outside;

    for (index, token) in Tokens::new(pattern) {
        let (emit, next) = transition(state, token)
            .map_err(|kind| PatternError::new(kind, pattern, index))?;
        match emit {
            Emit::Fragment(fragment) => regex.push_str(fragment),
            Emit::Literal(c)         => push_literal(&mut regex, c),
        }
        state = next;
    }

    if state == State::InGroup {
        let last = pattern.chars().count().saturating_sub(1);
        return Err(PatternError::new(
            PatternErrorKind::MissingClosingBrace,
            pattern,
            last,
        ));
    }

    regex.push('$');
    Ok(regex)
}

// ---------------------------------------------------------------------------
// Glob
// ---------------------------------------------------------------------------

/// A compiled glob pattern.
///
/// Stateless once built; share it freely across threads.
#[derive(Debug, Clone)]
pub struct Glob {
    pattern: String,
    regex:   Regex,
}

impl Glob {
    /// Compile `pattern`. Equivalent to [`compile`].
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let source = glob_to_regex(pattern)?;
        let regex = build_regex(pattern, &source, REGEX_SIZE_LIMIT)?;
        Ok(Self {
            pattern: pattern.to_owned(),
            regex,
        })
    }

    /// The original glob text.
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// The generated expression.
    pub fn regex(&self) -> &Regex {
        &self.regex
    }

    /// Whether the whole of `name` matches.
    pub fn is_match(&self, name: &str) -> bool {
        self.regex.is_match(name)
    }
}

impl NameMatcher for Glob {
    fn is_match(&self, name: &str) -> bool {
        Glob::is_match(self, name)
    }
}

impl fmt::Display for Glob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

impl FromStr for Glob {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Glob::new(s)
    }
}

/// Compiled-program budget handed to the regex backend (its own default).
const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Compile generated source; a backend failure is reported at the end of the
/// glob text.
fn build_regex(pattern: &str, source: &str, size_limit: usize) -> Result<Regex, PatternError> {
    RegexBuilder::new(source)
        .dot_matches_new_line(true)
        .size_limit(size_limit)
        .build()
        .map_err(|err| {
            PatternError::new(
                PatternErrorKind::Regex(err.to_string()),
                pattern,
                pattern.chars().count(),
            )
        })
}

/// Compile a glob pattern into a [`Glob`] matcher.
///
/// ```rust
/// let glob = resloc::compile("books/*.properties").unwrap();
/// assert!(glob.is_match("books/a_game_of_thrones.properties"));
/// assert!(!glob.is_match("books/old/a_clash_of_kings.properties"));
/// ```
pub fn compile(pattern: &str) -> Result<Glob, PatternError> {
    Glob::new(pattern)
}
