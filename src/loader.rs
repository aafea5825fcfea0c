//! Stock [`Loader`]s.

use std::io::{self, Read};

use indexmap::IndexMap;

use crate::traits::Loader;

/// Loads the raw bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BytesLoader;

impl Loader for BytesLoader {
    type Output = Vec<u8>;

    fn load(&self, source: &mut dyn Read) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        source.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

/// Loads UTF-8 text. Invalid UTF-8 is an [`io::ErrorKind::InvalidData`] error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringLoader;

impl Loader for StringLoader {
    type Output = String;

    fn load(&self, source: &mut dyn Read) -> io::Result<String> {
        let mut text = String::new();
        source.read_to_string(&mut text)?;
        Ok(text)
    }
}

/// Loads UTF-8 `.properties` files into [`Properties`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PropertiesLoader;

impl Loader for PropertiesLoader {
    type Output = Properties;

    fn load(&self, source: &mut dyn Read) -> io::Result<Properties> {
        let text = StringLoader.load(source)?;
        Properties::parse(&text)
    }
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

/// Key/value pairs from a `.properties` file, in file order.
///
/// Supported syntax: `#` and `!` comment lines, `=`, `:` or whitespace
/// between key and value, a trailing `\` to continue a line, and the escapes
/// `\t \n \r \f \uXXXX`. Any other escaped character stands for itself. A
/// repeated key keeps its last value.
///
/// ```rust
/// let props = resloc::Properties::parse("title = A Game of Thrones\nyear: 1996").unwrap();
/// assert_eq!(props.get("title"), Some("A Game of Thrones"));
/// assert_eq!(props.get("year"), Some("1996"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    entries: IndexMap<String, String>,
}

impl Properties {
    /// Parse properties text.
    ///
    /// # Errors
    ///
    /// [`io::ErrorKind::InvalidData`] on a malformed `\uXXXX` escape.
    pub fn parse(text: &str) -> io::Result<Self> {
        let mut entries = IndexMap::new();
        for line in logical_lines(text) {
            let (key, value) = split_entry(&line);
            entries.insert(unescape(key)?, unescape(value)?);
        }
        Ok(Self { entries })
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\x0c')
}

/// Join continuation lines and drop comments and blank lines.
fn logical_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Option<String> = None;

    for raw in text.lines() {
        let line = raw.trim_start_matches(is_blank);
        match current.as_mut() {
            Some(buf) => buf.push_str(line),
            None => {
                if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
                    continue;
                }
                current = Some(line.to_owned());
            }
        }

        if let Some(mut buf) = current.take() {
            if continues(&buf) {
                buf.pop();
                current = Some(buf);
            } else {
                lines.push(buf);
            }
        }
    }

    lines.extend(current);
    lines
}

/// An odd number of trailing backslashes continues the line.
fn continues(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Split a logical line into its raw (still escaped) key and value.
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();
    for (i, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' => {
                key_end = i;
                break;
            }
            c if is_blank(c) => {
                key_end = i;
                break;
            }
            _ => {}
        }
    }

    let rest = line[key_end..].trim_start_matches(is_blank);
    let rest = rest
        .strip_prefix(|c: char| c == '=' || c == ':')
        .unwrap_or(rest)
        .trim_start_matches(is_blank);
    (&line[..key_end], rest)
}

fn unescape(raw: &str) -> io::Result<String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = (hex.len() == 4)
                    .then(|| u32::from_str_radix(&hex, 16).ok())
                    .flatten()
                    .and_then(char::from_u32)
                    .ok_or_else(|| {
                        io::Error::new(
                            io::ErrorKind::InvalidData,
                            format!("malformed \\uxxxx escape: \\u{hex}"),
                        )
                    })?;
                out.push(decoded);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_and_comments() {
        let props = Properties::parse(
            "# comment\n! also a comment\n\na=1\nb : 2\nc 3\n  d=\n",
        )
        .unwrap();
        let pairs: Vec<_> = props.iter().collect();
        assert_eq!(pairs, vec![("a", "1"), ("b", "2"), ("c", "3"), ("d", "")]);
    }

    #[test]
    fn continuation_lines() {
        let props = Properties::parse("fruits = apple, \\\n    banana, \\\n    pear\nnext=x").unwrap();
        assert_eq!(props.get("fruits"), Some("apple, banana, pear"));
        assert_eq!(props.get("next"), Some("x"));
    }

    #[test]
    fn escaped_backslash_does_not_continue() {
        let props = Properties::parse("path=c:\\\\\nother=y").unwrap();
        assert_eq!(props.get("path"), Some("c:\\"));
        assert_eq!(props.get("other"), Some("y"));
    }

    #[test]
    fn escapes_in_keys_and_values() {
        let props = Properties::parse("a\\=b=tab\\there\nsnow=\\u2603").unwrap();
        assert_eq!(props.get("a=b"), Some("tab\there"));
        assert_eq!(props.get("snow"), Some("\u{2603}"));
    }

    #[test]
    fn malformed_unicode_escape() {
        let err = Properties::parse("bad=\\u12").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn last_value_wins() {
        let props = Properties::parse("k=1\nk=2").unwrap();
        assert_eq!(props.len(), 1);
        assert_eq!(props.get("k"), Some("2"));
    }
}
