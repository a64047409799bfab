use confix_core::{SourceValue, ValueSource};
use std::collections::HashMap;
use std::path::Path;
use std::str::{Chars, FromStr};

use crate::error::{ToolsError, ToolsResult};

const WHITESPACE: [char; 3] = [' ', '\t', '\x0c'];

/// Ordered key/value pairs loaded from `.properties` text
///
/// Supports `#` and `!` comment lines, `=`, `:` or whitespace separators,
/// backslash line continuations and the `\t \n \r \f \uXXXX` escapes. A
/// repeated key keeps its first position and its last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertiesFile {
    entries: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl PropertiesFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse properties text
    pub fn parse(text: &str) -> ToolsResult<Self> {
        let lines = natural_lines(text);
        let mut file = Self::new();
        let mut next = 0;

        while next < lines.len() {
            let line_number = next + 1;
            let line = lines[next].trim_start_matches(WHITESPACE);
            next += 1;

            if line.is_empty() || line.starts_with(['#', '!']) {
                continue;
            }

            let mut logical = line.to_string();
            while has_continuation(&logical) {
                logical.pop();
                match lines.get(next) {
                    Some(continued) => {
                        logical.push_str(continued.trim_start_matches(WHITESPACE));
                        next += 1;
                    }
                    None => break,
                }
            }

            let (key, value) = split_entry(&logical);
            file.insert(unescape(key, line_number)?, unescape(value, line_number)?);
        }

        Ok(file)
    }

    /// Read and parse a properties file
    pub fn load(path: impl AsRef<Path>) -> ToolsResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let file = Self::parse(&text)?;
        tracing::debug!("Loaded {} properties from {}", file.len(), path.display());
        Ok(file)
    }

    /// Set `key`, keeping its original position when already present
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.index.get(&key) {
            Some(&position) => self.entries[position].1 = value,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.index
            .get(key)
            .map(|&position| self.entries[position].1.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in first-insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromStr for PropertiesFile {
    type Err = ToolsError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}

impl ValueSource for PropertiesFile {
    fn lookup(&self, key: &str) -> Option<SourceValue<'_>> {
        self.get(key).map(SourceValue::Text)
    }

    fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|(key, _)| key.clone()).collect()
    }
}

/// Split on `\n`, `\r` or `\r\n`
fn natural_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let bytes = text.as_bytes();
    let mut position = 0;

    while position < bytes.len() {
        match bytes[position] {
            b'\n' => {
                lines.push(&text[start..position]);
                start = position + 1;
            }
            b'\r' => {
                lines.push(&text[start..position]);
                if bytes.get(position + 1) == Some(&b'\n') {
                    position += 1;
                }
                start = position + 1;
            }
            _ => {}
        }
        position += 1;
    }

    if start < bytes.len() {
        lines.push(&text[start..]);
    }
    lines
}

/// An odd run of trailing backslashes continues the line
fn has_continuation(line: &str) -> bool {
    line.bytes().rev().take_while(|&b| b == b'\\').count() % 2 == 1
}

/// Split a logical line into raw key and raw value text
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();

    for (position, c) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == '=' || c == ':' || WHITESPACE.contains(&c) {
            key_end = position;
            break;
        }
    }

    let mut has_separator = false;
    let mut value_start = key_end;
    for c in line[key_end..].chars() {
        if WHITESPACE.contains(&c) {
            value_start += c.len_utf8();
        } else if !has_separator && (c == '=' || c == ':') {
            has_separator = true;
            value_start += c.len_utf8();
        } else {
            break;
        }
    }

    (&line[..key_end], &line[value_start..])
}

fn unescape(raw: &str, line: usize) -> ToolsResult<String> {
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
                let malformed = || ToolsError::properties(line, "malformed \\uXXXX encoding");
                let unit = hex4(&mut chars).ok_or_else(malformed)?;
                let code = match unit {
                    0xD800..=0xDBFF => {
                        let low = low_surrogate(&mut chars).ok_or_else(|| {
                            ToolsError::properties(line, "high surrogate without a following low surrogate")
                        })?;
                        0x10000 + ((unit - 0xD800) << 10) + (low - 0xDC00)
                    }
                    _ => unit,
                };
                out.push(char::from_u32(code).ok_or_else(malformed)?);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}

fn hex4(chars: &mut Chars<'_>) -> Option<u32> {
    let digits: String = chars.by_ref().take(4).collect();
    if digits.len() != 4 {
        return None;
    }
    u32::from_str_radix(&digits, 16).ok()
}

/// Consume a `\uXXXX` low surrogate, leaving `chars` untouched if there is none
fn low_surrogate(chars: &mut Chars<'_>) -> Option<u32> {
    let mut ahead = chars.clone();
    if ahead.next() != Some('\\') || ahead.next() != Some('u') {
        return None;
    }
    let unit = hex4(&mut ahead).filter(|unit| (0xDC00..=0xDFFF).contains(unit))?;
    *chars = ahead;
    Some(unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separators() {
        let file = PropertiesFile::parse("a=1\nb: 2\nc 3\nd = = 4\ne\n").unwrap();
        assert_eq!(file.get("a"), Some("1"));
        assert_eq!(file.get("b"), Some("2"));
        assert_eq!(file.get("c"), Some("3"));
        assert_eq!(file.get("d"), Some("= 4"));
        assert_eq!(file.get("e"), Some(""));
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let file = PropertiesFile::parse("# comment\n  ! also comment\n\n   \nkey=value # not a comment\n").unwrap();
        assert_eq!(file.len(), 1);
        assert_eq!(file.get("key"), Some("value # not a comment"));
    }

    #[test]
    fn test_line_continuation() {
        let text = "fruits = apple, banana, \\\n         pear, \\\r\n    cantaloupe\nnext=1";
        let file = PropertiesFile::parse(text).unwrap();
        assert_eq!(file.get("fruits"), Some("apple, banana, pear, cantaloupe"));
        assert_eq!(file.get("next"), Some("1"));
    }

    #[test]
    fn test_escaped_backslash_does_not_continue() {
        let file = PropertiesFile::parse("path=c:\\\\\nnext=1").unwrap();
        assert_eq!(file.get("path"), Some("c:\\"));
        assert_eq!(file.get("next"), Some("1"));
    }

    #[test]
    fn test_escapes() {
        let file = PropertiesFile::parse("key\\ with\\=sep=tab\\there\\u0041\\q").unwrap();
        assert_eq!(file.get("key with=sep"), Some("tab\there\u{41}q"));
    }

    #[test]
    fn test_malformed_unicode_escape() {
        let error = PropertiesFile::parse("ok=1\nbad=\\u00G1").unwrap_err();
        assert!(matches!(error, ToolsError::Properties { line: 2, .. }));
    }

    #[test]
    fn test_surrogate_pair_escape() {
        let file = PropertiesFile::parse("smile=\\uD83D\\uDE00!\nplain=\\u00e9").unwrap();
        assert_eq!(file.get("smile"), Some("\u{1F600}!"));
        assert_eq!(file.get("plain"), Some("\u{e9}"));
    }

    #[test]
    fn test_unpaired_surrogate_escape() {
        let error = PropertiesFile::parse("a=\\uD83Dx").unwrap_err();
        assert!(matches!(error, ToolsError::Properties { line: 1, .. }));

        let error = PropertiesFile::parse("a=1\nb=\\uDE00").unwrap_err();
        assert!(matches!(error, ToolsError::Properties { line: 2, .. }));
    }

    #[test]
    fn test_duplicates_keep_position_and_last_value() {
        let file: PropertiesFile = "a=1\nb=2\na=3".parse().unwrap();
        let entries: Vec<_> = file.iter().collect();
        assert_eq!(entries, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_value_source() {
        let file = PropertiesFile::parse("x=1\r\ny=2\rz=3").unwrap();
        assert!(matches!(file.lookup("y"), Some(SourceValue::Text("2"))));
        assert_eq!(ValueSource::keys(&file), vec!["x", "y", "z"]);
        assert!(!file.contains_key("w"));
    }
}
