//! Line classification for INI documents.
//!
//! Stateless helpers that look at exactly one raw line and decide what it is.
//! Nothing here allocates except [`uncomment`] and [`comment_out`], which
//! build replacement lines for the mutation engine.
//!
//! # Recognized shapes
//!
//! | Shape            | Example                 | [`LineKind`]                 |
//! |------------------|-------------------------|------------------------------|
//! | blank            | `   `                   | [`LineKind::Blank`]          |
//! | comment          | `; bot_race = Zerg`     | [`LineKind::Comment`]        |
//! | header           | `[bwheadless]`          | [`LineKind::Header`]         |
//! | broken header    | `[bwheadless`           | [`LineKind::MalformedHeader`]|
//! | entry            | `bot_name = X ; note`   | [`LineKind::Entry`]          |
//! | anything else    | `just some words`       | [`LineKind::Garbage`]        |

/// Separates a key from its value.
pub const KEY_DELIMITER: char = '=';

/// Starts a comment, either for a whole line or trailing an entry.
pub const COMMENT_DELIMITER: char = ';';

const HEADER_OPEN: char = '[';
const HEADER_CLOSE: char = ']';

/// Classification of a single raw line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// Empty or whitespace only.
    Blank,

    /// First non-whitespace character is the comment delimiter.
    Comment,

    /// A valid `[name]` header; carries the trimmed name.
    Header(&'a str),

    /// Starts with `[` that is never closed (ignoring a trailing comment).
    ///
    /// Lines after it are unparseable until the next valid header.
    MalformedHeader,

    /// A `key = value` line.
    Entry {
        /// Trimmed key (never empty).
        key: &'a str,
        /// Trimmed value (may be empty).
        value: &'a str,
        /// Trailing comment including its delimiter, if any.
        comment: Option<&'a str>,
    },

    /// Anything else. Preserved verbatim but never indexed.
    Garbage,
}

impl LineKind<'_> {
    /// Returns `true` for lines that end a section span.
    #[must_use]
    pub const fn is_boundary(&self) -> bool {
        matches!(self, Self::Header(_) | Self::MalformedHeader)
    }
}

/// Classifies one raw line.
///
/// A trailing comment after a header (`[ai] ; bot settings`) is tolerated.
/// A bracketed line that is not a header but does close its bracket, such
/// as `[a]b = c` or `[ ]`, is classified like any other line.
///
/// # Examples
///
/// ```
/// use launcher_ini::store::classify::{LineKind, classify};
///
/// assert_eq!(classify("[ai]"), LineKind::Header("ai"));
/// assert_eq!(classify("; off"), LineKind::Comment);
/// assert_eq!(
///     classify("ai = bot.dll ; mine"),
///     LineKind::Entry { key: "ai", value: "bot.dll", comment: Some("; mine") }
/// );
/// ```
#[must_use]
pub fn classify(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();

    if trimmed.is_empty() {
        return LineKind::Blank;
    }

    if trimmed.starts_with(COMMENT_DELIMITER) {
        return LineKind::Comment;
    }

    if trimmed.starts_with(HEADER_OPEN) {
        let content = remove_comment(trimmed);
        if let Some(name) = parse_section_name(content) {
            return LineKind::Header(name);
        }
        // Only an unclosed bracket is a broken header; `[a]b = c` is split below
        if !content.contains(HEADER_CLOSE) {
            return LineKind::MalformedHeader;
        }
    }

    match split_key_value(remove_comment(line)) {
        Some((key, value)) => LineKind::Entry {
            key,
            value,
            comment: extract_trailing_comment(line),
        },
        None => LineKind::Garbage,
    }
}

/// Returns `true` iff the trimmed line is at least `[x]` long and bracketed.
#[must_use]
pub fn is_section_header(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 3 && trimmed.starts_with(HEADER_OPEN) && trimmed.ends_with(HEADER_CLOSE)
}

/// Extracts the trimmed name between the brackets of a header line.
///
/// Returns `None` for malformed headers and for headers whose name is blank,
/// since the empty name is reserved for the global section.
#[must_use]
pub fn parse_section_name(line: &str) -> Option<&str> {
    if !is_section_header(line) {
        return None;
    }

    let trimmed = line.trim();
    let name = trimmed[1..trimmed.len() - 1].trim();

    if name.is_empty() { None } else { Some(name) }
}

/// Returns the trimmed text before the first comment delimiter.
///
/// A line that is entirely a comment yields `""`.
#[must_use]
pub fn remove_comment(line: &str) -> &str {
    line.find(COMMENT_DELIMITER)
        .map_or(line, |pos| &line[..pos])
        .trim()
}

/// Splits on the first key delimiter.
///
/// Returns `None` when there is no delimiter or the key would be empty.
/// The value may be empty, which is distinct from absent.
#[must_use]
pub fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once(KEY_DELIMITER)?;
    let key = key.trim();

    if key.is_empty() {
        return None;
    }

    Some((key, value.trim()))
}

/// Returns the trailing comment, delimiter included, trimmed.
#[must_use]
pub fn extract_trailing_comment(line: &str) -> Option<&str> {
    line.find(COMMENT_DELIMITER).map(|pos| line[pos..].trim())
}

/// Returns the leading whitespace of a line.
#[must_use]
pub fn indentation(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

/// Removes one leading comment delimiter and the whitespace right after it.
///
/// Indentation before the delimiter is kept. Returns `None` if the line is
/// not a full-line comment.
///
/// ```
/// use launcher_ini::store::classify::uncomment;
///
/// assert_eq!(uncomment("; bot_race = Zerg").as_deref(), Some("bot_race = Zerg"));
/// assert_eq!(uncomment("  ;ai=x").as_deref(), Some("  ai=x"));
/// assert_eq!(uncomment("ai = x"), None);
/// ```
#[must_use]
pub fn uncomment(line: &str) -> Option<String> {
    let indent = indentation(line);
    let body = line[indent.len()..].strip_prefix(COMMENT_DELIMITER)?;
    Some(format!("{indent}{}", body.trim_start()))
}

/// Prefixes a line with the comment delimiter, after its indentation.
///
/// [`uncomment`] reverses this exactly.
#[must_use]
pub fn comment_out(line: &str) -> String {
    let indent = indentation(line);
    format!("{indent}{COMMENT_DELIMITER}{}", &line[indent.len()..])
}

/// Formats an entry line as `key = value`, keeping a trailing comment.
#[must_use]
pub fn format_entry(indent: &str, key: &str, value: &str, comment: Option<&str>) -> String {
    let mut line = format!("{indent}{key} {KEY_DELIMITER} {value}");
    if value.is_empty() {
        line.truncate(line.trim_end().len());
    }
    if let Some(comment) = comment {
        line.push(' ');
        line.push_str(comment);
    }
    line
}

/// Formats a section header line.
#[must_use]
pub fn format_header(name: &str) -> String {
    format!("{HEADER_OPEN}{name}{HEADER_CLOSE}")
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
