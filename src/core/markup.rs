//! Regex-based scanning of `data-i18n` annotated markup.
//!
//! This is structural pattern matching over markup text, not a parser. It is
//! correct for well-formed elements whose key attribute sits in the opening
//! tag; quoted attribute values may hold `<` or `>`. Comments containing tags
//! or unbalanced markup can make [`extract_content`] return `None` or truncated content.
//! Callers treat `None` as an extraction failure and leave the store alone.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use super::key::{TranslationKey, strip_annotations};

static KEY_ATTRIBUTE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"data-i18n="([^"]+)""#).unwrap());

static TAG_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<([A-Za-z][A-Za-z0-9-]*)").unwrap());

/// Any opening or closing tag: (1) closing slash, (2) name, (3) self-closing slash.
static TAG_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<(/?)([A-Za-z][A-Za-z0-9-]*)\b(?:[^>"']|"[^"]*"|'[^']*')*?(/?)>"#).unwrap()
});

static PLACEHOLDER_ATTRIBUTE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?:^|\s)placeholder\s*=\s*"([^"]*)""#).unwrap());

static STRIP_TAGS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<(?:[^>"']|"[^"]*"|'[^']*')+>"#).unwrap());

static INDENTED_NEWLINE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s+").unwrap());

static SPACE_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());

static WHITESPACE_RUN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// A key reference together with where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyOccurrence {
    pub key: TranslationKey,
    /// 1-based line of the attribute.
    pub line: usize,
    /// 1-based column (in chars) of the attribute.
    pub col: usize,
    /// Byte range of the whole `data-i18n="..."` attribute.
    pub attribute: Range<usize>,
}

/// Every key referenced by the document, in document order, duplicates included.
///
/// The iterator borrows the document and holds no other state, so scanning the
/// same document again yields the same sequence.
pub fn extract_keys(document: &str) -> impl Iterator<Item = TranslationKey> + '_ {
    KEY_ATTRIBUTE_REGEX
        .captures_iter(document)
        .filter_map(|caps| caps.get(1))
        .map(|value| TranslationKey::parse(value.as_str()))
}

/// Like [`extract_keys`], with line and column information for reporting.
pub fn key_occurrences(document: &str) -> impl Iterator<Item = KeyOccurrence> + '_ {
    let line_index = build_line_index(document);
    KEY_ATTRIBUTE_REGEX
        .captures_iter(document)
        .filter_map(move |caps| {
            let whole = caps.get(0)?;
            let value = caps.get(1)?;
            let line = offset_to_line(&line_index, whole.start());
            let line_start = line_index[line - 1];
            let col = document[line_start..whole.start()].chars().count() + 1;
            Some(KeyOccurrence {
                key: TranslationKey::parse(value.as_str()),
                line,
                col,
                attribute: whole.range(),
            })
        })
}

/// Text of the 1-based `line`, without its line terminator.
pub fn source_line(document: &str, line: usize) -> &str {
    document
        .lines()
        .nth(line.saturating_sub(1))
        .unwrap_or("")
        .trim_end_matches('\r')
}

/// Content of the first element whose key attribute matches `key`.
///
/// Attributes are compared by annotation-free path. The annotation of `key`
/// decides what is returned:
///
/// - `[placeholder]`: the element's `placeholder` attribute
/// - `[html]`: inner markup, with indentation and runs of spaces collapsed
/// - otherwise: inner text with every tag stripped
///
/// Returns `None` when no element matches or the trimmed content is empty.
///
/// ```
/// use pageglot::core::{TranslationKey, markup::extract_content};
///
/// let doc = r#"<p data-i18n="[html]intro">Read <b>this</b></p>"#;
/// assert_eq!(
///     extract_content(doc, &TranslationKey::parse("[html]intro")).as_deref(),
///     Some("Read <b>this</b>")
/// );
/// assert_eq!(
///     extract_content(doc, &TranslationKey::parse("intro")).as_deref(),
///     Some("Read this")
/// );
/// ```
pub fn extract_content(document: &str, key: &TranslationKey) -> Option<String> {
    let attribute = KEY_ATTRIBUTE_REGEX
        .captures_iter(document)
        .filter_map(|caps| caps.get(0).zip(caps.get(1)))
        .find(|(_, value)| strip_annotations(value.as_str()) == key.path())
        .map(|(whole, _)| whole.range())?;

    let element = Element::locate(document, attribute)?;

    let content = if key.is_placeholder() {
        element.placeholder()?.to_string()
    } else if key.is_html() {
        collapse_markup_whitespace(element.inner()?)
    } else {
        let text = STRIP_TAGS_REGEX.replace_all(element.inner()?, "");
        WHITESPACE_RUN_REGEX.replace_all(&text, " ").into_owned()
    };

    let content = content.trim();
    (!content.is_empty()).then(|| content.to_string())
}

/// An element located from one of its attributes.
struct Element<'a> {
    document: &'a str,
    name: &'a str,
    opening_tag: &'a str,
    inner_start: usize,
    self_closing: bool,
}

impl<'a> Element<'a> {
    fn locate(document: &'a str, attribute: Range<usize>) -> Option<Self> {
        let open_start = opening_tag_start(document, attribute.start)?;
        let name = TAG_NAME_REGEX
            .captures(&document[open_start..])?
            .get(1)?
            .as_str();
        let open_end = opening_tag_end(document, attribute.end)?;
        let opening_tag = &document[open_start..open_end];
        let self_closing = opening_tag.ends_with("/>")
            || VOID_ELEMENTS
                .iter()
                .any(|void| void.eq_ignore_ascii_case(name));

        Some(Self {
            document,
            name,
            opening_tag,
            inner_start: open_end,
            self_closing,
        })
    }

    fn placeholder(&self) -> Option<&'a str> {
        PLACEHOLDER_ATTRIBUTE_REGEX
            .captures(self.opening_tag)?
            .get(1)
            .map(|m| m.as_str())
    }

    /// Content up to the matching closing tag, counting nested same-name elements.
    fn inner(&self) -> Option<&'a str> {
        if self.self_closing {
            return None;
        }

        let rest = &self.document[self.inner_start..];
        let mut depth = 1usize;
        for caps in TAG_REGEX.captures_iter(rest) {
            let (Some(tag), Some(name)) = (caps.get(0), caps.get(2)) else {
                continue;
            };
            if !name.as_str().eq_ignore_ascii_case(self.name) {
                continue;
            }
            let is_closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
            let is_self_closing = caps.get(3).is_some_and(|m| !m.as_str().is_empty());

            if is_closing {
                depth -= 1;
                if depth == 0 {
                    return Some(&rest[..tag.start()]);
                }
            } else if !is_self_closing {
                depth += 1;
            }
        }
        None
    }
}

/// Start of the opening tag holding the attribute at `attribute_start`.
///
/// Scans backwards, skipping quoted attribute values, so `<` and `>` inside
/// them are not taken for tag delimiters. `None` when the attribute sits in
/// text rather than in a tag.
fn opening_tag_start(document: &str, attribute_start: usize) -> Option<usize> {
    let mut end = attribute_start;
    loop {
        let i = document[..end].rfind(['<', '>', '"', '\''])?;
        match document.as_bytes()[i] {
            b'<' => return Some(i),
            b'>' => return None,
            quote => end = document[..i].rfind(char::from(quote))?,
        }
    }
}

/// End (exclusive) of the opening tag, scanning forward from `from` past quoted values.
fn opening_tag_end(document: &str, from: usize) -> Option<usize> {
    let mut start = from;
    loop {
        let i = start + document[start..].find(['>', '"', '\''])?;
        match document.as_bytes()[i] {
            b'>' => return Some(i + 1),
            quote => {
                let value_start = i + 1;
                start = value_start + document[value_start..].find(char::from(quote))? + 1;
            }
        }
    }
}

fn collapse_markup_whitespace(markup: &str) -> String {
    let markup = INDENTED_NEWLINE_REGEX.replace_all(markup.trim(), "\n");
    SPACE_RUN_REGEX.replace_all(&markup, " ").into_owned()
}

/// Byte offsets where each line starts.
fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in content.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// 1-based line number containing `offset`.
fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    }
}
