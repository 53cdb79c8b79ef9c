//! Front-matter parsing and field updates for note text.
//!
//! A note may begin with a block delimited by `---` lines holding
//! `key: value` pairs. Fields are looked up there first, then in the body.

/// Delimiter line of a front-matter block.
const DELIMITER: &str = "---";

/// A parsed view over note text.
///
/// Parsing never fails: text without a well-formed block simply has no
/// front matter. Offsets into the original text are kept so that updates
/// leave everything else byte-for-byte intact.
///
/// # Example
///
/// ```
/// use worktime_engine::notes::NoteDocument;
///
/// let note = "---\nwork_start: 2024-06-03T08:00\n---\n\nNotes of the day";
/// let document = NoteDocument::parse(note);
///
/// assert_eq!(document.timestamp_field("work_start"), Some("2024-06-03T08:00"));
/// assert_eq!(document.body(), "\n\nNotes of the day");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDocument<'a> {
    source: &'a str,
    front_matter: Option<FrontMatter<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct FrontMatter<'a> {
    /// Text between the delimiters, without the newlines next to them.
    inner: &'a str,
    /// Byte offset just past the closing delimiter.
    end: usize,
}

impl FrontMatter<'_> {
    fn inner_start() -> usize {
        DELIMITER.len() + 1
    }

    fn contains(&self, offset: usize) -> bool {
        offset >= Self::inner_start() && offset < Self::inner_start() + self.inner.len()
    }
}

impl<'a> NoteDocument<'a> {
    /// Parses note text.
    ///
    /// The text has front matter iff it starts with `---\n` and a later
    /// `\n---` closes the block.
    pub fn parse(source: &'a str) -> Self {
        let front_matter = source
            .strip_prefix("---\n")
            .and_then(|rest| {
                rest.find("\n---").map(|close| FrontMatter {
                    inner: &rest[..close],
                    end: FrontMatter::inner_start() + close + 1 + DELIMITER.len(),
                })
            });

        Self {
            source,
            front_matter,
        }
    }

    /// Whether the note has a front-matter block.
    pub fn has_front_matter(&self) -> bool {
        self.front_matter.is_some()
    }

    /// Returns the `key: value` pairs of the front matter in order.
    ///
    /// Indented lines, comments and lines without a colon are skipped.
    /// Values are trimmed and stripped of surrounding quotes.
    pub fn front_matter(&self) -> Vec<(&'a str, &'a str)> {
        self.front_matter
            .as_ref()
            .map(|front_matter| {
                front_matter
                    .inner
                    .lines()
                    .filter_map(front_matter_entry)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the front-matter value for `key`.
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.front_matter()
            .into_iter()
            .find(|(entry_key, _)| *entry_key == key)
            .map(|(_, value)| value)
    }

    /// Returns everything after the front-matter block.
    pub fn body(&self) -> &'a str {
        match &self.front_matter {
            Some(front_matter) => &self.source[front_matter.end..],
            None => self.source,
        }
    }

    /// Returns a timestamp-like value stored under `key`.
    ///
    /// The front matter is searched first, then body lines of the form
    /// `key: value`. The value is the leading run of digits, `-`, `T` and
    /// `:`; an empty run counts as absent.
    pub fn timestamp_field(&self, key: &str) -> Option<&'a str> {
        self.get(key).and_then(leading_timestamp).or_else(|| {
            self.body_lines()
                .filter_map(|(_, line)| body_value(line, key))
                .find_map(leading_timestamp)
        })
    }

    /// Returns the note text with `key` set to `value`.
    ///
    /// The first existing `key:` line is rewritten in place. Otherwise the
    /// key is appended to the front matter, or a new block is created at the
    /// top of the note.
    pub fn with_field(&self, key: &str, value: &str) -> String {
        let field = format!("{key}: {value}");

        if let Some((start, end)) = self.field_span(key) {
            let mut updated = String::with_capacity(self.source.len() + field.len());
            updated.push_str(&self.source[..start]);
            updated.push_str(&field);
            updated.push_str(&self.source[end..]);
            return updated;
        }

        match &self.front_matter {
            Some(front_matter) => format!(
                "{DELIMITER}\n{}\n{field}\n{DELIMITER}{}",
                front_matter.inner.trim_end(),
                &self.source[front_matter.end..]
            ),
            None => format!("{DELIMITER}\n{field}\n{DELIMITER}\n\n{}", self.source),
        }
    }

    /// Byte span of the first line holding `key`, excluding indentation and
    /// the line terminator.
    fn field_span(&self, key: &str) -> Option<(usize, usize)> {
        lines_with_offsets(self.source).find_map(|(offset, line)| {
            let in_front_matter = self
                .front_matter
                .as_ref()
                .is_some_and(|front_matter| front_matter.contains(offset));

            let matches = if in_front_matter {
                front_matter_entry(line).is_some_and(|(entry_key, _)| entry_key == key)
            } else {
                body_value(line, key).is_some()
            };

            matches.then(|| {
                let indent = line.len() - line.trim_start().len();
                (offset + indent, offset + line.len())
            })
        })
    }

    fn body_lines(&self) -> impl Iterator<Item = (usize, &'a str)> {
        let start = self.front_matter.as_ref().map_or(0, |front_matter| front_matter.end);
        lines_with_offsets(&self.source[start..]).map(move |(offset, line)| (start + offset, line))
    }
}

fn lines_with_offsets(text: &str) -> impl Iterator<Item = (usize, &str)> {
    let mut offset = 0;
    text.split_inclusive('\n').map(move |raw| {
        let start = offset;
        offset += raw.len();
        (start, raw.trim_end_matches(['\n', '\r']))
    })
}

fn front_matter_entry(line: &str) -> Option<(&str, &str)> {
    if line.starts_with(char::is_whitespace) || line.starts_with('#') {
        return None;
    }
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, unquote(value.trim())))
}

fn body_value<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    line.trim_start()
        .strip_prefix(key)
        .and_then(|rest| rest.strip_prefix(':'))
}

fn unquote(value: &str) -> &str {
    ['"', '\'']
        .into_iter()
        .find_map(|quote| {
            value
                .strip_prefix(quote)
                .and_then(|inner| inner.strip_suffix(quote))
        })
        .unwrap_or(value)
}

fn leading_timestamp(value: &str) -> Option<&str> {
    let value = value.trim_start();
    let len = value
        .find(|c: char| !(c.is_ascii_digit() || c == '-' || c == 'T' || c == ':'))
        .unwrap_or(value.len());
    (len > 0).then(|| &value[..len])
}
