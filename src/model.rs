//! Result containers: song metadata ([`Header`]), line-indexed text
//! ([`Lyrics`]) and the aggregate handed back to callers ([`FetchResult`]).

use std::fmt;
use std::ops::Index;

use crate::text::NameSet;

/// Normalized song metadata. Immutable once built by a pipeline.
///
/// `title` is always present. The four people fields are each either absent
/// (the site does not expose them) or a non-empty set of distinct, trimmed
/// names; an adapter that finds an empty value records absence, never an
/// empty set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    title: String,
    artist: Option<NameSet>,
    lyricist: Option<NameSet>,
    composer: Option<NameSet>,
    arranger: Option<NameSet>,
}

impl Header {
    pub(crate) fn new(title: impl Into<String>) -> Self {
        Header {
            title: title.into(),
            artist: None,
            lyricist: None,
            composer: None,
            arranger: None,
        }
    }

    pub(crate) fn with_artist(mut self, names: NameSet) -> Self {
        if !names.is_empty() {
            self.artist = Some(names);
        }
        self
    }

    pub(crate) fn with_lyricist(mut self, names: NameSet) -> Self {
        if !names.is_empty() {
            self.lyricist = Some(names);
        }
        self
    }

    pub(crate) fn with_composer(mut self, names: NameSet) -> Self {
        if !names.is_empty() {
            self.composer = Some(names);
        }
        self
    }

    pub(crate) fn with_arranger(mut self, names: NameSet) -> Self {
        if !names.is_empty() {
            self.arranger = Some(names);
        }
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn artist(&self) -> Option<&NameSet> {
        self.artist.as_ref()
    }

    pub fn lyricist(&self) -> Option<&NameSet> {
        self.lyricist.as_ref()
    }

    pub fn composer(&self) -> Option<&NameSet> {
        self.composer.as_ref()
    }

    pub fn arranger(&self) -> Option<&NameSet> {
        self.arranger.as_ref()
    }

    /// Iterates present fields in fixed order: title, artist, lyricist,
    /// composer, arranger. Title always comes first.
    pub fn iter(&self) -> impl Iterator<Item = HeaderItem<'_>> {
        let people = [
            ("Artist", self.artist.as_ref()),
            ("Lyricist", self.lyricist.as_ref()),
            ("Composer", self.composer.as_ref()),
            ("Arranger", self.arranger.as_ref()),
        ];

        std::iter::once(HeaderItem {
            name: "Title",
            value: HeaderValue::Text(&self.title),
        })
        .chain(people.into_iter().filter_map(|(name, names)| {
            names.map(|n| HeaderItem {
                name,
                value: HeaderValue::Names(n),
            })
        }))
    }
}

impl<'a> IntoIterator for &'a Header {
    type Item = HeaderItem<'a>;
    type IntoIter = Box<dyn Iterator<Item = HeaderItem<'a>> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// One present header field, for iteration and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderItem<'a> {
    pub name: &'static str,
    pub value: HeaderValue<'a>,
}

/// Title is single-valued; every other field is a name set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderValue<'a> {
    Text(&'a str),
    Names(&'a NameSet),
}

impl HeaderValue<'_> {
    /// Joins multi-valued fields with `delimiter`.
    pub fn join(&self, delimiter: &str) -> String {
        match self {
            HeaderValue::Text(s) => (*s).to_string(),
            HeaderValue::Names(names) => {
                names.iter().cloned().collect::<Vec<_>>().join(delimiter)
            }
        }
    }
}

impl fmt::Display for HeaderValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join(", "))
    }
}

impl fmt::Display for HeaderItem<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.value)
    }
}

/// Ordered, 0-indexed lyric lines. An empty string is a deliberate blank
/// line; an out-of-range index is a missing line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Lyrics {
    lines: Vec<String>,
}

impl Lyrics {
    pub(crate) fn new(lines: Vec<String>) -> Self {
        Lyrics { lines }
    }

    /// Builds lyrics from raw line fragments, trimming each.
    pub(crate) fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Lyrics {
            lines: lines
                .into_iter()
                .map(|l| crate::text::trim(l.as_ref()).to_string())
                .collect(),
        }
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }
}

impl Index<usize> for Lyrics {
    type Output = str;

    /// Panics if `index >= line_count()`; use [`Lyrics::line`] for a checked
    /// lookup.
    fn index(&self, index: usize) -> &str {
        &self.lines[index]
    }
}

impl<'a> IntoIterator for &'a Lyrics {
    type Item = &'a str;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, String>, fn(&String) -> &str>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter().map(String::as_str)
    }
}

impl fmt::Display for Lyrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            f.write_str(line)?;
        }
        Ok(())
    }
}

/// Everything one dispatch produces. Owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    pub header: Header,
    pub lyrics: Lyrics,
    pub source_url: String,
}
