//! Front-matter parsing and serialization

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Marker line that opens and closes the metadata block
pub const DELIMITER: &str = "---";

/// YAML keys backed by a `FrontMatter` field
const RECOGNIZED_KEYS: [&str; 7] = [
    "title",
    "date",
    "draft",
    "lastmod",
    "publishDate",
    "slug",
    "tags",
];

/// Errors produced while reading or writing a front-matter block
#[derive(Error, Debug)]
pub enum FrontMatterError {
    #[error("document does not start with a `---` line")]
    MissingOpeningDelimiter,

    #[error("no closing `---` line before end of document")]
    MissingClosingDelimiter,

    #[error("invalid front matter: {0}")]
    Invalid(#[source] serde_yaml::Error),

    #[error("failed to serialize front matter: {0}")]
    Serialize(#[source] serde_yaml::Error),
}

/// Accepts either a single string or a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

/// Metadata block of a post.
///
/// Every recognized key is always written back, in declaration order, so a
/// field the author left out comes back as its zero value. Keys this type
/// does not know about are kept in `extra` in the order they were authored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    pub title: String,
    /// Compared as plain text when ordering posts
    pub date: String,
    pub draft: bool,
    #[serde(rename = "lastmod")]
    pub last_modified: String,
    #[serde(rename = "publishDate")]
    pub publish_date: String,
    /// File stem chosen at creation time
    pub slug: String,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Vec<String>,

    /// Unrecognized keys, preserved across an edit
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Split a document into its front matter and body.
    ///
    /// The body is returned exactly as it appears after the closing
    /// delimiter line, including any leading blank lines.
    pub fn parse(document: &str) -> Result<(Self, &str), FrontMatterError> {
        let document = document.strip_prefix('\u{feff}').unwrap_or(document);

        let mut lines = document.split_inclusive('\n');
        match lines.next() {
            Some(first) if first.trim_end() == DELIMITER => {}
            _ => return Err(FrontMatterError::MissingOpeningDelimiter),
        }

        let block_start = document.find('\n').map(|pos| pos + 1).unwrap_or(document.len());
        let mut offset = block_start;

        for line in lines {
            if line.trim_end() == DELIMITER {
                let yaml = &document[block_start..offset];
                let body = &document[offset + line.len()..];
                return Ok((Self::from_yaml(yaml)?, body));
            }
            offset += line.len();
        }

        Err(FrontMatterError::MissingClosingDelimiter)
    }

    fn from_yaml(yaml: &str) -> Result<Self, FrontMatterError> {
        if yaml.trim().is_empty() {
            return Ok(FrontMatter::default());
        }
        serde_yaml::from_str(yaml).map_err(FrontMatterError::Invalid)
    }

    /// Render the full file contents: delimiter, metadata, delimiter, body.
    ///
    /// The body is appended verbatim. Entries in `extra` named like a
    /// recognized key are dropped; the field value is written instead.
    pub fn to_document(&self, body: &str) -> Result<String, FrontMatterError> {
        let yaml = if self.extra.keys().any(|k| RECOGNIZED_KEYS.contains(&k.as_str())) {
            let mut metadata = self.clone();
            metadata
                .extra
                .retain(|k, _| !RECOGNIZED_KEYS.contains(&k.as_str()));
            serde_yaml::to_string(&metadata)
        } else {
            serde_yaml::to_string(self)
        }
        .map_err(FrontMatterError::Serialize)?;

        let mut document = String::with_capacity(yaml.len() + body.len() + 8);
        document.push_str(DELIMITER);
        document.push('\n');
        document.push_str(&yaml);
        if !yaml.ends_with('\n') {
            document.push('\n');
        }
        document.push_str(DELIMITER);
        document.push('\n');
        document.push_str(body);

        Ok(document)
    }

    /// Interpret the date string for display. Ordering never uses this.
    pub fn parsed_date(&self) -> Option<DateTime<Local>> {
        parse_date_string(&self.date)
    }
}

/// Parse a date string in the formats authors commonly use
fn parse_date_string(s: &str) -> Option<DateTime<Local>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local));
    }

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Local.from_local_datetime(&dt).earliest();
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Local.from_local_datetime(&d.and_hms_opt(0, 0, 0)?).earliest();
        }
    }

    None
}
