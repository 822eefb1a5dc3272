//! Field validation for the content form.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::{Regex, RegexBuilder};

use crate::types::ContentType;

pub const TITLE_REQUIRED: &str = "Title is required";
pub const LINK_REQUIRED: &str = "Link is required";
pub const LINK_INVALID: &str = "Invalid URL format";
pub const TYPE_REQUIRED: &str = "Content type is required";

/// Form field an error is attached to. Ordered as the form lays them out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Title,
    Link,
    Type,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Link => "link",
            Field::Type => "type",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field error messages from one validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn remove(&mut self, field: Field) -> Option<String> { self.0.remove(&field) }

    pub fn get(&self, field: Field) -> Option<&str> { self.0.get(&field).map(String::as_str) }

    pub fn contains(&self, field: Field) -> bool { self.0.contains_key(&field) }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn len(&self) -> usize { self.0.len() }

    pub fn clear(&mut self) { self.0.clear() }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first { f.write_str("; ")?; }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

static URL_RE: OnceLock<Regex> = OnceLock::new();

fn url_regex() -> &'static Regex {
    URL_RE.get_or_init(|| {
        let pattern = concat!(
            r"^(https?://)?",
            r"((([a-z0-9]([a-z0-9-]*[a-z0-9])*)\.)+[a-z]{2,}|",
            r"(([0-9]{1,3}\.){3}[0-9]{1,3}))",
            r"(:[0-9]+)?(/[-a-z0-9%_.~+]*)*",
            r"(\?[;&a-z0-9%_.~+=-]*)?",
            r"(#[-a-z0-9_]*)?$",
        );
        // ASCII-only case folding: no Unicode digits, no long s or Kelvin sign.
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .unicode(false)
            .build()
            .unwrap_or_else(|error| panic!("url regex failed to compile: {error}"))
    })
}

/// Whether `link` has the shape of a web address: optional http(s) scheme,
/// a domain or dotted IPv4 host, then optional port, path, query and fragment.
pub fn is_valid_url(link: &str) -> bool {
    url_regex().is_match(link)
}

/// Trim the way browsers do, which also strips the byte order mark.
fn trim_input(s: &str) -> &str {
    s.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Check raw form values. Blank checks trim first; the URL check runs on the
/// trimmed link.
pub fn validate(title: &str, link: &str, content_type: Option<ContentType>) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if trim_input(title).is_empty() {
        errors.insert(Field::Title, TITLE_REQUIRED);
    }

    let link = trim_input(link);
    if link.is_empty() {
        errors.insert(Field::Link, LINK_REQUIRED);
    } else if !is_valid_url(link) {
        errors.insert(Field::Link, LINK_INVALID);
    }

    if content_type.is_none() {
        errors.insert(Field::Type, TYPE_REQUIRED);
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
