//! Query term building.
//!
//! A query is a keyword followed by ` name:value` pairs for every active
//! qualifier that has a value, e.g. `needle language:go size:>1000`.
//! See <https://docs.github.com/en/search-github/searching-on-github/searching-code>.

use std::collections::HashSet;
use std::fmt;

use tracing::debug;

use crate::error::SearchError;

/// Separator between a qualifier name and its value. Stripped from keywords.
pub const RESERVED_KEYWORD_CHAR: char = ':';

/// A named search restriction appended to a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Qualifier {
    In,
    Language,
    Fork,
    Size,
    Path,
    Filename,
    Extension,
    User,
    Repo,
}

impl Qualifier {
    /// Every qualifier, in the order they are appended to a query.
    pub const ALL: [Qualifier; 9] = [
        Qualifier::In,
        Qualifier::Language,
        Qualifier::Fork,
        Qualifier::Size,
        Qualifier::Path,
        Qualifier::Filename,
        Qualifier::Extension,
        Qualifier::User,
        Qualifier::Repo,
    ];

    /// Name used on the left of `name:value`.
    pub fn name(self) -> &'static str {
        match self {
            Qualifier::In => "in",
            Qualifier::Language => "language",
            Qualifier::Fork => "fork",
            Qualifier::Size => "size",
            Qualifier::Path => "path",
            Qualifier::Filename => "filename",
            Qualifier::Extension => "extension",
            Qualifier::User => "user",
            Qualifier::Repo => "repo",
        }
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered qualifier slots used to compose queries.
///
/// Only the qualifiers the set was built with are accepted; they are always
/// emitted in [`Qualifier::ALL`] order regardless of the order they were
/// enabled or assigned in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifierSet {
    slots: Vec<(Qualifier, String)>,
}

impl Default for QualifierSet {
    fn default() -> Self {
        Self::with_active(Qualifier::ALL)
    }
}

impl QualifierSet {
    /// Build a set where only `active` qualifiers may carry values.
    pub fn with_active(active: impl IntoIterator<Item = Qualifier>) -> Self {
        let mut qualifiers: Vec<Qualifier> = active.into_iter().collect();
        qualifiers.sort();
        qualifiers.dedup();
        Self {
            slots: qualifiers.into_iter().map(|q| (q, String::new())).collect(),
        }
    }

    /// Assign a value to an active qualifier, replacing any previous value.
    pub fn set(&mut self, qualifier: Qualifier, value: impl Into<String>) -> Result<(), SearchError> {
        match self.slots.iter_mut().find(|(q, _)| *q == qualifier) {
            Some((_, slot)) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(SearchError::Config(format!(
                "qualifier `{qualifier}` is not enabled"
            ))),
        }
    }

    /// Builder-style [`QualifierSet::set`].
    pub fn with(mut self, qualifier: Qualifier, value: impl Into<String>) -> Result<Self, SearchError> {
        self.set(qualifier, value)?;
        Ok(self)
    }

    /// Current value of `qualifier`, if it is active and non-empty.
    pub fn get(&self, qualifier: Qualifier) -> Option<&str> {
        self.slots
            .iter()
            .find(|(q, _)| *q == qualifier)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.trim().is_empty())
    }

    /// Active qualifiers, in query order.
    pub fn active(&self) -> impl Iterator<Item = Qualifier> + '_ {
        self.slots.iter().map(|(q, _)| *q)
    }

    /// Compose the query string for one (already sanitized) keyword.
    pub fn compose(&self, keyword: &str) -> String {
        let mut query = keyword.to_string();
        for (qualifier, value) in &self.slots {
            if value.trim().is_empty() {
                continue;
            }
            query.push(' ');
            query.push_str(qualifier.name());
            query.push(RESERVED_KEYWORD_CHAR);
            query.push_str(value);
        }
        query
    }

    /// Trace every active qualifier and its value.
    pub fn log_debug(&self) {
        for (qualifier, value) in &self.slots {
            debug!("{}: {}", qualifier, value);
        }
    }
}

/// Distinct, sanitized keywords in first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    /// Sanitize and deduplicate `raw` keywords.
    ///
    /// Surrounding whitespace is trimmed, and keywords that are empty once
    /// the reserved character is removed are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::NoKeywords`] if nothing usable remains.
    pub fn new<I, S>(raw: I) -> Result<Self, SearchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut keywords = Vec::new();
        for word in raw {
            let keyword = sanitize_keyword(word.as_ref()).trim().to_string();
            if keyword.is_empty() {
                continue;
            }
            if seen.insert(keyword.clone()) {
                keywords.push(keyword);
            }
        }

        if keywords.is_empty() {
            return Err(SearchError::NoKeywords);
        }
        Ok(Self { keywords })
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    pub fn contains(&self, keyword: &str) -> bool {
        self.keywords.iter().any(|k| k == keyword)
    }
}

/// Remove every [`RESERVED_KEYWORD_CHAR`] from `keyword`.
pub fn sanitize_keyword(keyword: &str) -> String {
    keyword.replace(RESERVED_KEYWORD_CHAR, "")
}
