//! Classification and expansion of individual registry rows.

use std::{fmt::Display, num::IntErrorKind, ops::RangeInclusive, sync::OnceLock};

use regex::Regex;

use crate::RegistryError;

/// The first field of the registry's header row.
const HEADER_TAG: &str = "Tag";
const COMMENT_PREFIX: char = '#';
/// The default flag value which marks a row as part of the default set.
const DEFAULT_FLAG: i64 = 1;

/// A single row of the feature registry table.
///
/// Column 0 holds the tag (or a tag range such as `ss01-ss20`), column 1 a
/// human readable description and column 2 the default flag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistryRow {
    line: u64,
    tag_field: String,
    description: String,
    default_flag: Option<String>,
}

/// The shape of a row's tag field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RowForm<'a> {
    /// A single tag, copied verbatim.
    Literal(&'a str),
    /// A numbered family of tags, `prefix` followed by every two digit number
    /// in `start..=end`.
    Range { prefix: &'a str, start: u8, end: u8 },
}

/// A feature tag produced by compiling the registry.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConcreteTag(String);

/// Iterator over the tags contributed by a single row.
#[derive(Clone, Debug)]
pub struct ExpandedTags<'a>(Expansion<'a>);

#[derive(Clone, Debug)]
enum Expansion<'a> {
    Literal(Option<&'a str>),
    Range {
        prefix: &'a str,
        values: RangeInclusive<u8>,
    },
}

impl RegistryRow {
    pub fn new(
        tag_field: impl Into<String>,
        description: impl Into<String>,
        default_flag: impl Into<String>,
    ) -> Self {
        RegistryRow {
            line: 0,
            tag_field: tag_field.into(),
            description: description.into(),
            default_flag: Some(default_flag.into()),
        }
    }

    /// Build a row from the raw fields of a table record.
    ///
    /// Missing trailing columns are tolerated here; a missing default flag is
    /// only an error once the row is classified.
    pub fn from_fields<'a>(line: u64, fields: impl IntoIterator<Item = &'a str>) -> Self {
        let mut fields = fields.into_iter();
        RegistryRow {
            line,
            tag_field: fields.next().unwrap_or_default().to_owned(),
            description: fields.next().unwrap_or_default().to_owned(),
            default_flag: fields.next().map(str::to_owned),
        }
    }

    /// Set the line this row was read from, used in diagnostics.
    pub fn with_line(mut self, line: u64) -> Self {
        self.line = line;
        self
    }

    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn tag_field(&self) -> &str {
        &self.tag_field
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn default_flag(&self) -> Option<&str> {
        self.default_flag.as_deref()
    }

    /// `true` for the header row and for comment rows, which never contribute tags.
    pub fn is_header_or_comment(&self) -> bool {
        self.tag_field == HEADER_TAG || self.tag_field.starts_with(COMMENT_PREFIX)
    }

    /// Returns `true` if the default flag of this row is exactly `1`.
    ///
    /// The flag must parse as an integer; anything else is an error. Integers
    /// too large for an `i64` are valid flags, they just aren't `1`.
    pub fn is_default(&self) -> Result<bool, RegistryError> {
        let value = self
            .default_flag
            .as_deref()
            .ok_or_else(|| RegistryError::MissingFlag {
                line: self.line,
                tag: self.tag_field.clone(),
            })?;
        match value.trim().parse::<i64>() {
            Ok(flag) => Ok(flag == DEFAULT_FLAG),
            Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
                Ok(false)
            }
            Err(_) => Err(RegistryError::MalformedFlagValue {
                line: self.line,
                tag: self.tag_field.clone(),
                value: value.to_owned(),
            }),
        }
    }

    /// Decide whether this row contributes tags, and if so in which form.
    ///
    /// Returns `None` for header and comment rows, and for rows that are not
    /// part of the default set.
    pub fn classify(&self) -> Result<Option<RowForm<'_>>, RegistryError> {
        if self.is_header_or_comment() {
            log::debug!("line {}: skipping '{}'", self.line, self.tag_field);
            return Ok(None);
        }
        if !self.is_default()? {
            log::debug!("line {}: '{}' is not a default feature", self.line, self.tag_field);
            return Ok(None);
        }
        Ok(Some(RowForm::parse(&self.tag_field)))
    }
}

/// Classify `row` and return the tags it contributes, in order.
///
/// This is empty for header, comment and non-default rows, a single tag for
/// literal rows and every member of the family for range rows.
pub fn classify_and_expand(row: &RegistryRow) -> Result<ExpandedTags<'_>, RegistryError> {
    Ok(row
        .classify()?
        .map(|form| form.tags())
        .unwrap_or_else(ExpandedTags::empty))
}

fn range_pattern() -> &'static Regex {
    static RANGE_PATTERN: OnceLock<Regex> = OnceLock::new();
    RANGE_PATTERN
        .get_or_init(|| Regex::new(r"^([a-z]{2})([0-9]{2})-([a-z]{2})([0-9]{2})$").unwrap())
}

impl<'a> RowForm<'a> {
    /// Determine the form of a tag field.
    ///
    /// A field is a range only if the whole field has the shape `xx00-xx00`
    /// and both halves share the same two letter prefix. Everything else,
    /// including fields that only partially look like a range, is a literal.
    pub fn parse(tag_field: &'a str) -> Self {
        Self::parse_range(tag_field).unwrap_or(RowForm::Literal(tag_field))
    }

    fn parse_range(tag_field: &'a str) -> Option<Self> {
        let captures = range_pattern().captures(tag_field)?;
        let prefix = captures.get(1)?.as_str();
        if prefix != captures.get(3)?.as_str() {
            log::debug!("'{tag_field}' has mismatched prefixes, treating it as a literal");
            return None;
        }
        let start = captures.get(2)?.as_str().parse().ok()?;
        let end = captures.get(4)?.as_str().parse().ok()?;
        Some(RowForm::Range { prefix, start, end })
    }

    /// The tags described by this form, in ascending order for ranges.
    pub fn tags(&self) -> ExpandedTags<'a> {
        match *self {
            RowForm::Literal(tag) => ExpandedTags(Expansion::Literal(Some(tag))),
            RowForm::Range { prefix, start, end } => {
                log::trace!("expanding {prefix}{start:02}-{prefix}{end:02}");
                ExpandedTags(Expansion::Range {
                    prefix,
                    values: start..=end,
                })
            }
        }
    }
}

impl ExpandedTags<'_> {
    pub fn empty() -> Self {
        ExpandedTags(Expansion::Literal(None))
    }
}

impl Iterator for ExpandedTags<'_> {
    type Item = ConcreteTag;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.0 {
            Expansion::Literal(tag) => tag.take().map(|tag| ConcreteTag(tag.to_owned())),
            Expansion::Range { prefix, values } => values
                .next()
                .map(|value| ConcreteTag(format!("{prefix}{value:02}"))),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.0 {
            Expansion::Literal(tag) => {
                let len = tag.is_some() as usize;
                (len, Some(len))
            }
            Expansion::Range { values, .. } => values.size_hint(),
        }
    }
}

impl ConcreteTag {
    pub fn new(tag: impl Into<String>) -> Self {
        ConcreteTag(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl Display for ConcreteTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for ConcreteTag {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand(tag: &str, flag: &str) -> Vec<String> {
        let row = RegistryRow::new(tag, "desc", flag);
        classify_and_expand(&row)
            .unwrap()
            .map(|tag| tag.to_string())
            .collect()
    }

    #[test]
    fn literal_passthrough() {
        assert_eq!(expand("abcd", "1"), vec!["abcd"]);
    }

    #[test]
    fn literal_is_not_validated() {
        assert_eq!(expand("ab", "1"), vec!["ab"]);
        assert_eq!(expand("a b c d e", "1"), vec!["a b c d e"]);
    }

    #[test]
    fn range_expansion() {
        let tags = expand("ss01-ss20", "1");
        let expected = (1..=20).map(|i| format!("ss{i:02}")).collect::<Vec<_>>();
        assert_eq!(tags.len(), 20);
        assert_eq!(tags, expected);
        assert_eq!(tags.first().unwrap(), "ss01");
        assert_eq!(tags.last().unwrap(), "ss20");
    }

    #[test]
    fn range_crossing_decades() {
        assert_eq!(expand("cv08-cv11", "1"), vec!["cv08", "cv09", "cv10", "cv11"]);
    }

    #[test]
    fn single_value_range() {
        assert_eq!(expand("cv99-cv99", "1"), vec!["cv99"]);
    }

    #[test]
    fn reversed_range_is_empty() {
        let row = RegistryRow::new("ss05-ss03", "desc", "1");
        assert_eq!(
            row.classify().unwrap(),
            Some(RowForm::Range {
                prefix: "ss",
                start: 5,
                end: 3
            })
        );
        assert!(expand("ss05-ss03", "1").is_empty());
    }

    #[test]
    fn mismatched_prefixes_are_literal() {
        assert_eq!(RowForm::parse("ss01-cv03"), RowForm::Literal("ss01-cv03"));
        assert_eq!(expand("ss01-cv03", "1"), vec!["ss01-cv03"]);
    }

    #[test]
    fn near_ranges_are_literal() {
        for field in [
            "ss1-ss20",
            "SS01-SS20",
            "ss01-ss2",
            "ss01_ss20",
            "xss01-ss20",
            "ss01-ss20x",
            "ss01 - ss20",
        ] {
            assert_eq!(RowForm::parse(field), RowForm::Literal(field), "{field}");
            assert_eq!(expand(field, "1"), vec![field]);
        }
    }

    #[test]
    fn default_flag_filter() {
        assert!(expand("abcd", "0").is_empty());
        assert!(expand("abcd", "2").is_empty());
        assert!(expand("abcd", "-1").is_empty());
        assert!(expand("ss01-ss20", "0").is_empty());
        assert_eq!(expand("abcd", " 1 "), vec!["abcd"]);
    }

    #[test]
    fn oversized_flags_are_not_default() {
        assert!(expand("abcd", "99999999999999999999").is_empty());
        assert!(expand("abcd", "-99999999999999999999").is_empty());
        assert!(expand("ss01-ss20", " +123456789012345678901234567890 ").is_empty());
        let row = RegistryRow::new("abcd", "desc", "99999999999999999999");
        assert!(!row.is_default().unwrap());
    }

    #[test]
    fn header_and_comments_are_skipped() {
        // the flag column is never inspected for these rows
        assert!(expand("Tag", "Default").is_empty());
        assert!(expand("# comment", "1").is_empty());
        assert!(expand("#abcd", "x").is_empty());

        let comment = RegistryRow::from_fields(3, ["# just a comment"]);
        assert!(classify_and_expand(&comment).unwrap().next().is_none());
    }

    #[test]
    fn malformed_flag_is_an_error() {
        let row = RegistryRow::new("abcd", "desc", "x").with_line(7);
        let err = classify_and_expand(&row).unwrap_err();
        assert!(
            matches!(
                &err,
                RegistryError::MalformedFlagValue { line: 7, tag, value }
                    if tag == "abcd" && value == "x"
            ),
            "{err:?}"
        );
        assert_eq!(err.line(), Some(7));
    }

    #[test]
    fn missing_flag_is_an_error() {
        let row = RegistryRow::from_fields(4, ["abcd", "desc"]);
        assert_eq!(row.default_flag(), None);
        let err = classify_and_expand(&row).unwrap_err();
        assert!(matches!(err, RegistryError::MissingFlag { line: 4, .. }));
    }

    #[test]
    fn size_hint_is_exact() {
        let row = RegistryRow::new("cv01-cv99", "desc", "1");
        assert_eq!(classify_and_expand(&row).unwrap().size_hint(), (99, Some(99)));
        let row = RegistryRow::new("abcd", "desc", "1");
        let mut tags = classify_and_expand(&row).unwrap();
        assert_eq!(tags.size_hint(), (1, Some(1)));
        tags.next();
        assert_eq!(tags.size_hint(), (0, Some(0)));
    }
}
