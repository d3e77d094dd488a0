use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Default acronym set preserved verbatim during show name processing.
///
/// A raw token that matches one of these (case-insensitively) is upper-cased
/// and returned as-is instead of being word-split.
pub const DEFAULT_ACRONYMS: &[&str] = &[
    "AIG", "FOF", "BBN", "AIO", "FOTF", "DJ", "FM", "AM", "USA",
];

/// Default standardization table: canonical show name -> known spellings.
///
/// Applied after CamelCase splitting so near-matches (case, underscores,
/// shorthand) fold onto one display name before any alias lookup.
pub const DEFAULT_STANDARDIZATIONS: &[(&str, &[&str])] = &[
    (
        "Answers In Genesis",
        &["AIG", "AnswersInGenesis", "Answers_In_Genesis"],
    ),
    (
        "Focus On The Family",
        &["FOF", "FOTF", "FocusOnTheFamily", "Focus_On_The_Family"],
    ),
    (
        "Adventures In Odyssey",
        &["AIO", "Odyssey", "AdventuresInOdyssey"],
    ),
    (
        "Bible Broadcasting Network",
        &["BBN", "BibleBroadcastingNetwork"],
    ),
];

/// Two-digit years at or below this value land in the 2000s, the rest in
/// the 1900s.
pub const DEFAULT_YEAR_CUTOFF: u32 = 30;

/// Longest filename the parser will accept.
pub const DEFAULT_MAX_INPUT_LEN: usize = 512;

/// Result of parsing a filename into broadcast metadata.
///
/// `success` implies `date` and `year` are populated and `error` is empty.
/// `show_name` can survive a date failure, so callers get partial data for
/// manual correction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseResult {
    /// Extracted show name in display form (may still be an alias)
    pub show_name: Option<String>,

    /// Broadcast date, if the date token was a real calendar date
    pub date: Option<NaiveDate>,

    /// Interpreted 4-digit year
    pub year: Option<i32>,

    /// Whether the filename parsed completely
    pub success: bool,

    /// Failure description when `success` is false
    pub error: Option<String>,
}

impl ParseResult {
    fn empty() -> Self {
        Self {
            show_name: None,
            date: None,
            year: None,
            success: false,
            error: None,
        }
    }
}

/// Why a filename failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Filename doesn't match expected pattern (ShowName_MMDDYY)")]
    NoPatternMatch,

    #[error("Date must be 6 digits (MMDDYY)")]
    InvalidDateToken,

    #[error("Invalid date: {month}/{day}/{year}")]
    InvalidCalendarDate { month: u32, day: u32, year: i32 },

    #[error("Filename exceeds maximum length of {limit} characters")]
    InputTooLong { limit: usize },
}

/// Why a filename template failed validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("Pattern must contain underscore separator")]
    MissingSeparator,

    #[error("Pattern must have exactly one underscore")]
    ExtraSeparators,

    #[error("Show name must contain only letters")]
    InvalidShowPart,

    #[error("Date must be exactly 6 digits (MMDDYY)")]
    InvalidDatePart,
}

/// How a free-text date fragment maps onto year/month/day.
#[derive(Debug, Clone, Copy)]
enum TextDateLayout {
    MonthDayYear4,
    MonthDayYear2,
    YearMonthDay,
    CompactYmd,
    CompactMdy,
}

/// Parses upload filenames of the form `ShowName_MMDDYY.ext` into show and
/// broadcast-date metadata.
///
/// The structural patterns are compiled once at construction. The acronym
/// set, standardization table, and year cutoff are plain injected state so a
/// caller can swap them for catalog-driven tables later.
pub struct FilenameParser {
    patterns: Vec<Regex>,
    text_date_patterns: Vec<(Regex, TextDateLayout)>,
    acronyms: Vec<String>,
    standardizations: Vec<(String, Vec<String>)>,
    year_cutoff: u32,
    max_input_len: usize,
}

impl FilenameParser {
    /// Create a parser with the built-in tables and default cutoff.
    pub fn new() -> Self {
        // Tried in order; first match wins. The name capture is greedy, so
        // the last `_` before the 6 digits is the separator.
        let patterns = vec![
            // Standard pattern: ShowName_MMDDYY
            Regex::new(r"^([A-Za-z]+(?:[A-Z][a-z]+)*)_(\d{6})$"),
            // With spaces or underscores in the show name
            Regex::new(r"^([A-Za-z_\s]+)_(\d{6})$"),
            // With hyphens
            Regex::new(r"^([A-Za-z\-]+)_(\d{6})$"),
            // Date with different separator
            Regex::new(r"^([A-Za-z]+(?:[A-Z][a-z]+)*)-(\d{6})$"),
        ]
        .into_iter()
        .collect::<Result<Vec<_>, _>>()
        .expect("built-in filename patterns are valid");

        let text_date_patterns = vec![
            (r"(\d{1,2})[/-](\d{1,2})[/-](\d{4})", TextDateLayout::MonthDayYear4),
            (r"(\d{1,2})[/-](\d{1,2})[/-](\d{2})", TextDateLayout::MonthDayYear2),
            (r"(\d{4})[/-](\d{1,2})[/-](\d{1,2})", TextDateLayout::YearMonthDay),
            (r"(\d{8})", TextDateLayout::CompactYmd),
            (r"(\d{6})", TextDateLayout::CompactMdy),
        ]
        .into_iter()
        .filter_map(|(p, layout)| Regex::new(p).ok().map(|re| (re, layout)))
        .collect();

        Self {
            patterns,
            text_date_patterns,
            acronyms: DEFAULT_ACRONYMS.iter().map(|a| a.to_string()).collect(),
            standardizations: DEFAULT_STANDARDIZATIONS
                .iter()
                .map(|(canonical, variants)| {
                    (
                        canonical.to_string(),
                        variants.iter().map(|v| v.to_string()).collect(),
                    )
                })
                .collect(),
            year_cutoff: DEFAULT_YEAR_CUTOFF,
            max_input_len: DEFAULT_MAX_INPUT_LEN,
        }
    }

    /// Override the two-digit year cutoff.
    pub fn with_year_cutoff(mut self, cutoff: u32) -> Self {
        self.year_cutoff = cutoff;
        self
    }

    /// Override the maximum accepted filename length.
    pub fn with_max_input_len(mut self, limit: usize) -> Self {
        self.max_input_len = limit;
        self
    }

    /// Replace the acronym set and standardization table.
    pub fn with_name_tables(
        mut self,
        acronyms: Vec<String>,
        standardizations: Vec<(String, Vec<String>)>,
    ) -> Self {
        self.acronyms = acronyms;
        self.standardizations = standardizations;
        self
    }

    /// Parse a filename and extract show name and broadcast date.
    ///
    /// Never panics and never returns an error through the call boundary;
    /// every failure comes back as a `ParseResult` with `success == false`
    /// and a populated `error`.
    pub fn parse(&self, filename: &str) -> ParseResult {
        let mut result = ParseResult::empty();

        if filename.len() > self.max_input_len {
            result.error = Some(
                ParseError::InputTooLong {
                    limit: self.max_input_len,
                }
                .to_string(),
            );
            return result;
        }

        // Remove the trailing extension; no dot means the whole name is used
        let base_name = filename
            .rsplit_once('.')
            .map(|(base, _ext)| base)
            .unwrap_or(filename);

        let Some((raw_name, date_token)) = self.match_structure(base_name) else {
            result.error = Some(ParseError::NoPatternMatch.to_string());
            return result;
        };

        result.show_name = Some(self.process_show_name(raw_name));

        if date_token.len() != 6 || !date_token.bytes().all(|b| b.is_ascii_digit()) {
            result.error = Some(ParseError::InvalidDateToken.to_string());
            return result;
        }

        let (Ok(month), Ok(day), Ok(year_short)) = (
            date_token[0..2].parse::<u32>(),
            date_token[2..4].parse::<u32>(),
            date_token[4..6].parse::<u32>(),
        ) else {
            result.error = Some(ParseError::InvalidDateToken.to_string());
            return result;
        };

        let year = self.resolve_year(year_short);
        result.year = Some(year);

        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => {
                result.date = Some(date);
                result.success = true;
            }
            None => {
                result.error =
                    Some(ParseError::InvalidCalendarDate { month, day, year }.to_string());
            }
        }

        result
    }

    /// Interpret a two-digit year: at or below the cutoff lands in the
    /// 2000s, above it in the 1900s.
    pub fn resolve_year(&self, year_short: u32) -> i32 {
        if year_short <= self.year_cutoff {
            2000 + year_short as i32
        } else {
            1900 + year_short as i32
        }
    }

    /// Run the ordered structural patterns, returning the raw name and date
    /// tokens of the first match.
    fn match_structure<'a>(&self, base_name: &'a str) -> Option<(&'a str, &'a str)> {
        for pattern in &self.patterns {
            if let Some(caps) = pattern.captures(base_name) {
                if let (Some(name), Some(date)) = (caps.get(1), caps.get(2)) {
                    return Some((name.as_str(), date.as_str()));
                }
            }
        }
        None
    }

    /// Normalize a raw show name token into display form.
    ///
    /// Underscores become spaces, CamelCase words get split, repeated
    /// whitespace collapses, and known spelling variants fold onto their
    /// canonical name. Known acronyms pass through upper-cased without
    /// splitting. Applying this twice gives the same answer as once.
    pub fn process_show_name(&self, raw_name: &str) -> String {
        let name = raw_name.replace('_', " ");

        if self.acronyms.iter().any(|a| a.eq_ignore_ascii_case(&name)) {
            return name.to_uppercase();
        }

        // Insert a space before an upper-case letter that follows a
        // lower-case one
        let mut processed = String::with_capacity(name.len() + 8);
        let mut prev: Option<char> = None;
        for ch in name.chars() {
            if let Some(p) = prev {
                if ch.is_uppercase() && p.is_lowercase() {
                    processed.push(' ');
                }
            }
            processed.push(ch);
            prev = Some(ch);
        }

        let processed = processed.split_whitespace().collect::<Vec<_>>().join(" ");

        self.standardize(&processed)
    }

    /// Fold a processed name onto its canonical spelling if it matches any
    /// known variant, exactly or case-insensitively.
    fn standardize(&self, processed: &str) -> String {
        for (canonical, variants) in &self.standardizations {
            if variants
                .iter()
                .any(|v| v == processed || v.eq_ignore_ascii_case(processed))
            {
                return canonical.clone();
            }
        }
        processed.to_string()
    }

    /// Scan free text for a date in any of several common layouts.
    ///
    /// Layouts are tried in order and the first fragment that forms a real
    /// calendar date wins. Two-digit years go through the same cutoff rule
    /// as filename parsing.
    pub fn extract_date_from_text(&self, text: &str) -> Option<NaiveDate> {
        for (pattern, layout) in &self.text_date_patterns {
            if let Some(caps) = pattern.captures(text) {
                if let Some(date) = self.resolve_text_date(&caps, *layout) {
                    return Some(date);
                }
            }
        }
        None
    }

    fn resolve_text_date(&self, caps: &regex::Captures<'_>, layout: TextDateLayout) -> Option<NaiveDate> {
        let field = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());

        let (year, month, day) = match layout {
            TextDateLayout::MonthDayYear4 => (field(3)? as i32, field(1)?, field(2)?),
            TextDateLayout::MonthDayYear2 => (self.resolve_year(field(3)?), field(1)?, field(2)?),
            TextDateLayout::YearMonthDay => (field(1)? as i32, field(2)?, field(3)?),
            TextDateLayout::CompactYmd => {
                let digits = caps.get(1)?.as_str();
                (
                    digits[0..4].parse::<i32>().ok()?,
                    digits[4..6].parse().ok()?,
                    digits[6..8].parse().ok()?,
                )
            }
            TextDateLayout::CompactMdy => {
                let digits = caps.get(1)?.as_str();
                (
                    self.resolve_year(digits[4..6].parse().ok()?),
                    digits[0..2].parse().ok()?,
                    digits[2..4].parse().ok()?,
                )
            }
        };

        NaiveDate::from_ymd_opt(year, month, day)
    }
}

impl Default for FilenameParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate the canonical filename for a show and broadcast date.
///
/// Spaces are stripped from the show name to form the token, so this is not
/// a strict inverse of the CamelCase splitting: re-parsing only re-derives
/// the same spacing when each word starts with a capital and has no embedded
/// capitals.
pub fn suggest_filename(show_name: &str, broadcast_date: NaiveDate, format: &str) -> String {
    let safe_name = show_name.replace(' ', "");
    format!("{}_{}.{}", safe_name, broadcast_date.format("%m%d%y"), format)
}

/// Validate a user-configured filename template.
///
/// Templates look like `ShowName_MMDDYY` or `ShowName_MMDDYY.wav`: exactly
/// one underscore, a letters-only name part, and a 6-digit date part before
/// any extension. This checks template shape only and is independent of the
/// parse pipeline.
pub fn validate_pattern(pattern: &str) -> Result<(), PatternError> {
    if !pattern.contains('_') {
        return Err(PatternError::MissingSeparator);
    }

    let parts: Vec<&str> = pattern.split('_').collect();
    if parts.len() != 2 {
        return Err(PatternError::ExtraSeparators);
    }

    let (show_part, date_part) = (parts[0], parts[1]);

    if show_part.is_empty() || !show_part.bytes().all(|b| b.is_ascii_alphabetic()) {
        return Err(PatternError::InvalidShowPart);
    }

    let date_only = date_part.split('.').next().unwrap_or(date_part);
    if date_only.len() != 6 || !date_only.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PatternError::InvalidDatePart);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> FilenameParser {
        FilenameParser::new()
    }

    #[test]
    fn test_parse_camelcase_with_standardization() {
        let result = parser().parse("AnswersInGenesis_100424.wav");
        assert!(result.success);
        assert_eq!(result.show_name.as_deref(), Some("Answers In Genesis"));
        assert_eq!(result.date, NaiveDate::from_ymd_opt(2024, 10, 4));
        assert_eq!(result.year, Some(2024));
        assert!(result.error.is_none());
    }

    #[test]
    fn test_parse_acronym_nineties_year() {
        let result = parser().parse("FOF_123199.mp3");
        assert!(result.success);
        assert_eq!(result.show_name.as_deref(), Some("FOF"));
        assert_eq!(result.date, NaiveDate::from_ymd_opt(1999, 12, 31));
        assert_eq!(result.year, Some(1999));
    }

    #[test]
    fn test_parse_acronym_two_thousands_year() {
        let result = parser().parse("AIG_010125.wav");
        assert!(result.success);
        assert_eq!(result.show_name.as_deref(), Some("AIG"));
        assert_eq!(result.date, NaiveDate::from_ymd_opt(2025, 1, 1));
        assert_eq!(result.year, Some(2025));
    }

    #[test]
    fn test_parse_acronyms_pass_through_uppercased() {
        let p = parser();
        for acronym in DEFAULT_ACRONYMS {
            let filename = format!("{}_010224.wav", acronym.to_lowercase());
            let result = p.parse(&filename);
            assert_eq!(
                result.show_name.as_deref(),
                Some(acronym.to_uppercase().as_str()),
                "acronym {} should pass through",
                acronym
            );
        }
    }

    #[test]
    fn test_parse_no_date_suffix() {
        let result = parser().parse("BadName.wav");
        assert!(!result.success);
        assert!(result.show_name.is_none());
        assert!(result.date.is_none());
        assert!(result
            .error
            .as_deref()
            .unwrap()
            .contains("doesn't match expected pattern"));
    }

    #[test]
    fn test_parse_invalid_calendar_date_keeps_partial_fields() {
        // Month 13 is not a date, but the name and year still come back
        let result = parser().parse("Show_133099.wav");
        assert!(!result.success);
        assert_eq!(result.show_name.as_deref(), Some("Show"));
        assert_eq!(result.year, Some(1999));
        assert!(result.date.is_none());
        assert!(result.error.as_deref().unwrap().contains("Invalid date"));
    }

    #[test]
    fn test_parse_february_30_rejected() {
        let result = parser().parse("Show_023024.wav");
        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Invalid date: 2/30/2024"));
        assert_eq!(result.year, Some(2024));
    }

    #[test]
    fn test_parse_underscored_name_uses_last_separator() {
        let result = parser().parse("My_Show_101524.wav");
        assert!(result.success);
        assert_eq!(result.show_name.as_deref(), Some("My Show"));
        assert_eq!(result.date, NaiveDate::from_ymd_opt(2024, 10, 15));
    }

    #[test]
    fn test_parse_hyphenated_name() {
        let result = parser().parse("In-Touch_052923.wav");
        assert!(result.success);
        assert_eq!(result.show_name.as_deref(), Some("In-Touch"));
    }

    #[test]
    fn test_parse_hyphen_date_separator() {
        let result = parser().parse("TruthForLife-091224.mp3");
        assert!(result.success);
        assert_eq!(result.show_name.as_deref(), Some("Truth For Life"));
        assert_eq!(result.date, NaiveDate::from_ymd_opt(2024, 9, 12));
    }

    #[test]
    fn test_parse_no_extension() {
        let result = parser().parse("Odyssey_060315");
        assert!(result.success);
        assert_eq!(result.show_name.as_deref(), Some("Adventures In Odyssey"));
        assert_eq!(result.date, NaiveDate::from_ymd_opt(2015, 6, 3));
    }

    #[test]
    fn test_parse_multiple_dots_strips_last_extension_only() {
        // Only the trailing ".wav" is removed, so the base still has a dot
        // and no structural pattern matches
        let result = parser().parse("Show.backup_101524.wav");
        assert!(!result.success);
        assert!(result
            .error
            .as_deref()
            .unwrap()
            .contains("doesn't match expected pattern"));
    }

    #[test]
    fn test_parse_rejects_oversized_input() {
        let long_name = format!("{}_010124.wav", "A".repeat(600));
        let result = parser().parse(&long_name);
        assert!(!result.success);
        assert!(result.error.as_deref().unwrap().contains("maximum length"));
        assert!(result.show_name.is_none());
    }

    #[test]
    fn test_year_cutoff_boundaries() {
        let p = parser();
        assert_eq!(p.resolve_year(0), 2000);
        assert_eq!(p.resolve_year(30), 2030);
        assert_eq!(p.resolve_year(31), 1931);
        assert_eq!(p.resolve_year(99), 1999);
    }

    #[test]
    fn test_custom_year_cutoff() {
        let p = FilenameParser::new().with_year_cutoff(50);
        assert_eq!(p.resolve_year(50), 2050);
        assert_eq!(p.resolve_year(51), 1951);
    }

    #[test]
    fn test_process_show_name_splits_camelcase() {
        let p = parser();
        assert_eq!(p.process_show_name("TruthForLife"), "Truth For Life");
        assert_eq!(p.process_show_name("My_Show"), "My Show");
    }

    #[test]
    fn test_process_show_name_standardizes_variants() {
        let p = parser();
        assert_eq!(p.process_show_name("Odyssey"), "Adventures In Odyssey");
        assert_eq!(p.process_show_name("odyssey"), "Adventures In Odyssey");
    }

    #[test]
    fn test_process_show_name_idempotent() {
        let p = parser();
        for raw in ["AnswersInGenesis", "FOF", "My_Show", "Odyssey", "In-Touch"] {
            let once = p.process_show_name(raw);
            let twice = p.process_show_name(&once);
            assert_eq!(once, twice, "processing {} twice changed the result", raw);
        }
    }

    #[test]
    fn test_injected_name_tables_replace_defaults() {
        let p = FilenameParser::new().with_name_tables(
            vec!["WXYZ".to_string()],
            vec![(
                "Morning Drive".to_string(),
                vec!["Morning Show".to_string()],
            )],
        );
        assert_eq!(p.process_show_name("wxyz"), "WXYZ");
        assert_eq!(p.process_show_name("MorningShow"), "Morning Drive");
        // The default acronym set no longer applies
        assert_eq!(p.process_show_name("fof"), "fof");
    }

    #[test]
    fn test_suggest_filename_strips_spaces() {
        let date = NaiveDate::from_ymd_opt(2024, 10, 4).unwrap();
        assert_eq!(
            suggest_filename("Answers In Genesis", date, "wav"),
            "AnswersInGenesis_100424.wav"
        );
        assert_eq!(suggest_filename("FOF", date, "mp3"), "FOF_100424.mp3");
    }

    #[test]
    fn test_suggest_filename_round_trips_simple_names() {
        let p = parser();
        let date = NaiveDate::from_ymd_opt(2023, 5, 29).unwrap();
        let suggested = suggest_filename("Truth For Life", date, "wav");
        let reparsed = p.parse(&suggested);
        assert!(reparsed.success);
        assert_eq!(reparsed.show_name.as_deref(), Some("Truth For Life"));
        assert_eq!(reparsed.date, Some(date));
    }

    #[test]
    fn test_validate_pattern_accepts_template_shapes() {
        assert!(validate_pattern("ShowName_123456").is_ok());
        assert!(validate_pattern("ShowName_123456.wav").is_ok());
    }

    #[test]
    fn test_validate_pattern_rejections() {
        assert_eq!(
            validate_pattern("ShowName123456"),
            Err(PatternError::MissingSeparator)
        );
        assert_eq!(
            validate_pattern("Show_Name_123456"),
            Err(PatternError::ExtraSeparators)
        );
        assert_eq!(
            validate_pattern("Show1_123456"),
            Err(PatternError::InvalidShowPart)
        );
        assert_eq!(
            validate_pattern("_123456"),
            Err(PatternError::InvalidShowPart)
        );
        assert_eq!(
            validate_pattern("ShowName_12345"),
            Err(PatternError::InvalidDatePart)
        );
        assert_eq!(
            validate_pattern("ShowName_1234567"),
            Err(PatternError::InvalidDatePart)
        );
    }

    #[test]
    fn test_extract_date_from_text_layouts() {
        let p = parser();
        assert_eq!(
            p.extract_date_from_text("aired 10/04/2024 morning"),
            NaiveDate::from_ymd_opt(2024, 10, 4)
        );
        assert_eq!(
            p.extract_date_from_text("backup 2024-10-04"),
            NaiveDate::from_ymd_opt(2024, 10, 4)
        );
        assert_eq!(
            p.extract_date_from_text("dub 20241004 final"),
            NaiveDate::from_ymd_opt(2024, 10, 4)
        );
        assert_eq!(
            p.extract_date_from_text("raw 100424"),
            NaiveDate::from_ymd_opt(2024, 10, 4)
        );
        assert_eq!(p.extract_date_from_text("no date here"), None);
    }

    #[test]
    fn test_parse_result_serializes_verbatim() {
        let result = parser().parse("AIG_010125.wav");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["show_name"], "AIG");
        assert_eq!(json["date"], "2025-01-01");
        assert_eq!(json["year"], 2025);
        assert_eq!(json["success"], true);
        assert!(json["error"].is_null());
    }
}
