//! Content-line grammar (RFC 2425 §5.8.1, vCard 2.1 §2.1).
//!
//! Patterns are assembled from fragments at compile time so the content
//! line, the quoted-printable probe and the literal matchers share one
//! definition of `name` and `param-value`.

use std::sync::LazyLock;

use regex_lite::Regex;

use crate::rfc2425::core::Parameters;

/// `name = 1*(ALPHA / DIGIT / "-")`, plus `_` which some producers emit.
pub const NAME: &str = "[-A-Za-z0-9_]+";

/// `param-value = ptext / quoted-string`
pub const PARAM_VALUE: &str = r#"(?:"[^"]*"|[^";:,]+)"#;

/// `";" name ["=" param-value *("," param-value)]`
///
/// The value part is optional because 2.1 allows bare `;HOME` or
/// `;QUOTED-PRINTABLE`.
pub const PARAM: &str = const_str::concat!(
    ";", NAME, "(?:=", PARAM_VALUE, "(?:,", PARAM_VALUE, ")*)?"
);

/// Optional dotted group prefix followed by the attribute name.
pub const LINE_START: &str = const_str::concat!(r"\A((?:", NAME, r"\.)+)?(", NAME, ")");

/// `[group "."] name *(";" param) ":" value`
pub const CONTENT_LINE: &str = const_str::concat!(LINE_START, "((?:", PARAM, ")+)?:(.*)\\z");

/// Matches the head of a line whose value is quoted-printable encoded.
pub const QUOTED_PRINTABLE_LINE: &str = const_str::concat!(
    "(?i)", LINE_START, "(?:", PARAM, ")*;(?:ENCODING=)?QUOTED-PRINTABLE[;:]"
);

/// `date-fullyear ["-"] date-month ["-"] date-mday`
pub const DATE: &str = r"(\d\d\d\d)-?(\d\d)-?(\d\d)";

/// `time-hour [":"] time-minute [":"] time-second [time-secfrac] [time-zone]`
pub const TIME: &str = r"(\d\d):?(\d\d):?(\d\d)(?:[.,](\d+))?(Z|[-+]\d\d:?\d\d)?";

/// `date "T" time`
pub const DATE_TIME: &str = const_str::concat!(DATE, "T", TIME);

/// `["+" / "-"] 1*DIGIT`
pub const INTEGER: &str = r"\A[-+]?\d+\z";

/// Parameter values that a bare 2.1 parameter maps to `ENCODING`.
const BARE_ENCODINGS: [&str; 5] = ["QUOTED-PRINTABLE", "BASE64", "B", "8BIT", "7BIT"];

macro_rules! static_regex {
    ($name:ident, $pattern:expr) => {
        #[expect(
            clippy::expect_used,
            reason = "Pattern is a compile-time constant exercised by unit tests"
        )]
        pub(crate) static $name: LazyLock<Regex> =
            LazyLock::new(|| Regex::new($pattern).expect("valid grammar pattern"));
    };
}

static_regex!(CONTENT_LINE_RE, CONTENT_LINE);
static_regex!(QUOTED_PRINTABLE_LINE_RE, QUOTED_PRINTABLE_LINE);
static_regex!(PARAM_RE, const_str::concat!(";(", NAME, ")(?:=(", PARAM_VALUE, "(?:,", PARAM_VALUE, ")*))?"));
static_regex!(PARAM_VALUE_RE, r#""([^"]*)"|([^";:,]+)"#);
static_regex!(DATE_RE, const_str::concat!(r"\A", DATE, r"\z"));
static_regex!(TIME_RE, const_str::concat!(r"\A", TIME, r"\z"));
static_regex!(DATE_TIME_RE, const_str::concat!(r"\A", DATE_TIME, r"\z"));
static_regex!(INTEGER_RE, INTEGER);

/// A content line split into its grammar parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// Group prefix without the trailing dot.
    pub group: Option<String>,
    /// Attribute name (uppercased).
    pub name: String,
    pub params: Parameters,
    /// Everything after the first unquoted `:`.
    pub value: String,
}

/// Splits a logical line into group, name, parameters and value.
///
/// Returns `None` if the line does not match the content-line grammar.
#[must_use]
pub fn parse_content_line(line: &str) -> Option<ContentLine> {
    let caps = CONTENT_LINE_RE.captures(line)?;

    let group = caps
        .get(1)
        .map(|m| m.as_str().trim_end_matches('.').to_string());
    let name = caps.get(2)?.as_str().to_ascii_uppercase();
    let params = caps
        .get(3)
        .map(|m| parse_params(m.as_str()))
        .unwrap_or_default();
    let value = caps.get(4).map_or("", |m| m.as_str()).to_string();

    Some(ContentLine {
        group,
        name,
        params,
        value,
    })
}

/// Returns whether the line head declares a quoted-printable value.
#[must_use]
pub fn is_quoted_printable(line: &str) -> bool {
    QUOTED_PRINTABLE_LINE_RE.is_match(line)
}

/// Parses a `;NAME=value,value;NAME` parameter list.
///
/// An explicit parameter replaces an earlier one of the same name. A bare
/// name becomes an `ENCODING` value when it names a transfer encoding and
/// a `TYPE` value otherwise.
fn parse_params(s: &str) -> Parameters {
    let mut params = Parameters::new();

    for caps in PARAM_RE.captures_iter(s) {
        let Some(name) = caps.get(1).map(|m| m.as_str()) else {
            continue;
        };

        match caps.get(2) {
            Some(values) => params.set(name, parse_param_values(values.as_str())),
            None => {
                let upper = name.to_ascii_uppercase();
                if BARE_ENCODINGS.contains(&upper.as_str()) {
                    params.set("ENCODING", vec![upper]);
                } else {
                    params.append("TYPE", name);
                }
            }
        }
    }

    params
}

fn parse_param_values(s: &str) -> Vec<String> {
    PARAM_VALUE_RE
        .captures_iter(s)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)))
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_line_with_params() {
        let line =
            parse_content_line("ATTENDEE;ROLE=REQ-PARTICIPANT;RSVP=TRUE;CN=Name:MAILTO:x@example.com")
                .unwrap();

        assert_eq!(line.group, None);
        assert_eq!(line.name, "ATTENDEE");
        assert_eq!(line.params.len(), 3);
        assert_eq!(line.params.value("ROLE"), Some("REQ-PARTICIPANT"));
        assert_eq!(line.params.value("RSVP"), Some("TRUE"));
        assert_eq!(line.params.value("CN"), Some("Name"));
        assert_eq!(line.value, "MAILTO:x@example.com");
    }

    #[test]
    fn content_line_with_group() {
        let line = parse_content_line("item1.tel;type=HOME,work:+1 555").unwrap();
        assert_eq!(line.group.as_deref(), Some("item1"));
        assert_eq!(line.name, "TEL");
        assert_eq!(
            line.params.get("TYPE"),
            Some(["HOME".to_string(), "work".to_string()].as_slice())
        );
        assert_eq!(line.value, "+1 555");

        let line = parse_content_line("a.b.NOTE:x").unwrap();
        assert_eq!(line.group.as_deref(), Some("a.b"));
    }

    #[test]
    fn quoted_param_values_keep_separators() {
        let line = parse_content_line(r#"ORGANIZER;CN="Doe, John: Sales":MAILTO:j@example.com"#)
            .unwrap();
        assert_eq!(line.params.value("CN"), Some("Doe, John: Sales"));
        assert_eq!(line.value, "MAILTO:j@example.com");
    }

    #[test]
    fn bare_params_map_to_encoding_and_type() {
        let line = parse_content_line("TEL;HOME;VOICE;QUOTED-PRINTABLE:555").unwrap();
        assert_eq!(line.params.value("ENCODING"), Some("QUOTED-PRINTABLE"));
        assert_eq!(
            line.params.get("TYPE"),
            Some(["HOME".to_string(), "VOICE".to_string()].as_slice())
        );
    }

    #[test]
    fn duplicate_explicit_param_overwrites() {
        let line = parse_content_line("X-FOO;CN=First;CN=Second:v").unwrap();
        assert_eq!(line.params.get("CN"), Some(["Second".to_string()].as_slice()));
    }

    #[test]
    fn rejects_non_content_lines() {
        assert!(parse_content_line("no colon here").is_none());
        assert!(parse_content_line(":value").is_none());
        assert!(parse_content_line("BAD NAME:value").is_none());
    }

    #[test]
    fn empty_value_is_allowed() {
        let line = parse_content_line("NOTE:").unwrap();
        assert_eq!(line.value, "");
    }

    #[test]
    fn detects_quoted_printable() {
        assert!(is_quoted_printable("NOTE;ENCODING=QUOTED-PRINTABLE:abc="));
        assert!(is_quoted_printable("note;charset=utf-8;quoted-printable:abc"));
        assert!(!is_quoted_printable("NOTE:QUOTED-PRINTABLE;"));
        assert!(!is_quoted_printable("PHOTO;ENCODING=BASE64:abc"));
    }

    #[test]
    fn literals() {
        assert!(DATE_RE.is_match("20170711"));
        assert!(DATE_RE.is_match("2017-07-11"));
        assert!(TIME_RE.is_match("15:00:00.25-05:00"));
        assert!(DATE_TIME_RE.is_match("20170711T150000Z"));
        assert!(INTEGER_RE.is_match("-42"));
        assert!(!INTEGER_RE.is_match("4.2"));
    }
}
