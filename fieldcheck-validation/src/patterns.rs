//! Pattern rules.
//!
//! [`Regexp`] matches from the start of the input only; whether the end is
//! anchored is up to the pattern. The format rules (email, MAC address,
//! URL, UUID) are `Regexp` instances with a fixed pattern and their own
//! default message. They end in `\n?\z`, so one trailing newline is
//! tolerated.

use crate::traits::Rule;
use crate::validators::reject;
use crate::ValidationError;
use fieldcheck_config::{DEFAULT_REGEX_SIZE_LIMIT, ValidationSettings};
use once_cell::sync::Lazy;
use regex::{Captures, Regex, RegexBuilder};
use serde_json::Value;

const EMAIL_PATTERN: &str = r"^.+@([^.@][^@]+)\n?\z";
const MAC_ADDRESS_PATTERN: &str = r"^(?:[0-9a-fA-F]{2}:){5}[0-9a-fA-F]{2}\n?\z";
const URL_PATTERN: &str = r"^[a-z]+://(?P<host>[^/:]+)(?P<port>:[0-9]+)?(?P<path>\/.*)?\n?\z";
const UUID_PATTERN: &str = r"^[0-9a-fA-F]{8}-([0-9a-fA-F]{4}-){3}[0-9a-fA-F]{12}\n?\z";

fn builtin(pattern: &str) -> Regex {
    compile_anchored(pattern, RegexFlags::IGNORE_CASE, DEFAULT_REGEX_SIZE_LIMIT)
        .expect("built-in pattern compiles")
}

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| builtin(EMAIL_PATTERN));
static MAC_ADDRESS_REGEX: Lazy<Regex> = Lazy::new(|| builtin(MAC_ADDRESS_PATTERN));
static URL_REGEX: Lazy<Regex> = Lazy::new(|| builtin(URL_PATTERN));
static UUID_REGEX: Lazy<Regex> = Lazy::new(|| builtin(UUID_PATTERN));

/// Compilation flags for [`Regexp`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegexFlags {
    pub ignore_case: bool,
    pub multi_line: bool,
    pub dot_matches_new_line: bool,
    pub ignore_whitespace: bool,
}

impl RegexFlags {
    pub const NONE: Self = Self {
        ignore_case: false,
        multi_line: false,
        dot_matches_new_line: false,
        ignore_whitespace: false,
    };

    pub const IGNORE_CASE: Self = Self {
        ignore_case: true,
        ..Self::NONE
    };

    pub fn ignore_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    pub fn multi_line(mut self) -> Self {
        self.multi_line = true;
        self
    }

    pub fn dot_matches_new_line(mut self) -> Self {
        self.dot_matches_new_line = true;
        self
    }

    pub fn ignore_whitespace(mut self) -> Self {
        self.ignore_whitespace = true;
        self
    }
}

// `\A` rather than `^` so multi-line mode cannot move the anchor.
fn compile_anchored(pattern: &str, flags: RegexFlags, size_limit: usize) -> Result<Regex, regex::Error> {
    RegexBuilder::new(&format!(r"\A(?:{})", pattern))
        .case_insensitive(flags.ignore_case)
        .multi_line(flags.multi_line)
        .dot_matches_new_line(flags.dot_matches_new_line)
        .ignore_whitespace(flags.ignore_whitespace)
        .size_limit(size_limit)
        .build()
}

/// Validates that a string matches a pattern from its first character.
#[derive(Debug, Clone)]
pub struct Regexp {
    regex: Regex,
    pattern: String,
    constraint: &'static str,
    default_message: Option<String>,
    message: Option<String>,
}

impl Regexp {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Self::with_flags(pattern, RegexFlags::NONE)
    }

    pub fn with_flags(pattern: &str, flags: RegexFlags) -> Result<Self, regex::Error> {
        Self::compile(pattern, flags, DEFAULT_REGEX_SIZE_LIMIT)
    }

    /// Compile with an explicit program size limit, typically
    /// `ValidationSettings::regex_size_limit`.
    pub fn compile(pattern: &str, flags: RegexFlags, size_limit: usize) -> Result<Self, regex::Error> {
        let regex = compile_anchored(pattern, flags, size_limit)?;
        Ok(Self::from_compiled(regex, pattern, "regexp", None))
    }

    /// Compile under the size limit configured in `settings`.
    pub fn from_settings(
        pattern: &str,
        flags: RegexFlags,
        settings: &ValidationSettings,
    ) -> Result<Self, regex::Error> {
        Self::compile(pattern, flags, settings.regex_size_limit)
    }

    /// A named pattern rule whose failures read `default_message` unless
    /// the caller overrides it.
    pub fn pattern_rule(
        pattern: &str,
        flags: RegexFlags,
        size_limit: usize,
        constraint: &'static str,
        default_message: impl Into<String>,
    ) -> Result<Self, regex::Error> {
        let regex = compile_anchored(pattern, flags, size_limit)?;
        Ok(Self::from_compiled(regex, pattern, constraint, Some(default_message.into())))
    }

    fn from_compiled(
        regex: Regex,
        pattern: &str,
        constraint: &'static str,
        default_message: Option<String>,
    ) -> Self {
        Self {
            regex,
            pattern: pattern.to_string(),
            constraint,
            default_message,
            message: None,
        }
    }

    /// `local-part@domain`; the domain may not start with `.` or hold `@`.
    pub fn email() -> Self {
        Self::from_compiled(
            EMAIL_REGEX.clone(),
            EMAIL_PATTERN,
            "email",
            Some("Invalid email address.".to_string()),
        )
    }

    /// Six colon-separated hexadecimal octets.
    pub fn mac_address() -> Self {
        Self::from_compiled(
            MAC_ADDRESS_REGEX.clone(),
            MAC_ADDRESS_PATTERN,
            "macAddress",
            Some("Invalid mac address.".to_string()),
        )
    }

    /// `scheme://host[:port][/path]`. See [`url_parts`].
    pub fn url() -> Self {
        Self::from_compiled(
            URL_REGEX.clone(),
            URL_PATTERN,
            "url",
            Some("Invalid url.".to_string()),
        )
    }

    /// Canonical 8-4-4-4-12 hexadecimal form.
    pub fn uuid() -> Self {
        Self::from_compiled(
            UUID_REGEX.clone(),
            UUID_PATTERN,
            "uuid",
            Some("Invalid uuid.".to_string()),
        )
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// The pattern as written, without the start anchor.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    pub fn captures<'t>(&self, text: &'t str) -> Option<Captures<'t>> {
        self.regex.captures(text)
    }
}

impl Rule for Regexp {
    fn evaluate(&self, field: &str, value: &Value) -> Result<(), ValidationError> {
        if value.as_str().is_some_and(|text| self.is_match(text)) {
            return Ok(());
        }

        let message = self.message.as_deref().or(self.default_message.as_deref());
        Err(reject(field, value, self.constraint, message, || {
            format!("{} does not match {}", field, self.pattern)
        }))
    }

    fn name(&self) -> &'static str {
        self.constraint
    }
}

/// Components captured by the URL format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlParts<'a> {
    pub host: &'a str,
    /// Digits only, without the leading `:`
    pub port: Option<&'a str>,
    pub path: Option<&'a str>,
}

/// Split a URL accepted by [`Regexp::url`] into host, port and path.
pub fn url_parts(text: &str) -> Option<UrlParts<'_>> {
    let caps = URL_REGEX.captures(text)?;
    Some(UrlParts {
        host: caps.name("host")?.as_str(),
        port: caps.name("port").map(|m| &m.as_str()[1..]),
        path: caps.name("path").map(|m| m.as_str()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_regexp_is_start_anchored_only() {
        let rule = Regexp::new(r"\d{3}").unwrap();
        assert!(rule.evaluate("code", &json!("123")).is_ok());
        assert!(rule.evaluate("code", &json!("123abc")).is_ok());
        assert!(rule.evaluate("code", &json!("abc123")).is_err());
    }

    #[test]
    fn test_regexp_anchor_survives_multi_line() {
        let rule = Regexp::with_flags("^b", RegexFlags::NONE.multi_line()).unwrap();
        assert!(rule.evaluate("s", &json!("a\nb")).is_err());
        assert!(rule.evaluate("s", &json!("b\na")).is_ok());
    }

    #[test]
    fn test_regexp_flags() {
        let rule = Regexp::with_flags("abc", RegexFlags::IGNORE_CASE).unwrap();
        assert!(rule.evaluate("s", &json!("ABC")).is_ok());
        assert!(Regexp::new("abc").unwrap().evaluate("s", &json!("ABC")).is_err());
    }

    #[test]
    fn test_regexp_default_message() {
        let err = Regexp::new("a+").unwrap().evaluate("s", &json!("b")).unwrap_err();
        assert_eq!(err.message, "s does not match a+");
        assert_eq!(err.constraint, "regexp");
    }

    #[test]
    fn test_regexp_rejects_non_strings() {
        assert!(Regexp::new(r"\d+").unwrap().evaluate("n", &json!(123)).is_err());
    }

    #[test]
    fn test_invalid_pattern_and_size_limit() {
        assert!(Regexp::new("(unclosed").is_err());
        assert!(Regexp::compile(r"\w{1000}", RegexFlags::NONE, 64).is_err());
    }

    #[test]
    fn test_email() {
        let rule = Regexp::email();
        assert!(rule.evaluate("email", &json!("nullcc@gmail.com")).is_ok());
        assert!(rule.evaluate("email", &json!("not-an-email")).is_err());
        assert!(rule.evaluate("email", &json!("a@.com")).is_err());
        assert!(rule.evaluate("email", &json!("a@b@c")).is_err());

        let err = rule.evaluate("email", &json!("x")).unwrap_err();
        assert_eq!(err.message, "Invalid email address.");
        assert_eq!(err.constraint, "email");
    }

    #[test]
    fn test_mac_address() {
        let rule = Regexp::mac_address();
        assert!(rule.evaluate("mac", &json!("80:80:fe:1a:08:13")).is_ok());
        assert!(rule.evaluate("mac", &json!("80:80:FE:1A:08:13")).is_ok());
        let err = rule.evaluate("mac", &json!("80:80:fe:1a:08")).unwrap_err();
        assert_eq!(err.message, "Invalid mac address.");
    }

    #[test]
    fn test_url() {
        let rule = Regexp::url();
        assert!(rule.evaluate("url", &json!("http://www.google.com")).is_ok());
        assert!(rule.evaluate("url", &json!("FTP://host:21/path")).is_ok());
        assert_eq!(
            rule.evaluate("url", &json!("www.google.com")).unwrap_err().message,
            "Invalid url."
        );
    }

    #[test]
    fn test_url_parts() {
        let parts = url_parts("ftp://host:21/path").unwrap();
        assert_eq!(parts.host, "host");
        assert_eq!(parts.port, Some("21"));
        assert_eq!(parts.path, Some("/path"));

        let parts = url_parts("http://www.google.com").unwrap();
        assert_eq!(parts.host, "www.google.com");
        assert_eq!(parts.port, None);
        assert_eq!(parts.path, None);

        assert!(url_parts("not a url").is_none());
    }

    #[test]
    fn test_uuid() {
        let rule = Regexp::uuid();
        assert!(rule
            .evaluate("uuid", &json!("550E8400-E29B-11D4-A716-446655440000"))
            .is_ok());
        assert!(rule
            .evaluate("uuid", &json!("550e8400-e29b-11d4-a716-446655440000"))
            .is_ok());
        let err = rule
            .evaluate("uuid", &json!("550E8400-E29B-11D4-A716-44665544000"))
            .unwrap_err();
        assert_eq!(err.message, "Invalid uuid.");
    }

    #[test]
    fn test_format_message_override() {
        let err = Regexp::uuid()
            .with_message("uuid looks wrong")
            .evaluate("uuid", &json!("nope"))
            .unwrap_err();
        assert_eq!(err.message, "uuid looks wrong");
    }

    #[test]
    fn test_custom_pattern_rule() {
        let zip = Regexp::pattern_rule(
            r"^\d{5}$",
            RegexFlags::NONE,
            DEFAULT_REGEX_SIZE_LIMIT,
            "zip",
            "Invalid zip code.",
        )
        .unwrap();
        assert!(zip.evaluate("zip", &json!("12345")).is_ok());
        let err = zip.evaluate("zip", &json!("1234")).unwrap_err();
        assert_eq!(err.message, "Invalid zip code.");
        assert_eq!(err.constraint, "zip");

        let tight = Regexp::pattern_rule(r"[a-z]{100}", RegexFlags::NONE, 64, "word", "Too long.");
        assert!(tight.is_err());
    }

    #[test]
    fn test_from_settings_applies_size_limit() {
        let tight = ValidationSettings {
            regex_size_limit: 64,
            ..Default::default()
        };
        assert!(Regexp::from_settings(r"[a-z]{100}", RegexFlags::NONE, &tight).is_err());

        let rule = Regexp::from_settings(r"[a-z]{100}", RegexFlags::NONE, &ValidationSettings::default()).unwrap();
        assert!(rule.evaluate("s", &json!("x".repeat(100))).is_ok());
    }

    #[test]
    fn test_formats_tolerate_one_trailing_newline() {
        let uuid = Regexp::uuid();
        assert!(uuid.evaluate("u", &json!("550E8400-E29B-11D4-A716-446655440000\n")).is_ok());
        assert!(uuid.evaluate("u", &json!("550E8400-E29B-11D4-A716-446655440000\n\n")).is_err());
        assert!(uuid.evaluate("u", &json!("550E8400-E29B-11D4-A716-446655440000x")).is_err());

        assert!(Regexp::mac_address().evaluate("m", &json!("80:80:fe:1a:08:13\n")).is_ok());
        assert!(Regexp::email().evaluate("e", &json!("nullcc@gmail.com\n")).is_ok());

        let url = Regexp::url();
        assert!(url.evaluate("u", &json!("http://www.google.com\n")).is_ok());
        assert!(url.evaluate("u", &json!("http://host/a\nb")).is_err());
        let parts = url_parts("ftp://host:21/path\n").unwrap();
        assert_eq!(parts.path, Some("/path"));
    }

    #[test]
    fn test_captures() {
        let rule = Regexp::new(r"(?P<year>\d{4})-(?P<month>\d{2})").unwrap();
        let caps = rule.captures("2024-05-01").unwrap();
        assert_eq!(&caps["year"], "2024");
        assert_eq!(&caps["month"], "05");
    }
}
