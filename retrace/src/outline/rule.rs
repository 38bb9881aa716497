//! `#rule:` line parsing.
//!
//! ```text
//! #rule: /^fn (\w+)/||Function||fn %1||ext=.rs
//! ```
//!
//! Everything after the marker is split on `||`. A part starting with `/` is
//! the pattern (`/re/` or `/re/i`), `//` marks an unused secondary pattern,
//! `ext=` lists file name suffixes, an exact kind name sets the kind, and any
//! other part is the label template.

use super::kind::SymbolKind;
use regex::{Captures, Regex, RegexBuilder};
use thiserror::Error;

pub const RULE_MARKER: &str = "#rule:";

const PART_SEPARATOR: &str = "||";
const EXT_PREFIX: &str = "ext=";

#[derive(Debug, Error)]
pub enum RuleError {
    #[error("Pattern must look like /regex/ or /regex/i: {0}")]
    MalformedPattern(String),

    #[error("Invalid regex {pattern}: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Clone)]
pub struct SymbolRule {
    pub re: Regex,
    pub label: Option<String>,
    pub kind: Option<SymbolKind>,
    /// File name suffixes the rule is limited to. `None` applies everywhere.
    pub ext: Option<Vec<String>>,
}

impl SymbolRule {
    /// A rule with only a pattern.
    pub fn new(re: Regex) -> Self {
        Self {
            re,
            label: None,
            kind: None,
            ext: None,
        }
    }

    /// Parse the rule carried by `line`, if any.
    ///
    /// Returns `Ok(None)` when the line has no marker, nothing after it, or no
    /// pattern part.
    pub fn parse(line: &str) -> Result<Option<Self>, RuleError> {
        let Some((_, rest)) = line.split_once(RULE_MARKER) else {
            return Ok(None);
        };
        let rest = rest.trim();
        if rest.is_empty() {
            return Ok(None);
        }

        let mut re = None;
        let mut label = None;
        let mut kind = None;
        let mut ext = None;

        for part in rest.split(PART_SEPARATOR).map(str::trim) {
            if let Some(secondary) = part.strip_prefix("//") {
                // Secondary patterns are validated but not used.
                to_regex(&format!("/{secondary}"))?;
            } else if part.starts_with('/') {
                re = Some(to_regex(part)?);
            } else if let Some(list) = part.strip_prefix(EXT_PREFIX) {
                ext = Some(
                    list.split(',')
                        .map(str::trim)
                        .filter(|ext| !ext.is_empty())
                        .map(str::to_string)
                        .collect(),
                );
            } else if let Ok(parsed) = part.parse::<SymbolKind>() {
                kind = Some(parsed);
            } else if !part.is_empty() {
                label = Some(part.to_string());
            }
        }

        Ok(re.map(|re| Self {
            re,
            label,
            kind,
            ext,
        }))
    }

    /// Whether the rule is active for `file_name`.
    pub fn applies_to(&self, file_name: &str) -> bool {
        match &self.ext {
            None => true,
            Some(exts) => exts.iter().any(|ext| file_name.ends_with(ext.as_str())),
        }
    }

    /// Match the rule against one line, returning the symbol label.
    pub fn label_for(&self, line: &str) -> Option<String> {
        let caps = self.re.captures(line)?;
        Some(match &self.label {
            Some(template) => expand_label(template, &caps),
            None => caps
                .get(1)
                .map(|m| m.as_str())
                .filter(|group| !group.is_empty())
                .unwrap_or(&caps[0])
                .to_string(),
        })
    }
}

/// Compile `/pattern/` or `/pattern/i`.
fn to_regex(part: &str) -> Result<Regex, RuleError> {
    let malformed = || RuleError::MalformedPattern(part.to_string());
    let body = part.strip_prefix('/').ok_or_else(malformed)?;
    let (pattern, case_insensitive) = if let Some(pattern) = body.strip_suffix("/i") {
        (pattern, true)
    } else if let Some(pattern) = body.strip_suffix('/') {
        (pattern, false)
    } else {
        return Err(malformed());
    };

    RegexBuilder::new(pattern)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|source| RuleError::InvalidRegex {
            pattern: pattern.to_string(),
            source,
        })
}

/// Replace `%N` (single digit) with capture group `N`.
fn expand_label(template: &str, caps: &Captures<'_>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        let group = match chars.peek().and_then(|next| next.to_digit(10)) {
            Some(group) if c == '%' => group,
            _ => {
                out.push(c);
                continue;
            },
        };
        chars.next();
        if let Some(m) = caps.get(group as usize) {
            out.push_str(m.as_str());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(line: &str) -> SymbolRule {
        match SymbolRule::parse(line) {
            Ok(Some(rule)) => rule,
            other => panic!("expected rule from {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn lines_without_rules() {
        assert!(matches!(SymbolRule::parse("plain text"), Ok(None)));
        assert!(matches!(SymbolRule::parse("#rule:   "), Ok(None)));
        assert!(matches!(SymbolRule::parse("#rule: Function||label"), Ok(None)));
    }

    #[test]
    fn parses_all_parts() {
        let rule = parse_ok("// #rule: /^fn (\\w+)/||Function||fn %1||ext=.rs, .ron");
        assert_eq!(rule.re.as_str(), "^fn (\\w+)");
        assert_eq!(rule.kind, Some(SymbolKind::Function));
        assert_eq!(rule.label.as_deref(), Some("fn %1"));
        assert_eq!(rule.ext, Some(vec![".rs".to_string(), ".ron".to_string()]));
    }

    #[test]
    fn case_insensitive_flag() {
        let rule = parse_ok("#rule: /^section (\\w+)/i");
        assert_eq!(rule.label_for("SECTION intro").as_deref(), Some("intro"));

        let strict = parse_ok("#rule: /^section (\\w+)/");
        assert_eq!(strict.label_for("SECTION intro"), None);
    }

    #[test]
    fn secondary_pattern_is_ignored() {
        let rule = parse_ok("#rule: //ignored/||/kept/");
        assert_eq!(rule.re.as_str(), "kept");
    }

    #[test]
    fn malformed_and_invalid_patterns() {
        assert!(matches!(
            SymbolRule::parse("#rule: /unterminated"),
            Err(RuleError::MalformedPattern(_))
        ));
        assert!(matches!(
            SymbolRule::parse("#rule: /(unclosed/"),
            Err(RuleError::InvalidRegex { .. })
        ));
    }

    #[test]
    fn label_defaults_to_first_group_then_whole_match() {
        let rule = parse_ok("#rule: /let (\\w+)?=/");
        assert_eq!(rule.label_for("let x= 1").as_deref(), Some("x"));
        assert_eq!(rule.label_for("let = 1").as_deref(), Some("let ="));
        assert_eq!(rule.label_for("const y = 1"), None);
    }

    #[test]
    fn label_template_substitutes_groups() {
        let rule = parse_ok("#rule: /^(\\w+)\\.(\\w+)/||%2 of %1 (%9) 100%");
        assert_eq!(
            rule.label_for("impl.method rest").as_deref(),
            Some("method of impl () 100%")
        );
    }

    #[test]
    fn extension_suffix_matching() {
        let rule = parse_ok("#rule: /x/||ext=.rs,toml");
        assert!(rule.applies_to("src/main.rs"));
        assert!(rule.applies_to("Cargo.toml"));
        assert!(rule.applies_to("toml"));
        assert!(!rule.applies_to("main.rs.bak"));

        let everywhere = parse_ok("#rule: /x/");
        assert!(everywhere.applies_to("anything"));
    }
}
