//! Merge rules: patterns selecting which files contribute to a pass.

use crate::error::{MergeError, Result};
use regex_lite::Regex;

/// Delimiters accepted around a delimited pattern (`/base/i`).
const PATTERN_DELIMITERS: [char; 3] = ['/', '#', '~'];

/// A compiled merge rule, tested against bare file names.
#[derive(Debug, Clone)]
pub struct MergeRule {
    pattern: String,
    regex: Regex,
}

impl MergeRule {
    /// Compile a rule.
    ///
    /// Bare patterns are searched anywhere in the file name. Delimited
    /// patterns such as `/^base\./i` are unwrapped and their trailing
    /// modifiers (`i`, `m`, `s`, `x`, `U`) become an inline flag group. Any
    /// other modifier is rejected.
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        let source = match unwrap_delimited(&pattern) {
            Ok(Some(source)) => source,
            Ok(None) => pattern.clone(),
            Err(modifier) => {
                return Err(MergeError::UnknownRuleModifier { pattern, modifier });
            }
        };
        let regex = Regex::new(&source).map_err(|source| MergeError::InvalidRule {
            pattern: pattern.clone(),
            source,
        })?;
        Ok(Self { pattern, regex })
    }

    /// The pattern as supplied by the caller.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_match(&self, file_name: &str) -> bool {
        self.regex.is_match(file_name)
    }
}

impl std::fmt::Display for MergeRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pattern)
    }
}

/// Strip delimiters and translate modifiers.
///
/// `Ok(None)` means the pattern is not delimited; `Err` carries the first
/// modifier with no regex equivalent.
fn unwrap_delimited(pattern: &str) -> std::result::Result<Option<String>, char> {
    let Some(delimiter) = pattern.chars().next() else {
        return Ok(None);
    };
    if !PATTERN_DELIMITERS.contains(&delimiter) {
        return Ok(None);
    }

    let end = match pattern.rfind(delimiter) {
        Some(end) if end > 0 => end,
        _ => return Ok(None),
    };

    let mut inline_flags = String::new();
    for modifier in pattern[end + 1..].chars() {
        match modifier {
            'i' | 'm' | 's' | 'x' | 'U' => {
                if !inline_flags.contains(modifier) {
                    inline_flags.push(modifier);
                }
            }
            'u' | 'D' => {}
            other => return Err(other),
        }
    }

    let body = pattern[1..end].replace(&format!("\\{}", delimiter), &delimiter.to_string());
    if inline_flags.is_empty() {
        Ok(Some(body))
    } else {
        Ok(Some(format!("(?{}){}", inline_flags, body)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_pattern_is_unanchored() {
        let rule = MergeRule::new("base").unwrap();
        assert!(rule.is_match("base.yml"));
        assert!(rule.is_match("database.yaml"));
        assert!(!rule.is_match("override.yml"));
    }

    #[test]
    fn test_anchored_pattern() {
        let rule = MergeRule::new(r"^base\.ya?ml$").unwrap();
        assert!(rule.is_match("base.yml"));
        assert!(rule.is_match("base.yaml"));
        assert!(!rule.is_match("database.yml"));
    }

    #[test]
    fn test_delimited_pattern() {
        let rule = MergeRule::new(r"/^base\./").unwrap();
        assert!(rule.is_match("base.yml"));
        assert!(!rule.is_match("xbase.yml"));
        assert_eq!(rule.pattern(), r"/^base\./");
    }

    #[test]
    fn test_delimited_pattern_with_flags() {
        let rule = MergeRule::new("/^BASE/i").unwrap();
        assert!(rule.is_match("base.yml"));
        assert!(rule.is_match("Base.yml"));
    }

    #[test]
    fn test_alternate_delimiter_and_escaped_delimiter() {
        let rule = MergeRule::new(r"#^env\#prod#").unwrap();
        assert!(rule.is_match("env#prod.yml"));

        let rule = MergeRule::new(r"/^a\/b/").unwrap();
        assert!(rule.is_match("a/b"));
    }

    #[test]
    fn test_ungreedy_modifier() {
        let rule = MergeRule::new("/^base/U").unwrap();
        assert!(rule.is_match("base.yml"));
        assert!(!rule.is_match("override.yml"));
        assert_eq!(unwrap_delimited("/a+/U"), Ok(Some("(?U)a+".to_string())));
    }

    #[test]
    fn test_unknown_modifier_is_rejected() {
        assert_eq!(unwrap_delimited("/x/q"), Err('q'));
        match MergeRule::new("/x/q").unwrap_err() {
            MergeError::UnknownRuleModifier { pattern, modifier } => {
                assert_eq!(pattern, "/x/q");
                assert_eq!(modifier, 'q');
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_lone_delimiter_is_not_unwrapped() {
        assert_eq!(unwrap_delimited("/"), Ok(None));
        assert_eq!(unwrap_delimited("/abc"), Ok(None));
        assert_eq!(unwrap_delimited("plain"), Ok(None));
        assert_eq!(unwrap_delimited(""), Ok(None));
    }

    #[test]
    fn test_invalid_pattern() {
        let err = MergeRule::new("(unclosed").unwrap_err();
        match err {
            MergeError::InvalidRule { pattern, .. } => assert_eq!(pattern, "(unclosed"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
