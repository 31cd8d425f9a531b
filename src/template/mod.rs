//! `{{name}}` placeholder scanning, preview segmentation and substitution.
//!
//! Everything here is pure. Malformed input never errors: text without a
//! complete `{{...}}` token simply has no variables.

use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::OnceLock;

pub type Values = BTreeMap<String, String>;

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{([^}]+)\}\}").expect("placeholder regex is valid"))
}

/// One piece of a rendered preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Placeholder {
        name: String,
        /// Raw token as written, e.g. `{{ name }}`.
        raw: String,
        /// Present only when the supplied value is non-empty after trimming.
        value: Option<String>,
    },
}

impl Segment {
    pub fn is_filled(&self) -> bool {
        matches!(self, Segment::Placeholder { value: Some(_), .. })
    }

    /// Source text this segment was cut from.
    pub fn raw(&self) -> &str {
        match self {
            Segment::Text(t) => t,
            Segment::Placeholder { raw, .. } => raw,
        }
    }
}

/// Names of every placeholder in order of appearance, duplicates included.
pub fn detect_variables(content: &str) -> Vec<String> {
    placeholder_re()
        .captures_iter(content)
        .map(|c| c[1].trim().to_string())
        .collect()
}

/// Like [`detect_variables`] but each name appears once, at its first position.
pub fn unique_variables(content: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in detect_variables(content) {
        if !out.contains(&name) {
            out.push(name);
        }
    }
    out
}

fn filled<'a>(values: &'a Values, name: &str) -> Option<&'a str> {
    values
        .get(name)
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
}

pub fn render_preview(content: &str, values: &Values) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut last = 0;
    for caps in placeholder_re().captures_iter(content) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > last {
            segments.push(Segment::Text(content[last..whole.start()].to_string()));
        }
        let name = caps[1].trim().to_string();
        let value = filled(values, &name).map(str::to_string);
        segments.push(Segment::Placeholder {
            name,
            raw: whole.as_str().to_string(),
            value,
        });
        last = whole.end();
    }
    if last < content.len() {
        segments.push(Segment::Text(content[last..].to_string()));
    }
    segments
}

/// Substitute every placeholder that has a non-empty value; leave the rest as
/// written. Replacement text is inserted literally and never rescanned.
pub fn compile(content: &str, values: &Values) -> String {
    placeholder_re()
        .replace_all(content, |caps: &Captures| match filled(values, caps[1].trim()) {
            Some(v) => v.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// True when no placeholder in `content` is left without a value.
pub fn is_complete(content: &str, values: &Values) -> bool {
    detect_variables(content)
        .iter()
        .all(|name| filled(values, name).is_some())
}

/// Parse `key=value` pairs as given on the command line.
pub fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (k, v) = s
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{s}'"))?;
    let k = k.trim();
    if k.is_empty() {
        return Err(format!("empty variable name in '{s}'"));
    }
    Ok((k.to_string(), v.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vals(pairs: &[(&str, &str)]) -> Values {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn detects_in_order() {
        assert_eq!(
            detect_variables("Hi {{name}}, your {{item}} is ready"),
            vec!["name", "item"]
        );
    }

    #[test]
    fn no_placeholders() {
        assert!(detect_variables("no placeholders here").is_empty());
        assert!(detect_variables("{{}} and {{ unterminated").is_empty());
    }

    #[test]
    fn trims_and_keeps_duplicates() {
        assert_eq!(
            detect_variables("{{ a }} {{b}} {{a}}"),
            vec!["a", "b", "a"]
        );
        assert_eq!(unique_variables("{{ a }} {{b}} {{a}}"), vec!["a", "b"]);
    }

    #[test]
    fn compile_without_values_is_identity() {
        let s = "Write about {{topic}} for {{ audience }}.";
        assert_eq!(compile(s, &Values::new()), s);
    }

    #[test]
    fn compile_replaces_every_occurrence() {
        let out = compile("{{x}} and {{x}} and {{ x }}", &vals(&[("x", "v")]));
        assert_eq!(out, "v and v and v");
        assert!(!out.contains("{{x}}"));
    }

    #[test]
    fn blank_values_leave_token() {
        let out = compile("{{a}}-{{b}}", &vals(&[("a", "   "), ("b", "")]));
        assert_eq!(out, "{{a}}-{{b}}");
    }

    #[test]
    fn values_are_literal() {
        let out = compile("{{a}}", &vals(&[("a", "$1 {{b}} \\d+")]));
        assert_eq!(out, "$1 {{b}} \\d+");
        // A second pass only touches tokens introduced by values.
        let again = compile(&out, &vals(&[("a", "$1 {{b}} \\d+")]));
        assert_eq!(again, out);
    }

    #[test]
    fn sql_generator_example() {
        let content = "Write a SQL query to {{action}} from the {{table}} table where {{condition}}.";
        let out = compile(
            content,
            &vals(&[("action", "select"), ("table", "users"), ("condition", "active=true")]),
        );
        assert_eq!(out, "Write a SQL query to select from the users table where active=true.");
    }

    #[test]
    fn preview_marks_filled_and_unfilled() {
        let segs = render_preview("Hi {{name}}, {{ item }}!", &vals(&[("name", "Ana")]));
        assert_eq!(
            segs,
            vec![
                Segment::Text("Hi ".into()),
                Segment::Placeholder { name: "name".into(), raw: "{{name}}".into(), value: Some("Ana".into()) },
                Segment::Text(", ".into()),
                Segment::Placeholder { name: "item".into(), raw: "{{ item }}".into(), value: None },
                Segment::Text("!".into()),
            ]
        );
    }

    #[test]
    fn preview_raw_reassembles_source() {
        let s = "{{a}}x{{b}}{{c}} tail";
        let joined: String = render_preview(s, &vals(&[("b", "1")])).iter().map(Segment::raw).collect();
        assert_eq!(joined, s);
    }

    #[test]
    fn completeness() {
        assert!(is_complete("plain", &Values::new()));
        assert!(!is_complete("{{a}}", &vals(&[("a", " ")])));
        assert!(is_complete("{{a}}", &vals(&[("a", "x")])));
    }

    #[test]
    fn assignments() {
        assert_eq!(parse_assignment("a=b=c").unwrap(), ("a".into(), "b=c".into()));
        assert_eq!(parse_assignment(" k =").unwrap(), ("k".into(), "".into()));
        assert!(parse_assignment("novalue").is_err());
        assert!(parse_assignment("=x").is_err());
    }
}
