//! Typed parameters declared by template placeholders

use regex::Regex;

/// One `<name>` / `<name:type>` placeholder, resolved against a registry.
///
/// The fragment is compiled when the parameter is created, so a broken type
/// pattern is reported while compiling the template rather than on first use.
#[derive(Debug, Clone)]
pub struct Parameter {
    name: String,
    type_name: String,
    expression: Regex,
    /// Fragment with its own group names removed, as spliced into templates
    embedded: String,
}

impl Parameter {
    pub fn new(
        name: impl Into<String>,
        type_name: impl Into<String>,
        fragment: &str,
    ) -> Result<Self, regex::Error> {
        let expression = Regex::new(fragment)?;
        let embedded = strip_group_names(fragment);
        Regex::new(&embedded)?;

        Ok(Self {
            name: name.into(),
            type_name: type_name.into(),
            expression,
            embedded,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type name the parameter was resolved through (`string` when omitted)
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Pattern fragment text for this parameter's type
    pub fn fragment(&self) -> &str {
        self.expression.as_str()
    }

    /// Fragment text safe to embed more than once in one expression.
    ///
    /// Named groups become plain groups, so two parameters of the same type
    /// cannot clash over a group name. Group count and order are unchanged.
    pub fn embedded_fragment(&self) -> &str {
        &self.embedded
    }

    /// Compiled fragment, unanchored
    pub fn expression(&self) -> &Regex {
        &self.expression
    }

    /// Name of the capture group holding the parameter at `position`
    pub(crate) fn group_name(position: usize) -> String {
        format!("arg{}", position)
    }
}

/// Rewrite `(?P<name>...)` and `(?<name>...)` as `(...)`, leaving escapes
/// and character classes untouched.
fn strip_group_names(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    let mut rest = fragment;
    let mut class_depth = 0usize;

    while let Some(c) = rest.chars().next() {
        if c == '\\' {
            let len = 1 + rest[1..].chars().next().map_or(0, char::len_utf8);
            out.push_str(&rest[..len]);
            rest = &rest[len..];
            continue;
        }

        if class_depth > 0 {
            match c {
                '[' => class_depth += 1,
                ']' => class_depth -= 1,
                _ => {}
            }
            out.push(c);
            rest = &rest[c.len_utf8()..];
            continue;
        }

        if c == '[' {
            class_depth = 1;
            out.push('[');
            rest = &rest[1..];
            // A leading `]` (after an optional `^`) is a literal member
            if let Some(after) = rest.strip_prefix('^') {
                out.push('^');
                rest = after;
            }
            if let Some(after) = rest.strip_prefix(']') {
                out.push(']');
                rest = after;
            }
            continue;
        }

        if let Some(after) = rest
            .strip_prefix("(?P<")
            .or_else(|| rest.strip_prefix("(?<"))
        {
            if let Some(end) = after.find('>') {
                out.push('(');
                rest = &after[end + 1..];
                continue;
            }
        }

        out.push(c);
        rest = &rest[c.len_utf8()..];
    }

    out
}

/// Parameters are equal when name and fragment text are equal; the type name
/// used to reach the fragment does not matter.
impl PartialEq for Parameter {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.fragment() == other.fragment()
    }
}

impl Eq for Parameter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let param = Parameter::new("lorem", "integer", "[0-9]+").expect("Should compile");
        assert_eq!(param.name(), "lorem");
        assert_eq!(param.type_name(), "integer");
        assert_eq!(param.fragment(), "[0-9]+");
        assert!(param.expression().is_match("123"));
    }

    #[test]
    fn test_invalid_fragment() {
        assert!(Parameter::new("lorem", "broken", "[0-9").is_err());
    }

    #[test]
    fn test_equality_ignores_type_name() {
        let a = Parameter::new("id", "integer", "[0-9]+").unwrap();
        let b = Parameter::new("id", "digits", "[0-9]+").unwrap();
        let c = Parameter::new("id", "string", r"[^\s]+").unwrap();
        let d = Parameter::new("other", "integer", "[0-9]+").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_embedded_fragment_drops_group_names() {
        let param = Parameter::new("kv", "kv", r"(?P<key>[a-z]+)=(?<value>[0-9]+)").unwrap();
        assert_eq!(param.fragment(), r"(?P<key>[a-z]+)=(?<value>[0-9]+)");
        assert_eq!(param.embedded_fragment(), "([a-z]+)=([0-9]+)");
        assert_eq!(
            Regex::new(param.embedded_fragment()).unwrap().captures_len(),
            param.expression().captures_len()
        );
    }

    #[test]
    fn test_strip_group_names_keeps_escapes_and_classes() {
        assert_eq!(strip_group_names(r"\(?P<x>a\)"), r"\(?P<x>a\)");
        assert_eq!(strip_group_names(r"[(?P<x>]+"), r"[(?P<x>]+");
        assert_eq!(strip_group_names(r"[]](?P<x>b)"), r"[]](b)");
        assert_eq!(strip_group_names(r"[^]a](?P<x>b)"), r"[^]a](b)");
        assert_eq!(strip_group_names(r"[[:alpha:]](?P<x>b)"), r"[[:alpha:]](b)");
        assert_eq!(strip_group_names(r"(?i)(?:x)[0-9]+"), r"(?i)(?:x)[0-9]+");
    }

    #[test]
    fn test_group_names() {
        assert_eq!(Parameter::group_name(0), "arg0");
        assert_eq!(Parameter::group_name(12), "arg12");
    }
}
