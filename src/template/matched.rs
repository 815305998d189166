//! Successful matches and typed access to captured values

use crate::error::MatchError;

use super::command::Template;
use super::parameter::Parameter;

/// A request that matched a [`Template`].
///
/// Captured values are not stored; each accessor re-applies the template's
/// expression to the request.
#[derive(Debug, Clone, Copy)]
pub struct Match<'a> {
    template: &'a Template,
    request: &'a str,
}

impl<'a> Match<'a> {
    pub(crate) fn new(template: &'a Template, request: &'a str) -> Self {
        Self { template, request }
    }

    pub fn template(&self) -> &'a Template {
        self.template
    }

    pub fn request(&self) -> &'a str {
        self.request
    }

    /// Value captured by the parameter at `position` (declaration order).
    ///
    /// A parameter whose group did not take part in the match (possible with
    /// alternations in raw literal text) reads as the empty string.
    pub fn value_at(&self, position: usize) -> Result<&'a str, MatchError> {
        let mut all = self.template.expression().captures_iter(self.request);
        let captures = match (all.next(), all.next()) {
            (Some(captures), None) => captures,
            (None, _) => {
                return Err(MatchError::Parse {
                    request: self.request.to_string(),
                    found: 0,
                })
            }
            (Some(_), Some(_)) => {
                return Err(MatchError::Parse {
                    request: self.request.to_string(),
                    found: 2 + all.count(),
                })
            }
        };

        let count = self.template.parameters().len();
        if position >= count {
            return Err(MatchError::OutOfRange { position, count });
        }

        Ok(captures
            .name(&Parameter::group_name(position))
            .map_or("", |m| m.as_str()))
    }

    /// Value captured by the parameter called `name`
    pub fn value(&self, name: &str) -> Result<&'a str, MatchError> {
        let position = self
            .template
            .position(name)
            .ok_or_else(|| MatchError::UnknownParameter {
                name: name.to_string(),
            })?;
        self.value_at(position)
    }

    /// Owned copy of the value captured by `name`
    pub fn as_string(&self, name: &str) -> Result<String, MatchError> {
        self.value(name).map(str::to_string)
    }

    /// Value captured by `name`, parsed as a base-10 signed integer
    pub fn as_integer(&self, name: &str) -> Result<i64, MatchError> {
        let value = self.value(name)?;
        value
            .parse::<i64>()
            .map_err(|source| MatchError::NumericConversion {
                name: name.to_string(),
                value: value.to_string(),
                source,
            })
    }

    /// All `(name, value)` pairs in declaration order
    pub fn values(&self) -> Result<Vec<(&'a str, &'a str)>, MatchError> {
        self.template
            .parameters()
            .iter()
            .enumerate()
            .map(|(position, parameter)| {
                self.value_at(position)
                    .map(|value| (parameter.name(), value))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::types::TypeRegistry;

    use super::*;

    #[test]
    fn test_typed_values() {
        let template = Template::compile("command <lorem:integer> <ipsum:string>", None, false)
            .expect("Should compile");
        let m = template
            .match_request("command 12345 abcdef")
            .expect("Should match");

        assert_eq!(m.as_integer("lorem").unwrap(), 12345);
        assert_eq!(m.as_string("ipsum").unwrap(), "abcdef");
        assert_eq!(m.value_at(0).unwrap(), "12345");
        assert_eq!(m.value_at(1).unwrap(), "abcdef");
        assert_eq!(m.request(), "command 12345 abcdef");
        assert_eq!(m.template(), &template);
    }

    #[test]
    fn test_integer_conversion_failure() {
        let template = Template::compile("command <lorem:integer> <ipsum>", None, false).unwrap();
        let m = template.match_request("command 1 abcdef").unwrap();
        match m.as_integer("ipsum") {
            Err(MatchError::NumericConversion { name, value, .. }) => {
                assert_eq!(name, "ipsum");
                assert_eq!(value, "abcdef");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_integer_overflow() {
        let template = Template::compile("n <value:integer>", None, false).unwrap();
        let m = template.match_request("n 99999999999999999999").unwrap();
        assert!(matches!(
            m.as_integer("value"),
            Err(MatchError::NumericConversion { .. })
        ));
    }

    #[test]
    fn test_signed_integer() {
        let registry = TypeRegistry::basic().with_type("signed", "[+-]?[0-9]+");
        let template = Template::compile("move <by:signed>", Some(&registry), false).unwrap();
        assert_eq!(
            template.match_request("move -42").unwrap().as_integer("by").unwrap(),
            -42
        );
    }

    #[test]
    fn test_unknown_parameter_and_out_of_range() {
        let template = Template::compile("command <lorem>", None, false).unwrap();
        let m = template.match_request("command example").unwrap();

        assert!(matches!(
            m.value("nope"),
            Err(MatchError::UnknownParameter { .. })
        ));
        assert!(matches!(
            m.as_integer("nope"),
            Err(MatchError::UnknownParameter { .. })
        ));
        assert!(matches!(
            m.value_at(99),
            Err(MatchError::OutOfRange {
                position: 99,
                count: 1
            })
        ));
        assert!(matches!(
            m.value_at(1),
            Err(MatchError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_empty_capture_is_a_value() {
        let registry = TypeRegistry::basic().with_type("any", ".*");
        let template = Template::compile("say:<what:any>", Some(&registry), false).unwrap();
        let m = template.match_request("say:").unwrap();
        assert_eq!(m.value("what").unwrap(), "");
    }

    #[test]
    fn test_groups_inside_fragments_do_not_shift_positions() {
        let registry = TypeRegistry::basic().with_type("pair", "([a-z]+)=([0-9]+)");
        let template = Template::compile("set <kv:pair> <note>", Some(&registry), false).unwrap();
        let m = template.match_request("set x=1 hello").unwrap();
        assert_eq!(m.value("kv").unwrap(), "x=1");
        assert_eq!(m.value("note").unwrap(), "hello");
    }

    #[test]
    fn test_non_participating_group_reads_empty() {
        let template = Template::compile("reset|set <value>", None, false).unwrap();
        let m = template.match_request("reset").unwrap();
        assert_eq!(m.value("value").unwrap(), "");
    }

    #[test]
    fn test_values_in_order() {
        let template = Template::compile("cp <from> <to>", None, false).unwrap();
        let m = template.match_request("cp a.txt b.txt").unwrap();
        assert_eq!(m.values().unwrap(), vec![("from", "a.txt"), ("to", "b.txt")]);
    }

    #[test]
    fn test_parse_error_on_hand_built_match() {
        let template = Template::compile("cmd <a>", None, false).unwrap();
        let m = Match::new(&template, "not a command");
        assert!(matches!(
            m.value_at(0),
            Err(MatchError::Parse { found: 0, .. })
        ));
    }
}
