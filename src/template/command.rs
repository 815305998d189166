//! Compiled templates

use std::fmt;

use regex::Regex;

use crate::error::{CompileError, MatchError};
use crate::types::TypeRegistry;

use super::compiler;
use super::matched::Match;
use super::parameter::Parameter;

/// A compiled command template.
///
/// Immutable once built; share it freely across threads.
#[derive(Debug, Clone)]
pub struct Template {
    text: String,
    escape_literals: bool,
    parameters: Vec<Parameter>,
    expression: Regex,
}

impl Template {
    /// Compile `text` against `registry` (the basic vocabulary when `None`)
    pub fn compile(
        text: &str,
        registry: Option<&TypeRegistry>,
        escape_literals: bool,
    ) -> Result<Self, CompileError> {
        compiler::compile(text, registry, escape_literals)
    }

    pub(crate) fn from_parts(
        text: String,
        escape_literals: bool,
        parameters: Vec<Parameter>,
        expression: Regex,
    ) -> Self {
        Self {
            text,
            escape_literals,
            parameters,
            expression,
        }
    }

    /// The template text as written
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn escape_literals(&self) -> bool {
        self.escape_literals
    }

    /// Parameters in declaration order
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// The anchored expression requests are matched against
    pub fn expression(&self) -> &Regex {
        &self.expression
    }

    /// Whether the whole request matches this template
    pub fn matches(&self, request: &str) -> bool {
        let matched = self.expression.is_match(request);
        tracing::trace!(template = %self.text, request, matched, "match attempt");
        matched
    }

    /// Match a request, giving access to the captured values
    pub fn match_request<'a>(&'a self, request: &'a str) -> Result<Match<'a>, MatchError> {
        if self.matches(request) {
            Ok(Match::new(self, request))
        } else {
            Err(MatchError::NoMatch {
                template: self.text.clone(),
                request: request.to_string(),
            })
        }
    }

    /// Zero-based declaration index of the parameter called `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.parameters.iter().position(|p| p.name() == name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.position(name).is_some()
    }
}

impl PartialEq for Template {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
            && self.escape_literals == other.escape_literals
            && self.parameters == other.parameters
    }
}

impl Eq for Template {}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}
