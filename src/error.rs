//! Error types for template compilation and request matching

use std::num::ParseIntError;

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::parser::ast::Span;

/// Errors raised while compiling a template
#[derive(Error, Debug)]
pub enum CompileError {
    /// A placeholder body is not `name` or `name:type`
    #[error("malformed placeholder '<{text}>': {reason}")]
    MalformedPlaceholder {
        text: String,
        reason: String,
        span: Span,
    },

    /// A placeholder names a type the registry does not define
    #[error("unknown type '{type_name}' for parameter '{name}'")]
    UnknownType {
        name: String,
        type_name: String,
        span: Span,
    },

    /// Two placeholders share a name
    #[error("parameter '{name}' is declared more than once")]
    DuplicateParameter {
        name: String,
        span: Span,
        first: Span,
    },

    /// The registry fragment for a type is not a valid pattern
    #[error("pattern for type '{type_name}' does not compile: {source}")]
    InvalidFragment {
        type_name: String,
        span: Span,
        #[source]
        source: regex::Error,
    },

    /// The synthesized expression for the whole template does not compile
    #[error("template does not compile to a valid pattern: {0}")]
    PatternCompile(#[source] regex::Error),
}

impl CompileError {
    /// Location of the offending placeholder in the template text, if any
    pub fn span(&self) -> Option<Span> {
        match self {
            CompileError::MalformedPlaceholder { span, .. }
            | CompileError::UnknownType { span, .. }
            | CompileError::DuplicateParameter { span, .. }
            | CompileError::InvalidFragment { span, .. } => Some(span.clone()),
            CompileError::PatternCompile(_) => None,
        }
    }

    /// Format the error with template context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        self.render(source, filename, true)
    }

    fn render(&self, source: &str, filename: &str, color: bool) -> String {
        let span = self.span().unwrap_or(0..source.len());
        let message = self.to_string();

        let mut report = Report::build(ReportKind::Error, filename, span.start)
            .with_config(Config::default().with_color(color))
            .with_message(&message)
            .with_label(
                Label::new((filename, span))
                    .with_message(self.label())
                    .with_color(Color::Red),
            );

        if let CompileError::DuplicateParameter { first, .. } = self {
            report = report.with_label(
                Label::new((filename, first.clone()))
                    .with_message("first declared here")
                    .with_color(Color::Blue),
            );
        }

        let mut buf = Vec::new();
        if report
            .finish()
            .write((filename, Source::from(source)), &mut buf)
            .is_err()
        {
            return message;
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn label(&self) -> String {
        match self {
            CompileError::MalformedPlaceholder { reason, .. } => reason.clone(),
            CompileError::UnknownType { type_name, .. } => {
                format!("'{}' is not in the type registry", type_name)
            }
            CompileError::DuplicateParameter { .. } => "declared again here".to_string(),
            CompileError::InvalidFragment { .. } => "type pattern is invalid".to_string(),
            CompileError::PatternCompile(_) => "in this template".to_string(),
        }
    }
}

/// Errors raised while matching a request or reading captured values
#[derive(Error, Debug)]
pub enum MatchError {
    /// The request does not match the template
    #[error("request '{request}' does not match template '{template}'")]
    NoMatch { template: String, request: String },

    /// Lookup of a parameter the template does not declare
    #[error("unknown parameter '{name}'")]
    UnknownParameter { name: String },

    /// Positional lookup outside the captured range
    #[error("no parameter at position {position} (template has {count})")]
    OutOfRange { position: usize, count: usize },

    /// Re-applying the expression did not yield exactly one match
    #[error("unable to parse request '{request}': expected one match, found {found}")]
    Parse { request: String, found: usize },

    /// A captured value is not a valid integer
    #[error("value '{value}' of parameter '{name}' is not an integer: {source}")]
    NumericConversion {
        name: String,
        value: String,
        #[source]
        source: ParseIntError,
    },
}
