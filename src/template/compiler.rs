//! Template compiler: template text + type registry -> anchored matcher

use std::collections::HashMap;

use regex::Regex;

use crate::error::CompileError;
use crate::parser::ast::{Document, Span, TemplatePart};
use crate::parser::parse;
use crate::types::TypeRegistry;

use super::command::Template;
use super::parameter::Parameter;

/// Compile template text into a [`Template`].
///
/// `registry` defaults to [`TypeRegistry::basic`]. With `escape_literals`
/// set, literal text outside placeholders matches verbatim; otherwise it is
/// spliced into the expression as raw pattern syntax.
pub fn compile(
    text: &str,
    registry: Option<&TypeRegistry>,
    escape_literals: bool,
) -> Result<Template, CompileError> {
    let basic;
    let registry = match registry {
        Some(registry) => registry,
        None => {
            basic = TypeRegistry::basic();
            &basic
        }
    };

    let document = parse(text)?;
    let (parameters, source) = build(&document, registry, escape_literals)?;
    let expression = Regex::new(&source).map_err(CompileError::PatternCompile)?;

    tracing::debug!(
        template = text,
        parameters = parameters.len(),
        escape_literals,
        expression = %expression,
        "compiled template"
    );

    Ok(Template::from_parts(
        text.to_string(),
        escape_literals,
        parameters,
        expression,
    ))
}

/// Resolve placeholders to parameters and build the anchored expression
/// source in one pass over the parts.
///
/// Literal runs are escaped one by one, so placeholder delimiters are never
/// touched by escaping. Each parameter gets one named group, `argN`, and is
/// pushed in the same step as its group, so parameters and groups stay in
/// declaration order.
fn build(
    document: &Document,
    registry: &TypeRegistry,
    escape_literals: bool,
) -> Result<(Vec<Parameter>, String), CompileError> {
    let mut parameters: Vec<Parameter> = Vec::new();
    let mut seen: HashMap<&str, Span> = HashMap::new();
    let mut body = String::new();

    for part in &document.parts {
        let decl = match &part.node {
            TemplatePart::Literal(text) if escape_literals => {
                body.push_str(&regex::escape(text));
                continue;
            }
            TemplatePart::Literal(text) => {
                body.push_str(text);
                continue;
            }
            TemplatePart::Placeholder(decl) => decl,
        };

        let span = part.span.clone();
        let type_name = decl.effective_type();

        let fragment = registry
            .resolve(type_name)
            .ok_or_else(|| CompileError::UnknownType {
                name: decl.name.clone(),
                type_name: type_name.to_string(),
                span: span.clone(),
            })?;

        let parameter = Parameter::new(decl.name.as_str(), type_name, fragment).map_err(
            |source| CompileError::InvalidFragment {
                type_name: type_name.to_string(),
                span: span.clone(),
                source,
            },
        )?;

        if let Some(first) = seen.get(decl.name.as_str()) {
            return Err(CompileError::DuplicateParameter {
                name: decl.name.clone(),
                span,
                first: first.clone(),
            });
        }
        seen.insert(decl.name.as_str(), span);

        body.push_str(&format!(
            "(?P<{}>{})",
            Parameter::group_name(parameters.len()),
            parameter.embedded_fragment()
        ));
        parameters.push(parameter);
    }

    Ok((parameters, format!("^(?:{})$", body)))
}
