//! Template grammar: folds the token stream into literal runs and placeholders

use crate::error::CompileError;
use crate::parser::ast::*;
use crate::parser::lexer::{lex, Token};

/// Parse template text into its parts.
///
/// Adjacent literal tokens are merged so that a document never holds two
/// literals in a row. Placeholder bodies are validated here; type names are
/// resolved later, against a registry.
pub fn parse(input: &str) -> Result<Document, CompileError> {
    let mut parts: Vec<Spanned<TemplatePart>> = Vec::new();

    for (token, span) in lex(input) {
        if let Some(text) = token.literal() {
            if let Some(Spanned {
                node: TemplatePart::Literal(buf),
                span: last,
            }) = parts.last_mut()
            {
                buf.push_str(text);
                last.end = span.end;
                continue;
            }
            parts.push(Spanned::new(TemplatePart::Literal(text.to_string()), span));
            continue;
        }

        if let Token::Placeholder(body) = token {
            let decl = parse_placeholder(body, &span)?;
            parts.push(Spanned::new(TemplatePart::Placeholder(decl), span));
        }
    }

    Ok(Document { parts })
}

fn parse_placeholder(body: &str, span: &Span) -> Result<PlaceholderDecl, CompileError> {
    let malformed = |reason: &str| CompileError::MalformedPlaceholder {
        text: body.to_string(),
        reason: reason.to_string(),
        span: span.clone(),
    };

    let (name, type_name) = match body.split_once(':') {
        Some((name, type_name)) => (name, Some(type_name)),
        None => (body, None),
    };

    if name.is_empty() {
        return Err(malformed("parameter name is empty"));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(malformed("parameter name contains whitespace"));
    }

    let mut decl = PlaceholderDecl::new(name);
    if let Some(type_name) = type_name {
        if type_name.is_empty() {
            return Err(malformed("type name is empty"));
        }
        if type_name.contains(':') {
            return Err(malformed("more than one ':' separator"));
        }
        if type_name.chars().any(char::is_whitespace) {
            return Err(malformed("type name contains whitespace"));
        }
        decl = decl.with_type(type_name);
    }

    Ok(decl)
}
