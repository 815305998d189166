//! Syntax tree types for command templates

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// AST node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

/// A parsed template is a sequence of literal runs and placeholders
#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    /// Literal text, matched as-is (or as raw pattern syntax when escaping is off)
    Literal(String),
    /// A `<name>` or `<name:type>` placeholder
    Placeholder(PlaceholderDecl),
}

/// A placeholder as written in the template, before type resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderDecl {
    pub name: String,
    /// Explicit type name; `None` when written as `<name>`
    pub type_name: Option<String>,
}

impl PlaceholderDecl {
    /// Type the placeholder resolves through when none is written
    pub const DEFAULT_TYPE: &'static str = "string";

    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: None,
        }
    }

    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// The declared type name, or `string` when omitted
    pub fn effective_type(&self) -> &str {
        self.type_name.as_deref().unwrap_or(Self::DEFAULT_TYPE)
    }
}

/// Parsed template text
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document {
    pub parts: Vec<Spanned<TemplatePart>>,
}

impl Document {
    /// Placeholders in left-to-right order
    pub fn placeholders(&self) -> impl Iterator<Item = Spanned<&PlaceholderDecl>> {
        self.parts.iter().filter_map(|part| match &part.node {
            TemplatePart::Placeholder(decl) => Some(Spanned::new(decl, part.span.clone())),
            TemplatePart::Literal(_) => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_type_defaults_to_string() {
        assert_eq!(PlaceholderDecl::new("lorem").effective_type(), "string");
        assert_eq!(
            PlaceholderDecl::new("lorem")
                .with_type("integer")
                .effective_type(),
            "integer"
        );
    }

    #[test]
    fn test_document_placeholders_in_order() {
        let doc = Document {
            parts: vec![
                Spanned::new(TemplatePart::Literal("cmd ".into()), 0..4),
                Spanned::new(TemplatePart::Placeholder(PlaceholderDecl::new("a")), 4..7),
                Spanned::new(TemplatePart::Literal(" ".into()), 7..8),
                Spanned::new(TemplatePart::Placeholder(PlaceholderDecl::new("b")), 8..11),
            ],
        };
        let names: Vec<_> = doc.placeholders().map(|p| p.node.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
        let spans: Vec<_> = doc.placeholders().map(|p| p.span).collect();
        assert_eq!(spans, vec![4..7, 8..11]);
    }
}
