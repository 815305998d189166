//! Allot - typed command templates
//!
//! This library compiles command templates made of literal text and typed
//! placeholders (`<name>` or `<name:type>`) into matchers that recognize
//! request lines and pull out each placeholder's value.
//!
//! # Example
//!
//! ```rust
//! use allot::compile;
//!
//! let template = compile("command <lorem:integer> <ipsum:string>", None).unwrap();
//! assert!(template.matches("command 12345 abcdef"));
//! assert!(!template.matches("command abc abcdef"));
//!
//! let m = template.match_request("command 12345 abcdef").unwrap();
//! assert_eq!(m.as_integer("lorem").unwrap(), 12345);
//! assert_eq!(m.value("ipsum").unwrap(), "abcdef");
//! ```
//!
//! Placeholder types resolve through a [`TypeRegistry`]. The basic registry
//! knows `string` (a run of non-whitespace, also used when no type is
//! written) and `integer` (a run of digits); callers can supply their own.
//!
//! Type fragments are trusted input. Matching is linear in the request
//! length, but an oversized fragment can exceed the pattern size limit and
//! fail compilation.

use std::sync::Once;

pub mod error;
pub mod parser;
pub mod template;
pub mod types;

pub use error::{CompileError, MatchError};
pub use template::{Match, Parameter, Template};
pub use types::{TypeRegistry, TypeRegistryError};

/// Compile a template whose literal text is raw pattern syntax.
///
/// Uses [`TypeRegistry::basic`] when `registry` is `None`.
pub fn compile(text: &str, registry: Option<&TypeRegistry>) -> Result<Template, CompileError> {
    template::compile(text, registry, false)
}

/// Compile a template whose literal text matches verbatim.
///
/// # Example
///
/// ```rust
/// use allot::compile_escaped;
///
/// let template = compile_escaped("[command] (<lorem>)", None).unwrap();
/// assert!(template.matches("[command] (example)"));
/// assert!(!template.matches("command"));
/// ```
pub fn compile_escaped(
    text: &str,
    registry: Option<&TypeRegistry>,
) -> Result<Template, CompileError> {
    template::compile(text, registry, true)
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=allot=debug` or
/// `RUST_LOG=allot=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
                .with(filter)
                .init();
        }
    });
}
