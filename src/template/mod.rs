//! Compiled command templates
//!
//! A template such as `deploy <env> <replicas:integer>` is compiled once into
//! a [`Template`], which can then be tested against any number of request
//! lines. A successful test yields a [`Match`] from which each placeholder's
//! value is read by name or position.
//!
//! # Example
//!
//! ```rust
//! use allot::Template;
//!
//! let template = Template::compile("deploy <env> <replicas:integer>", None, false).unwrap();
//! let m = template.match_request("deploy staging 3").unwrap();
//!
//! assert_eq!(m.value("env").unwrap(), "staging");
//! assert_eq!(m.as_integer("replicas").unwrap(), 3);
//! ```

mod command;
mod compiler;
mod matched;
mod parameter;

pub use command::Template;
pub use compiler::compile;
pub use matched::Match;
pub use parameter::Parameter;
