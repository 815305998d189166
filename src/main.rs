//! Allot CLI
//!
//! Usage:
//!   allot [OPTIONS] --template <TEMPLATE>... [REQUEST]...
//!
//! Options:
//!   -t, --template <TEMPLATE>  Command template to try (repeatable, tried in order)
//!   -T, --types <FILE>         Type registry file (TOML format)
//!   -e, --escape               Match literal template text verbatim
//!   --list-types               Print the active type registry
//!   -h, --help                 Print help

use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::Parser;

use allot::{init_tracing, Template, TypeRegistry};

#[derive(Parser)]
#[command(name = "allot")]
#[command(about = "Match request lines against typed command templates")]
struct Cli {
    /// Requests to match (reads lines from stdin if not provided)
    requests: Vec<String>,

    /// Command template, e.g. "deploy <env> <replicas:integer>"
    #[arg(short, long = "template", value_name = "TEMPLATE")]
    templates: Vec<String>,

    /// Type registry file (TOML format); replaces the basic types
    #[arg(short = 'T', long)]
    types: Option<PathBuf>,

    /// Match literal template text verbatim instead of as pattern syntax
    #[arg(short, long)]
    escape: bool,

    /// Print the active type registry and exit
    #[arg(long)]
    list_types: bool,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    // Load type registry
    let registry = match &cli.types {
        Some(path) => match TypeRegistry::from_file(path) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("Error loading types '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => TypeRegistry::basic(),
    };

    if cli.list_types {
        for (name, fragment) in registry.iter() {
            println!("{:<12} {}", name, fragment);
        }
        return;
    }

    if cli.templates.is_empty() {
        eprintln!("Error: at least one --template is required");
        std::process::exit(2);
    }

    // Compile every template up front so errors surface before any matching
    let mut templates = Vec::with_capacity(cli.templates.len());
    let mut failed = false;
    for text in &cli.templates {
        match Template::compile(text, Some(&registry), cli.escape) {
            Ok(t) => templates.push(t),
            Err(e) => {
                eprint!("{}", e.format(text, "template"));
                failed = true;
            }
        }
    }
    if failed {
        std::process::exit(1);
    }

    if !cli.requests.is_empty() {
        for request in &cli.requests {
            report(&templates, request);
        }
        return;
    }

    for line in io::stdin().lock().lines() {
        match line {
            Ok(request) => report(&templates, &request),
            Err(e) => {
                eprintln!("Error reading from stdin: {}", e);
                std::process::exit(1);
            }
        }
    }
}

/// Print the first template matching `request` with its captured values
fn report(templates: &[Template], request: &str) {
    let matched = templates
        .iter()
        .find_map(|t| t.match_request(request).ok());

    let Some(m) = matched else {
        println!("{}: no match", request);
        return;
    };

    println!("{}: {}", request, m.template());
    match m.values() {
        Ok(values) => {
            for (name, value) in values {
                println!("  {} = {}", name, value);
            }
        }
        Err(e) => eprintln!("  Error: {}", e),
    }
}
