//! FillFlux CLI
//!
//! CLI tool for trying out URL patterns and selectors outside the browser.
//! Selector commands run against saved HTML pages. Shadow roots are read from
//! `<template shadowrootmode="open">` elements.

use std::fs;

use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::{json, Value};
use tracing_subscriber::EnvFilter;

use ff_core::dom::DomElement;
use ff_core::memory::{Document, ElementRef};
use ff_core::{
    compute_selector, compute_selector_with_strategy, matches, normalize, read_value, resolve,
    resolve_all, score_selector, to_pattern, validate_pattern,
};

#[derive(Parser)]
#[command(name = "ff-cli")]
#[command(about = "FillFlux selector and URL pattern tools")]
struct Cli {
    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Debug logging on stderr (`RUST_LOG` overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generalize URLs into patterns
    Pattern {
        /// URLs to generalize
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Test a URL against a pattern
    Match {
        pattern: String,
        url: String,
    },

    /// Show the origin and path of a URL
    Normalize {
        url: String,
    },

    /// Check that a pattern parses
    Validate {
        pattern: String,
    },

    /// Score a selector's robustness
    Score {
        selector: String,
    },

    /// Compute selectors for elements of an HTML page
    Select {
        /// HTML page
        #[arg(short, long)]
        dom: String,

        /// Only elements matching this selector (default: every element)
        #[arg(short, long)]
        target: Option<String>,
    },

    /// Resolve a selector against an HTML page
    Resolve {
        /// HTML page
        #[arg(short, long)]
        dom: String,

        selector: String,

        /// Print every match, not just the first
        #[arg(long)]
        all: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let json = cli.json;
    let result = match cli.command {
        Commands::Pattern { urls } => cmd_pattern(&urls, json),
        Commands::Match { pattern, url } => cmd_match(&pattern, &url, json),
        Commands::Normalize { url } => cmd_normalize(&url, json),
        Commands::Validate { pattern } => cmd_validate(&pattern, json),
        Commands::Score { selector } => cmd_score(&selector, json),
        Commands::Select { dom, target } => cmd_select(&dom, target.as_deref(), json),
        Commands::Resolve { dom, selector, all } => cmd_resolve(&dom, &selector, all, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// `log` records from ff-core go through `tracing`. `--verbose` shows
/// `debug`; otherwise `RUST_LOG` or warnings only.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to encode JSON: {}", e))?;
    println!("{text}");
    Ok(())
}

fn load_dom(path: &str) -> Result<Document, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path, e))?;
    log::debug!("parsing {} ({} bytes)", path, content.len());
    Ok(Document::parse(&content))
}

fn cmd_pattern(urls: &[String], json: bool) -> Result<(), String> {
    let patterns: Vec<(String, String)> = urls
        .iter()
        .map(|url| (url.clone(), to_pattern(url)))
        .collect();

    if json {
        let out: Vec<Value> = patterns
            .iter()
            .map(|(url, pattern)| json!({ "url": url, "pattern": pattern }))
            .collect();
        return print_json(&out);
    }

    for (_, pattern) in &patterns {
        println!("{pattern}");
    }
    Ok(())
}

fn cmd_match(pattern: &str, url: &str, json: bool) -> Result<(), String> {
    let matched = matches(pattern, url);
    if json {
        return print_json(&json!({ "pattern": pattern, "url": url, "matches": matched }));
    }
    println!("{}", if matched { "match" } else { "no match" });
    Ok(())
}

fn cmd_normalize(url: &str, json: bool) -> Result<(), String> {
    let normalized = normalize(url);
    if json {
        return print_json(&json!({ "origin": normalized.origin, "path": normalized.path }));
    }
    if normalized.is_empty() {
        return Err(format!("Could not parse '{}' as a URL", url));
    }
    println!("Origin:  {}", normalized.origin);
    println!("Path:    {}", normalized.path);
    Ok(())
}

fn cmd_validate(pattern: &str, json: bool) -> Result<(), String> {
    let validation = validate_pattern(pattern);
    if json {
        return print_json(&json!({ "isValid": validation.is_valid, "error": validation.error }));
    }
    match validation.error {
        None => {
            println!("Pattern '{}' is valid", pattern);
            Ok(())
        }
        Some(error) => Err(error),
    }
}

fn cmd_score(selector: &str, json: bool) -> Result<(), String> {
    let robustness = score_selector(selector);
    if json {
        return print_json(&json!({
            "score": robustness.score,
            "issues": robustness.issues,
            "isRobust": robustness.is_robust,
        }));
    }
    println!("Selector:  {}", selector);
    println!("Score:     {}/100", robustness.score);
    println!("Robust:    {}", if robustness.is_robust { "yes" } else { "no" });
    for issue in &robustness.issues {
        println!("  - {issue}");
    }
    Ok(())
}

/// One line of `select` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SelectorRow {
    tag: String,
    selector: String,
    strategy: &'static str,
    round_trips: bool,
}

/// Selectors for `target` matches (every element when `None`), each checked
/// by resolving it back.
fn selector_rows(doc: &Document, target: Option<&str>) -> Vec<SelectorRow> {
    let scope = doc.scope();
    let elements: Vec<ElementRef<'_>> = match target {
        Some(selector) => resolve_all(selector, &scope),
        None => doc.all_elements(),
    };

    elements
        .iter()
        .filter_map(|element| {
            let computed = compute_selector_with_strategy(element)?;
            let round_trips = resolve(&computed.selector, &scope).as_ref() == Some(element);
            Some(SelectorRow {
                tag: element.tag_name().to_lowercase(),
                selector: computed.selector,
                strategy: computed.strategy.as_str(),
                round_trips,
            })
        })
        .collect()
}

fn cmd_select(dom: &str, target: Option<&str>, json: bool) -> Result<(), String> {
    let doc = load_dom(dom)?;
    let rows = selector_rows(&doc, target);
    if rows.is_empty() {
        return Err("No elements to select".to_string());
    }

    if json {
        return print_json(&rows);
    }

    for row in &rows {
        let marker = if row.round_trips { "ok" } else { "AMBIGUOUS" };
        println!("{:<10} {:<10} {:<9} {}", row.tag, row.strategy, marker, row.selector);
    }
    Ok(())
}

fn cmd_resolve(dom: &str, selector: &str, all: bool, json: bool) -> Result<(), String> {
    let doc = load_dom(dom)?;
    let scope = doc.scope();

    let found: Vec<ElementRef<'_>> = if all {
        resolve_all(selector, &scope)
    } else {
        resolve(selector, &scope).into_iter().collect()
    };

    if json {
        let out: Vec<Value> = found
            .iter()
            .map(|element| {
                json!({
                    "tag": element.tag_name().to_lowercase(),
                    "selector": compute_selector(element),
                    "value": read_value(element),
                })
            })
            .collect();
        return print_json(&out);
    }

    if found.is_empty() {
        return Err(format!("No element matches '{}'", selector));
    }
    for element in &found {
        println!(
            "{:<10} {:<40} {}",
            element.tag_name().to_lowercase(),
            compute_selector(element).unwrap_or_default(),
            read_value(element).unwrap_or_default()
        );
    }
    Ok(())
}
