//! `tagbundle` CLI — inspect how JSON event parameters convert to typed
//! bundles before they reach an analytics backend.
//!
//! ## Usage
//!
//! ```sh
//! # Convert JSON params to a typed listing (stdin → stdout)
//! echo '{"currency":"AUD","value":29.98}' | tagbundle convert
//!
//! # Convert from file to file
//! tagbundle convert -i params.json -o params.txt
//!
//! # Simulate the bridge path for a named event (lenient: bad JSON
//! # degrades to an empty parameter list instead of failing)
//! tagbundle event --name purchase -i params.json
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fmt::Write as _;
use std::io::{self, Read};
use tagbundle_core::{Bundle, BundleValue};

#[derive(Parser)]
#[command(
    name = "tagbundle",
    version,
    about = "JSON → typed analytics bundle inspector"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert JSON params and print the typed bundle (strict: invalid
    /// JSON or a non-object top level is an error)
    Convert {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Simulate logEvent: print what the analytics sink would receive
    Event {
        /// Event name
        #[arg(short, long)]
        name: String,
        /// Input file with JSON params (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert { input, output } => {
            let json = read_input(input.as_deref())?;
            let bundle = tagbundle_core::try_bundle_from_json(&json)
                .context("Failed to convert JSON params")?;
            write_output(output.as_deref(), &render_bundle(&bundle))?;
        }
        Commands::Event { name, input } => {
            let json = read_input(input.as_deref())?;
            // The bridge path never fails: warn and emit an empty bundle.
            let bundle = match tagbundle_core::try_bundle_from_json(&json) {
                Ok(bundle) => bundle,
                Err(err) => {
                    eprintln!("warning: {err}; forwarding empty params");
                    Bundle::new()
                }
            };
            println!("event: {name}");
            if bundle.is_empty() {
                println!("params: (none)");
            } else {
                println!("params:");
                print!("{}", indent(&render_bundle(&bundle), 1));
            }
        }
    }

    Ok(())
}

/// Render a bundle as an indented, type-annotated listing:
///
/// ```text
/// currency: string = AUD
/// value: double = 29.98
/// items: bundle[2]
///   [0]
///     item_id: string = SKU_1
/// ```
fn render_bundle(bundle: &Bundle) -> String {
    let mut out = String::new();
    render_into(bundle, 0, &mut out);
    out
}

fn render_into(bundle: &Bundle, depth: usize, out: &mut String) {
    let pad = "  ".repeat(depth);
    for (key, value) in bundle.iter() {
        match value {
            BundleValue::Bundle(inner) => {
                let _ = writeln!(out, "{pad}{key}: bundle");
                render_into(inner, depth + 1, out);
            }
            BundleValue::BundleArray(items) => {
                let _ = writeln!(out, "{pad}{key}: bundle[{}]", items.len());
                for (i, item) in items.iter().enumerate() {
                    let _ = writeln!(out, "{pad}  [{i}]");
                    render_into(item, depth + 2, out);
                }
            }
            scalar_or_array => {
                let _ = writeln!(
                    out,
                    "{pad}{key}: {} = {}",
                    scalar_or_array.type_name(),
                    render_value(scalar_or_array)
                );
            }
        }
    }
}

/// Render a scalar or primitive-array value on one line.
fn render_value(value: &BundleValue) -> String {
    fn list<T: std::fmt::Display>(xs: &[T]) -> String {
        let parts: Vec<String> = xs.iter().map(|x| x.to_string()).collect();
        format!("[{}]", parts.join(", "))
    }

    match value {
        BundleValue::String(s) => s.clone(),
        BundleValue::Int(i) => i.to_string(),
        BundleValue::Long(l) => l.to_string(),
        BundleValue::Double(d) => d.to_string(),
        BundleValue::Bool(b) => b.to_string(),
        BundleValue::StringArray(xs) => list(xs),
        BundleValue::IntArray(xs) => list(xs),
        BundleValue::LongArray(xs) => list(xs),
        BundleValue::DoubleArray(xs) => list(xs),
        BundleValue::BoolArray(xs) => list(xs),
        // Handled by render_into.
        BundleValue::Bundle(_) | BundleValue::BundleArray(_) => String::new(),
    }
}

/// Indent every line of `text` by `levels` two-space steps.
fn indent(text: &str, levels: usize) -> String {
    let pad = "  ".repeat(levels);
    text.lines()
        .map(|line| format!("{pad}{line}\n"))
        .collect()
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
