mod error_formatter;
mod formatter;

use anyhow::{bail, Result};
use clap::{ArgAction, Parser, Subcommand};
use formatter::Formatter;
use modus::{Answer, Engine, Retraction};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(name = "modus")]
#[command(about = "A forward-chaining knowledge base that remembers why it believes things.")]
#[command(
    long_about = "Modus loads facts and rules from .kb files, chains them forward to a fixpoint and keeps\nthe justification of every derived item, so retracting a premise withdraws exactly what\ndepended on it."
)]
#[command(version)]
struct Cli {
    /// Increase log output (-v for debug, -vv for trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a knowledge base, retract items, then answer queries
    ///
    /// Retractions are applied in the order given, before any query is answered.
    ///
    /// Examples:
    ///   modus run blocks.kb --ask "(isa ?x block)"
    ///   modus run kb/ --retract "fact: (isa cube block)" --ask "(movable ?x)"
    Run {
        /// A .kb file or a directory searched recursively for .kb files
        path: PathBuf,
        /// Item to retract (format: "fact: (...)", "rule: (...) -> (...)" or a bare statement)
        #[arg(short, long = "retract", value_name = "ITEM")]
        retractions: Vec<String>,
        /// Statement to ask; variables are written ?name
        #[arg(short, long = "ask", value_name = "QUERY")]
        queries: Vec<String>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show every stored fact and rule with its support
    Show {
        /// A .kb file or a directory searched recursively for .kb files
        path: PathBuf,
    },
    /// Show why an item is believed
    Explain {
        /// A .kb file or a directory searched recursively for .kb files
        path: PathBuf,
        /// The item to explain; a bare statement is read as a fact
        statement: String,
        /// Print the justification tree as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Run {
            path,
            retractions,
            queries,
            json,
        } => run_command(path, retractions, queries, *json),
        Commands::Show { path } => show_command(path),
        Commands::Explain {
            path,
            statement,
            json,
        } => explain_command(path, statement, *json),
    };

    if let Err(e) = result {
        if let Some(modus_err) = e.downcast_ref::<modus::ModusError>() {
            eprintln!("{}", error_formatter::format_error(modus_err));
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "modus=debug",
        _ => "modus=trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[derive(Serialize)]
struct RunOutput<'a> {
    retractions: Vec<RetractionOutput<'a>>,
    queries: Vec<QueryOutput<'a>>,
    fact_count: usize,
    rule_count: usize,
}

#[derive(Serialize)]
struct RetractionOutput<'a> {
    item: &'a str,
    #[serde(flatten)]
    retraction: Retraction,
}

#[derive(Serialize)]
struct QueryOutput<'a> {
    query: &'a str,
    answers: Vec<Answer>,
}

fn run_command(path: &Path, retractions: &[String], queries: &[String], json: bool) -> Result<()> {
    let mut engine = Engine::new();
    load_path(&mut engine, path)?;

    let mut retracted = Vec::new();
    for item in retractions {
        let retraction = engine.retract_code(item)?;
        retracted.push(RetractionOutput {
            item: item.as_str(),
            retraction,
        });
    }

    let mut answered = Vec::new();
    for query in queries {
        let answers = engine.ask_code(query)?;
        answered.push(QueryOutput {
            query: query.as_str(),
            answers,
        });
    }

    let kb = engine.knowledge_base();
    if json {
        let output = RunOutput {
            retractions: retracted,
            queries: answered,
            fact_count: kb.fact_count(),
            rule_count: kb.rule_count(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    let formatter = Formatter::default();
    for output in &retracted {
        print!(
            "{}",
            formatter.format_retraction(output.item, &output.retraction)
        );
    }
    for output in &answered {
        print!("{}", formatter.format_answers(output.query, &output.answers));
    }
    if retracted.is_empty() && answered.is_empty() {
        println!(
            "Loaded {} fact(s) and {} rule(s)",
            kb.fact_count(),
            kb.rule_count()
        );
    }

    Ok(())
}

fn show_command(path: &Path) -> Result<()> {
    let mut engine = Engine::new();
    load_path(&mut engine, path)?;

    let formatter = Formatter::default();
    print!(
        "{}",
        formatter.format_knowledge_base(engine.knowledge_base())
    );

    Ok(())
}

fn explain_command(path: &Path, statement: &str, json: bool) -> Result<()> {
    let mut engine = Engine::new();
    load_path(&mut engine, path)?;

    let Some(explanation) = engine.explain_code(statement)? else {
        bail!("'{}' is not in the knowledge base", statement);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&explanation)?);
    } else {
        let formatter = Formatter::default();
        print!("{}", formatter.format_explanation(&explanation));
    }

    Ok(())
}

/// Load a single file, or every .kb file under a directory in file name order
fn load_path(engine: &mut Engine, path: &Path) -> Result<()> {
    if path.is_file() {
        return load_file(engine, path);
    }
    if !path.is_dir() {
        bail!("'{}' does not exist", path.display());
    }

    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry?;
        if entry.path().extension().and_then(|s| s.to_str()) == Some("kb") {
            load_file(engine, entry.path())?;
        }
    }

    Ok(())
}

fn load_file(engine: &mut Engine, path: &Path) -> Result<()> {
    let source_id = path.to_string_lossy().to_string();
    let declarations = engine.add_code(&fs::read_to_string(path)?, &source_id)?;
    debug!(source = %source_id, declarations, "loaded file");
    Ok(())
}
