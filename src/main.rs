// Clita: tokenizer and parser driver

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser as CliParser;
use crossterm::style::Stylize;

use clita::{parse_with_config, Lexer, ParserConfig, Production, SourceLocation};

const DEMO_SOURCE: &str = "20 + 5";

#[derive(CliParser)]
#[command(name = "clita")]
#[command(about = "Tokenize and parse Clita source")]
struct Cli {
    /// Source text to parse (defaults to a demo expression)
    source: Option<String>,

    /// Read the source from a file instead
    #[arg(short, long, conflicts_with = "source")]
    file: Option<PathBuf>,

    /// Grammar production to start parsing from
    #[arg(short, long, default_value = "binary_expr", value_parser = parse_production)]
    entry: Production,

    /// Print the token stream instead of parsing
    #[arg(long)]
    tokens: bool,

    /// Reserve WORD as a keyword (repeatable)
    #[arg(short = 'k', long = "keyword", value_name = "WORD")]
    keywords: Vec<String>,
}

fn parse_production(name: &str) -> Result<Production, String> {
    Production::from_name(name).ok_or_else(|| {
        let names: Vec<&str> = Production::ALL.iter().map(|p| p.name()).collect();
        format!("unknown production '{}' (one of: {})", name, names.join(", "))
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let (source, origin) = match &cli.file {
        Some(path) => (fs::read_to_string(path)?, path.display().to_string()),
        None => (
            cli.source.clone().unwrap_or_else(|| DEMO_SOURCE.to_string()),
            "<input>".to_string(),
        ),
    };
    let config = ParserConfig::new().with_reserved_words(cli.keywords);

    if cli.tokens {
        for token in Lexer::with_config(&source, &config) {
            match token {
                Ok(token) => println!("{}", token),
                Err(e) => {
                    report(&origin, &source, e.position(), &e.to_string());
                    process::exit(1);
                }
            }
        }
        return Ok(());
    }

    eprintln!("Parsing {} from {}...", origin, cli.entry);
    match parse_with_config(&source, cli.entry, &config) {
        Ok(node) => println!("<{:?}>:: {}", node.kind(), node),
        Err(e) => {
            report(&origin, &source, e.position(), &e.to_string());
            process::exit(1);
        }
    }

    Ok(())
}

/// Print an error with the offending line and a caret under its column.
fn report(origin: &str, source: &str, offset: usize, message: &str) {
    let loc = SourceLocation::locate(source, offset);
    eprintln!("{} {}", "error:".red().bold(), message);
    eprintln!("  {} {}:{}:{}", "-->".blue(), origin, loc.line, loc.column);

    if let Some(line) = source.lines().nth(loc.line - 1) {
        eprintln!("   {}", line);
        eprintln!("   {}{}", " ".repeat(loc.column - 1), "^".red().bold());
    }
}
