use std::io::Read;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use tesauro::embedding::provider_from_config;
use tesauro::{parse_file, TermSuggester, TesauroConfig};

fn usage() -> ! {
    eprintln!("Usage: tesauro [--thesaurus PATH] [--threshold T] [INPUT_FILE]");
    eprintln!("Reads input text from INPUT_FILE, or stdin when omitted.");
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::from_default_env().add_directive("tesauro=info".parse()?),
        )
        .init();

    let mut config = TesauroConfig::from_env();
    let mut input_file: Option<String> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--thesaurus" => match args.next() {
                Some(path) => config.thesaurus_path = path,
                None => usage(),
            },
            "--threshold" => match args.next().and_then(|t| t.parse().ok()) {
                Some(t) => config.default_threshold = t,
                None => usage(),
            },
            "--help" | "-h" => usage(),
            other if !other.starts_with('-') => input_file = Some(other.to_string()),
            _ => usage(),
        }
    }

    let table = parse_file(&config.thesaurus_path)
        .with_context(|| format!("failed to load thesaurus '{}'", config.thesaurus_path))?;

    let provider = provider_from_config(&config).context("failed to build embedding provider")?;
    let suggester = Arc::new(
        TermSuggester::build(table, provider)
            .await
            .context("failed to build semantic index")?,
    );

    let text = match input_file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read input '{}'", path))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let matches = suggester
        .suggest(&text, config.default_threshold)
        .await
        .context("term suggestion failed")?;

    if matches.is_empty() {
        println!("No authorized terms found.");
    } else {
        for m in &matches {
            println!("{:.3}  {}", m.score, m.term);
        }
    }

    Ok(())
}
