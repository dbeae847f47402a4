//! Interactive surface for scholia: open a PDF, then ask questions about it.
//!
//! Long-running loop on stdin. A bare line is a question against the open
//! document; `:open <pdf>` ingests a new one. Errors print and return to the
//! prompt, leaving the previously indexed document usable.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use scholia_core::{
    extract_text, save_upload, Config, DocumentIndex, OpenAiClient,
};

#[derive(Parser)]
#[command(name = "scholia")]
#[command(about = "Chat with a PDF: retrieval-augmented answers from its content")]
struct Cli {
    /// PDF to open at startup. Can also be opened later with `:open`.
    #[arg(value_name = "PDF")]
    pdf: Option<PathBuf>,

    /// Number of chunks retrieved per question.
    #[arg(long, value_name = "K")]
    top_k: Option<usize>,

    /// Maximum words per chunk.
    #[arg(long, value_name = "WORDS")]
    max_words: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = Config::from_env().context("configuration")?;
    if let Some(k) = cli.top_k {
        config.top_k = k;
    }
    if let Some(words) = cli.max_words {
        config.max_chunk_words = words;
    }
    let client = OpenAiClient::new(&config).context("building API client")?;

    let mut document: Option<DocumentIndex> = None;
    if let Some(path) = &cli.pdf {
        open_document(path, &config, &client, &mut document);
    }
    if document.is_none() {
        println!("No document open yet. Use :open <pdf> to get started.");
    }
    println!("Ask a question, or :open <pdf>, :help, :quit.");

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match line.split_once(char::is_whitespace) {
            Some((":open", path)) => {
                open_document(Path::new(path.trim()), &config, &client, &mut document)
            }
            _ => match line {
                ":quit" | ":q" => break,
                ":help" => print_help(),
                ":open" => println!("Usage: :open <pdf>"),
                _ if line.starts_with(':') => {
                    println!("Unknown command {line}. Try :help.")
                }
                question => ask(question, &document, &config, &client),
            },
        }
    }
    Ok(())
}

/// Ingest a PDF and replace the open document, but only on success; any
/// failure is printed and the previous document (if any) stays usable.
fn open_document(
    path: &Path,
    config: &Config,
    client: &OpenAiClient,
    document: &mut Option<DocumentIndex>,
) {
    match ingest(path, config, client) {
        Ok(doc) => {
            println!("Ready: {} chunk(s) indexed. Ask away.", doc.len());
            *document = Some(doc);
        }
        Err(e) => eprintln!("Error: {e:#}"),
    }
}

fn ingest(path: &Path, config: &Config, client: &OpenAiClient) -> anyhow::Result<DocumentIndex> {
    let stored = save_upload(path, &config.upload_dir).context("storing upload")?;
    println!("Extracting text from {}...", stored.display());
    let text = extract_text(&stored)?;
    println!("Embedding and indexing...");
    let doc = DocumentIndex::build(&text, client, config.max_chunk_words, config.embedding_dim)?;
    Ok(doc)
}

fn ask(question: &str, document: &Option<DocumentIndex>, config: &Config, client: &OpenAiClient) {
    let Some(doc) = document else {
        println!("No document open. Use :open <pdf> first.");
        return;
    };
    println!("Thinking...");
    match doc.ask(question, client, client, config.top_k) {
        Ok(answer) => println!("\n{answer}\n"),
        Err(e) => eprintln!("Error: {e}"),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  :open <pdf>   upload and index a PDF (replaces the open document)");
    println!("  :help         show this help");
    println!("  :quit         exit");
    println!("Anything else is a question about the open document.");
}
