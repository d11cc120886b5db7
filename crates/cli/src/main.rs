use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::LevelFilter;
use serde::Serialize;

use confdiff_chunker::ChunkerConfig;
use confdiff_compare::{compare, ComparisonReport};
use confdiff_index::LexicalIndex;

use crate::config::AppConfig;
use crate::input::{read_text, read_text_capped};
use crate::prompt::{
    build_general_messages, build_messages, wants_comparison, ChatMessage, NO_SNIPPETS_PLACEHOLDER,
};
use crate::report::render_comparison;

mod config;
mod input;
mod prompt;
mod report;

#[derive(Parser)]
#[command(name = "confdiff")]
#[command(about = "Lexical retrieval and structural diff over pre/post configuration snapshots", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(long, global = true, default_value = "confdiff.toml")]
    config: PathBuf,

    /// Path to the pre snapshot (overrides config)
    #[arg(long, global = true)]
    pre: Option<PathBuf>,

    /// Path to the post snapshot (overrides config)
    #[arg(long, global = true)]
    post: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for output)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Retrieve the most relevant chunks for a query
    Search {
        /// Natural-language or keyword query
        query: String,

        /// Number of chunks to return
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Emit the retrieval payload as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare the two snapshots structurally
    Compare {
        /// Include positional leaf value differences (extended report)
        #[arg(long)]
        values: bool,

        /// Render the three-section text summary instead of JSON
        #[arg(long)]
        text: bool,
    },

    /// Assemble chat messages for a downstream completion endpoint
    Prompt {
        /// Natural-language question about the snapshots
        query: String,

        /// Number of chunks to retrieve for context
        #[arg(short = 'k', long)]
        top_k: Option<usize>,

        /// Skip retrieval and embed both full documents (capped)
        #[arg(long)]
        full: bool,

        /// Skip grounding entirely and build the general-fallback messages
        #[arg(long, conflicts_with_all = ["full", "top_k"])]
        general: bool,
    },
}

/// Prompt command output: messages ready for an OpenAI-compatible endpoint,
/// plus the snippet ids used and any locally computed comparison grounding.
#[derive(Serialize)]
struct PromptOutput {
    messages: Vec<ChatMessage>,
    snippets: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comparison: Option<ComparisonReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comparison_error: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else if cli.quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let mut config = AppConfig::load(&cli.config)?;
    if let Some(pre) = cli.pre {
        config.pre_path = pre;
    }
    if let Some(post) = cli.post {
        config.post_path = post;
    }

    match cli.command {
        Commands::Search { query, top_k, json } => {
            run_search(&config, &query, top_k.unwrap_or(config.max_snippets), json)
        }
        Commands::Compare { values, text } => run_compare(&config, values, text),
        Commands::Prompt {
            query,
            top_k,
            full,
            general,
        } => {
            if general {
                run_general_prompt(&query)
            } else {
                run_prompt(&config, &query, top_k.unwrap_or(config.max_snippets), full)
            }
        }
    }
}

fn build_index(config: &AppConfig) -> Result<LexicalIndex> {
    let chunker = ChunkerConfig {
        max_chars_per_chunk: config.max_chars_per_chunk,
    };
    chunker.validate()?;
    let pre_text = read_text(&config.pre_path)?;
    let post_text = read_text(&config.post_path)?;
    Ok(LexicalIndex::build(&pre_text, &post_text, &chunker))
}

fn run_search(config: &AppConfig, query: &str, k: usize, json: bool) -> Result<()> {
    let index = build_index(config)?;
    let retrieved = index.retrieve(query, k);

    if json {
        println!("{}", serde_json::to_string_pretty(&retrieved)?);
    } else if retrieved.is_empty() {
        println!("{NO_SNIPPETS_PLACEHOLDER}");
    } else {
        println!("{}", retrieved.formatted);
    }
    Ok(())
}

fn run_compare(config: &AppConfig, values: bool, text: bool) -> Result<()> {
    let pre_text = read_text_capped(&config.pre_path, config.max_full_context_chars)?;
    let post_text = read_text_capped(&config.post_path, config.max_full_context_chars)?;
    let report = compare(&pre_text, &post_text, values)
        .context("comparing pre and post snapshots")?;

    if text {
        print!("{}", render_comparison(&report));
    } else {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }
    Ok(())
}

fn run_general_prompt(query: &str) -> Result<()> {
    let output = PromptOutput {
        messages: build_general_messages(query),
        snippets: Vec::new(),
        comparison: None,
        comparison_error: None,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run_prompt(config: &AppConfig, query: &str, k: usize, full: bool) -> Result<()> {
    let (context, snippets) = if full {
        let pre_text = read_text_capped(&config.pre_path, config.max_full_context_chars)?;
        let post_text = read_text_capped(&config.post_path, config.max_full_context_chars)?;
        (
            format!("[PRE.xml]\n{pre_text}\n\n[POST.xml]\n{post_text}"),
            Vec::new(),
        )
    } else {
        let index = build_index(config)?;
        let retrieved = index.retrieve(query, k);
        let context = if retrieved.is_empty() {
            NO_SNIPPETS_PLACEHOLDER.to_string()
        } else {
            retrieved.formatted
        };
        (context, retrieved.ids)
    };

    let mut output = PromptOutput {
        messages: build_messages(&context, query),
        snippets,
        comparison: None,
        comparison_error: None,
    };

    // Comparison questions get locally computed structured grounding, so the
    // model never has to diff the trees itself.
    if wants_comparison(query) {
        let pre_text = read_text_capped(&config.pre_path, config.max_full_context_chars)?;
        let post_text = read_text_capped(&config.post_path, config.max_full_context_chars)?;
        match compare(&pre_text, &post_text, false) {
            Ok(report) => output.comparison = Some(report),
            Err(err) => {
                log::warn!("comparison skipped: {err}");
                output.comparison_error = Some(err.to_string());
            }
        }
    }

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
