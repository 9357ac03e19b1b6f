use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use markdown_content_config::{Config, SearchSettings};
use markdown_content_engine::{
    CompareOptions, Content, Locale, RenderFormat, SearchOptions, SearchResult, read_content,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "mdcontent",
    version,
    about = "Render and search Markdown documents"
)]
struct Cli {
    /// Config file (defaults to ~/.config/markdown-content/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a document as markup, plain text or HTML
    Render(RenderArgs),

    /// Search a document's plain text
    Search(SearchArgs),
}

#[derive(clap::Args)]
struct RenderArgs {
    /// Markdown file to render
    file: PathBuf,

    /// Output format: markup, plain-text or html
    #[arg(short, long)]
    format: Option<RenderFormat>,

    /// Render only the blocks nested inside containers (quotes, lists)
    #[arg(long)]
    children: bool,
}

#[derive(clap::Args)]
struct SearchArgs {
    /// Markdown file to search
    file: PathBuf,

    /// Text to find
    query: String,

    /// Match letter case exactly
    #[arg(long)]
    case_sensitive: bool,

    /// Treat accented and unaccented letters as equal
    #[arg(long)]
    ignore_diacritics: bool,

    /// Locale tag used for case folding, e.g. tr-TR
    #[arg(long)]
    locale: Option<String>,

    /// Characters of context around each match
    #[arg(long)]
    context: Option<usize>,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Render(args) => {
            let format = args.format.unwrap_or(config.render.format);
            let content = read_content(&args.file)
                .with_context(|| format!("Failed to load {}", args.file.display()))?;
            if let Some(output) = render(&content, format, args.children) {
                print!("{output}");
                if !output.ends_with('\n') {
                    println!();
                }
            } else {
                log::info!("{} has no nested blocks", args.file.display());
            }
        }
        Command::Search(args) => {
            let content = read_content(&args.file)
                .with_context(|| format!("Failed to load {}", args.file.display()))?;
            let options = search_options(&args, &config.search);
            let results = content.search_with(&args.query, &options);
            log::debug!("{} results for {:?}", results.len(), args.query);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                print!("{}", format_results(&results));
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config_path = path.map(Path::to_path_buf).unwrap_or_else(Config::config_path);
    log::debug!("Config path: {}", config_path.display());
    let config = Config::load_from_path(&config_path)?;
    if config.is_none() && path.is_some() {
        log::warn!(
            "Config file {} not found, using defaults",
            config_path.display()
        );
    }
    Ok(config.unwrap_or_default())
}

/// Renders the document, or its nested blocks when `children` is set.
/// Returns `None` when `children` is set and nothing is nested.
fn render(content: &Content, format: RenderFormat, children: bool) -> Option<String> {
    if children {
        content
            .child_content()
            .map(|nested| nested.render(format))
    } else {
        Some(content.render(format))
    }
}

/// Command-line flags win over config values.
fn search_options(args: &SearchArgs, settings: &SearchSettings) -> SearchOptions {
    let compare = CompareOptions {
        case_insensitive: !(args.case_sensitive || settings.case_sensitive),
        diacritic_insensitive: args.ignore_diacritics || settings.diacritic_insensitive,
    };
    let mut options = SearchOptions::default()
        .with_compare(compare)
        .with_context_length(args.context.unwrap_or(settings.context_length));
    options.locale = args
        .locale
        .as_deref()
        .or(settings.locale.as_deref())
        .map(Locale::from);
    options
}

fn format_results(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|result| {
            format!(
                "block {} [{}..{}]: {}\n",
                result.block_index,
                result.match_range.start,
                result.match_range.end,
                result.snippet.replace('\n', " ")
            )
        })
        .collect()
}
