use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use nursery_core::config::Config;
use nursery_core::sources::SourceLoader;
use nursery_core::traits::SearchEngine;
use nursery_core::types::{EntityType, SearchFilters, SearchableItem};
use nursery_recent::{JsonFileStore, RecentSearches};
use nursery_search::SearchSession;

#[derive(Parser)]
#[command(name = "nursery", about = "Search nursery batches, tasks, locations and sales records")]
struct Cli {
    /// Directory holding config.toml and config.<env>.toml
    #[arg(long, global = true, default_value = ".")]
    config_dir: PathBuf,

    /// Directory of JSON source collections; overrides data.source_dir
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build the corpus and print item counts per type
    Index,
    /// Ranked search across every indexed type
    Search {
        query: String,
        #[arg(long = "type")]
        types: Vec<EntityType>,
        #[arg(long)]
        status: Vec<String>,
        #[arg(long)]
        site: Vec<String>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Autocomplete preview grouped by type
    Suggest {
        query: String,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show or clear recently submitted queries
    Recent {
        #[arg(long)]
        clear: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

fn open_session(cli: &Cli, config: &Config) -> anyhow::Result<SearchSession> {
    let data_dir = cli.data_dir.clone().unwrap_or_else(|| config.source_dir(&cli.config_dir));
    let sources = SourceLoader::new()
        .load_dir(&data_dir)
        .with_context(|| format!("loading sources from {}", data_dir.display()))?;
    let session = SearchSession::build(&sources, &config.index);
    debug!(items = session.len(), "corpus built");
    Ok(session)
}

fn print_item(item: &SearchableItem) {
    let mut chips = Vec::new();
    if let Some(status) = &item.status { chips.push(status.as_str()); }
    if let Some(site) = &item.site { chips.push(site.as_str()); }
    let chips = if chips.is_empty() { String::new() } else { format!(" [{}]", chips.join(", ")) };
    println!("  {:<9} {}{}", item.entity_type(), item.title, chips);
    if !item.description.is_empty() { println!("            {}", item.description); }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load_from(&cli.config_dir).context("loading configuration")?;
    let recent = RecentSearches::from_config(JsonFileStore::new(config.recent_store_path(&cli.config_dir)), &config.recent);

    match &cli.command {
        Command::Index => {
            let session = open_session(&cli, &config)?;
            for entity_type in EntityType::ALL {
                let count = session.corpus().iter().filter(|i| i.entity_type() == entity_type).count();
                if count > 0 { println!("{:<9} {}", entity_type, count); }
            }
            println!("{:<9} {}", "total", session.len());
        }
        Command::Search { query, types, status, site, json } => {
            let session = open_session(&cli, &config)?;
            let filters = SearchFilters { types: types.clone(), status: status.clone(), sites: site.clone() };
            let results = session.search(query, Some(&filters));
            recent.save(query);
            let shown = &results[..results.len().min(config.search.max_results)];
            if *json {
                println!("{}", serde_json::to_string_pretty(shown)?);
            } else {
                println!("{} results for '{}'", results.len(), query);
                for item in shown { print_item(item); }
            }
        }
        Command::Suggest { query, limit } => {
            let session = open_session(&cli, &config)?;
            let limit = limit.unwrap_or(config.search.suggestion_limit);
            for group in session.suggest(query, limit) {
                println!("{}", group.entity_type);
                for item in &group.items { print_item(item); }
            }
        }
        Command::Recent { clear } => {
            if *clear {
                recent.clear();
            } else {
                for query in recent.load() { println!("{query}"); }
            }
        }
    }
    Ok(())
}
