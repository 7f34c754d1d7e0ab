//! Mineral Museum - specimen catalog browser
//!
//! CLI commands:
//! - gui: Browse the catalog in the native viewer (default)
//! - list: Print the filtered catalog page by page
//! - categories: Print the category/subcategory tree
//! - show: Print one specimen's details and gallery

mod card;
mod catalog;
mod config;
mod filter;
mod gallery;
mod gui;
mod logging;
mod modal;
mod nav;
mod pager;
mod state;
mod taxonomy;

#[cfg(test)]
mod fixtures;

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

use crate::card::Card;
use crate::catalog::{CatalogSource, SpecimenSize};
use crate::filter::{FilterInputs, FilterState, Selection};
use crate::state::MuseumState;

#[derive(Parser)]
#[command(name = "mineral_museum")]
#[command(about = "Browse a mineral specimen catalog")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to museum.yaml config
    #[arg(short, long, default_value = "museum.yaml")]
    config: PathBuf,

    /// Catalog path or URL (overrides config and .env)
    #[arg(long)]
    catalog: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch native GUI viewer
    Gui,

    /// List specimens matching the given filters
    List(ListArgs),

    /// List categories and their subcategories
    Categories,

    /// Show one specimen by name
    Show {
        /// Specimen name (case-insensitive)
        name: String,
    },
}

#[derive(Args, Default)]
struct ListArgs {
    #[arg(long)]
    category: Option<String>,

    /// Requires --category
    #[arg(long)]
    subcategory: Option<String>,

    /// Case-insensitive name search
    #[arg(short, long, default_value = "")]
    query: String,

    #[arg(long)]
    locality: Option<String>,

    /// Micromount, Thumbnail, Miniature, "Small Cabinet" or Cabinet
    #[arg(long)]
    size: Option<SpecimenSize>,

    #[arg(long)]
    weight_min: Option<String>,

    #[arg(long)]
    weight_max: Option<String>,

    #[arg(long)]
    price_min: Option<String>,

    #[arg(long)]
    price_max: Option<String>,

    /// Crystal system (exact, case-insensitive)
    #[arg(long)]
    system: Option<String>,

    /// Page to print (1-based)
    #[arg(long, default_value = "1")]
    page: usize,
}

impl ListArgs {
    fn selection(&self) -> anyhow::Result<Selection> {
        Ok(match (&self.category, &self.subcategory) {
            (None, None) => Selection::All,
            (Some(category), None) => Selection::Category(category.clone()),
            (Some(category), Some(subcategory)) => Selection::Subcategory {
                category: category.clone(),
                subcategory: subcategory.clone(),
            },
            (None, Some(_)) => anyhow::bail!("--subcategory needs --category"),
        })
    }

    fn inputs(&self) -> FilterInputs {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        FilterInputs {
            locality: text(&self.locality),
            size: self.size,
            weight_min: text(&self.weight_min),
            weight_max: text(&self.weight_max),
            price_min: text(&self.price_min),
            price_max: text(&self.price_max),
            system: text(&self.system),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load config
    let config_found = cli.config.exists();
    let mut config = if config_found {
        config::Config::load(&cli.config)?
    } else {
        config::Config::default()
    };
    config.apply(&config::EnvOverrides::load());
    if let Some(catalog) = cli.catalog {
        config.catalog = catalog;
    }

    let _log_guard = logging::init_logging(Path::new(&config.log_dir))?;
    tracing::info!("Mineral Museum starting up");
    if config_found {
        tracing::info!("Config loaded from {:?}", cli.config);
    } else {
        tracing::warn!("Config file not found: {:?}, using defaults", cli.config);
    }

    // The only await: everything after works on the loaded catalog
    let source = config.catalog_source();
    let specimens = catalog::load_or_empty(&source).await;
    let state = MuseumState::new(specimens, config.page_size).with_source(source.clone());
    if state.taxonomy().is_empty() {
        tracing::warn!("Catalog is empty, nothing to browse");
    }
    tracing::info!(
        "Catalog ready: {} specimens in {} categories",
        state.specimens().len(),
        state.taxonomy().len()
    );

    match cli.command.unwrap_or(Commands::Gui) {
        Commands::Gui => {
            tracing::info!("Launching native GUI viewer");
            gui::run_viewer(&config, state)?;
        }

        Commands::List(args) => {
            list_specimens(state, &args)?;
        }

        Commands::Categories => {
            list_categories(&state);
        }

        Commands::Show { name } => {
            show_specimen(&state, &source, &name)?;
        }
    }

    Ok(())
}

/// Print one page of the filtered catalog
fn list_specimens(mut state: MuseumState, args: &ListArgs) -> anyhow::Result<()> {
    let selection = args.selection()?;
    if !state.select(selection.clone()) {
        anyhow::bail!("No such category in catalog: {:?}", selection);
    }
    state.set_query(args.query.clone());
    state.set_inputs(args.inputs());

    let page = args.page.max(1);
    while state.pager().page() < page && state.load_more() > 0 {}
    if state.pager().page() < page {
        println!("Only {} page(s) match", state.pager().page());
        return Ok(());
    }

    let start = (page - 1) * state.pager().page_size();
    let shown = &state.grid()[start.min(state.grid().len())..];

    println!("Specimens ({} matching):", state.filtered_count());
    println!();
    for card in shown {
        let taxon = match &card.subcategory {
            Some(sub) => format!("{} / {}", card.category, sub),
            None => card.category.clone(),
        };
        println!("  - {} [{}] {}", card.name, taxon, card.locality);
    }
    println!();
    println!("Page {} ({} of {} shown)", page, state.grid().len(), state.filtered_count());
    if state.has_more() {
        println!("More available: --page {}", page + 1);
    }
    Ok(())
}

/// Print the taxonomy tree with specimen counts
fn list_categories(state: &MuseumState) {
    let count = |selection: &Selection| {
        let filter = FilterState { selection: selection.clone(), ..Default::default() };
        filter::evaluate(state.specimens(), &filter).len()
    };

    for entry in state.nav().entries() {
        let indent = "  ".repeat(entry.depth as usize);
        println!("{}{} ({})", indent, entry.label, count(&entry.selection));
    }
}

/// Print a specimen's detail and gallery
fn show_specimen(state: &MuseumState, source: &CatalogSource, name: &str) -> anyhow::Result<()> {
    let wanted = name.to_lowercase();
    let (index, specimen) = state
        .specimens()
        .iter()
        .enumerate()
        .find(|(_, s)| s.name.to_lowercase() == wanted)
        .ok_or_else(|| anyhow::anyhow!("Specimen not found: {}", name))?;

    let card = Card::new(index, specimen, Some(source));
    println!("## {}", card.name);
    println!("  Category:       {}", card.category);
    if let Some(sub) = &card.subcategory {
        println!("  Subcategory:    {}", sub);
    }
    println!("  Locality:       {}", card.locality);
    println!("  Dimensions:     {}", card.dimensions);
    println!("  Size:           {}", card.size);
    println!("  Weight:         {}", card.weight);
    println!("  Price:          {}", card.price);
    println!("  Crystal system: {}", card.system);
    println!("  Self-collected: {}", card.self_collected);
    if !card.description.is_empty() {
        println!();
        println!("  {}", card.description);
    }
    println!();
    println!("Gallery ({} images):", card.gallery.len());
    for (i, image) in card.gallery.iter().enumerate() {
        println!("  [{}] {}", i + 1, image);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_args_selection() {
        let args = ListArgs { category: Some("Quartz".into()), ..Default::default() };
        assert_eq!(args.selection().unwrap(), Selection::Category("Quartz".into()));

        let args = ListArgs { subcategory: Some("Amethyst".into()), ..Default::default() };
        assert!(args.selection().is_err());
    }

    #[test]
    fn test_list_args_inputs() {
        let args = ListArgs {
            price_max: Some("10".into()),
            size: Some(SpecimenSize::Thumbnail),
            ..Default::default()
        };
        let inputs = args.inputs();
        assert_eq!(inputs.price_max, "10");
        assert_eq!(inputs.size, Some(SpecimenSize::Thumbnail));
        assert_eq!(inputs.locality, "");
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "mineral_museum", "list", "--category", "Quartz", "--size", "Small Cabinet", "--page", "2",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::List(args)) => {
                assert_eq!(args.size, Some(SpecimenSize::SmallCabinet));
                assert_eq!(args.page, 2);
            }
            _ => panic!("expected list"),
        }
    }
}
