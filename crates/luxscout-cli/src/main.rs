use anyhow::{bail, Context};
use clap::Parser;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use luxscout_core::models::SelectedProduct;
use luxscout_core::{
    search, BulbOption, Catalog, Config, LightingCalculator, NewSelection, RoomType,
    SelectionStore, WishlistStore, BULB_OPTIONS,
};
use luxscout_store::StoreManager;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "luxscout")]
#[command(version, about = "Lighting catalog search and planning toolkit", long_about = None)]
struct Cli {
    /// Load an alternative catalog JSON file
    #[arg(long, global = true)]
    catalog: Option<String>,

    /// Use a specific store database instead of the default location
    #[arg(long, global = true)]
    db: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Search the product catalog
    Search {
        /// Search query (at least 2 characters)
        query: String,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
        /// Show relevance scores next to each hit
        #[arg(long)]
        scores: bool,
    },
    /// Work out how many bulbs a room needs
    Calculate {
        /// Room type: bedroom, living, kitchen, bathroom, office, garage
        #[arg(long)]
        room: String,
        /// Room length in feet
        #[arg(long)]
        length: f64,
        /// Room width in feet
        #[arg(long)]
        width: f64,
        /// Ceiling height in feet (8-15)
        #[arg(long, default_value_t = 9)]
        height: u32,
        /// Bulb wattage: 7, 9, 12, 15, 18 or 22
        #[arg(long, default_value_t = 12)]
        watts: u32,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Browse the catalog
    #[command(subcommand)]
    Catalog(CatalogCommands),
    /// Manage the wishlist
    #[command(subcommand)]
    Wishlist(WishlistCommands),
    /// Manage the enquiry cart
    #[command(subcommand)]
    Enquiry(EnquiryCommands),
}

#[derive(clap::Subcommand)]
enum CatalogCommands {
    /// List products, optionally filtered by category
    List {
        #[arg(long)]
        category: Option<String>,
    },
    /// Show one product in full
    Show {
        /// Product id
        id: String,
    },
    /// List the catalog categories
    Categories,
}

#[derive(clap::Subcommand)]
enum WishlistCommands {
    /// Save a product for later
    Add { product_id: String },
    /// Remove a product from the wishlist
    Remove { product_id: String },
    /// Show everything on the wishlist
    List,
    /// Empty the wishlist
    Clear,
}

#[derive(clap::Subcommand)]
enum EnquiryCommands {
    /// Add a configured product line to the enquiry cart
    Add {
        product_id: String,
        /// Wattage, must be one the product offers (default: lowest)
        #[arg(long)]
        watts: Option<u32>,
        /// Colour temperature (default: first the product offers)
        #[arg(long)]
        color: Option<String>,
        /// Application type (default: first the product offers)
        #[arg(long)]
        application: Option<String>,
        #[arg(long, default_value_t = 1)]
        quantity: u32,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Remove a line by its selection id
    Remove { selection_id: String },
    /// Show the enquiry cart
    List,
    /// Empty the enquiry cart
    Clear,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging - helps when things go sideways
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "luxscout=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    let catalog = match cli.catalog.as_deref().or(config.catalog.path.as_deref()) {
        Some(path) => Catalog::from_path(path)
            .with_context(|| format!("failed to load catalog from {}", path))?,
        None => Catalog::embedded()?,
    };

    match cli.command {
        Commands::Search { query, json, scores } => {
            run_search(&catalog, &query, json, scores || config.search.show_scores)
        }
        Commands::Calculate {
            room,
            length,
            width,
            height,
            watts,
            json,
        } => run_calculate(&room, length, width, height, watts, json),
        Commands::Catalog(cmd) => run_catalog(&catalog, cmd),
        Commands::Wishlist(cmd) => {
            let store = open_store(&cli.db, &config)?;
            run_wishlist(&catalog, &store, cmd)
        }
        Commands::Enquiry(cmd) => {
            let store = open_store(&cli.db, &config)?;
            run_enquiry(&catalog, &store, cmd)
        }
    }
}

fn open_store(db_flag: &Option<String>, config: &Config) -> anyhow::Result<StoreManager> {
    let path = match db_flag {
        Some(path) => std::path::PathBuf::from(path),
        None => config.store_db_path()?,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    StoreManager::new(&path).with_context(|| format!("failed to open store at {}", path.display()))
}

fn run_search(catalog: &Catalog, query: &str, json: bool, show_scores: bool) -> anyhow::Result<()> {
    if query.trim().chars().count() < 2 {
        bail!("query too short - give me at least 2 characters");
    }

    let results = search::search_scored(query, catalog.products());

    if json {
        let hits: Vec<_> = results.iter().map(|(product, _)| product).collect();
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No products found for \"{}\"", query);
        let suggestions = fuzzy_suggestions(catalog, query);
        if !suggestions.is_empty() {
            println!("Did you mean: {}?", suggestions.join(", "));
        }
        return Ok(());
    }

    println!("{} result(s) for \"{}\":", results.len(), query);
    for (product, score) in results {
        if show_scores {
            println!(
                "  [{:>3}] {} ({}) - {}",
                score,
                product.name,
                product.wattage_range(),
                product.short_description
            );
        } else {
            println!(
                "  {} ({}) - {}",
                product.name,
                product.wattage_range(),
                product.short_description
            );
        }
    }
    Ok(())
}

/// Closest product names when the ranker comes up empty
fn fuzzy_suggestions(catalog: &Catalog, query: &str) -> Vec<String> {
    let matcher = SkimMatcherV2::default();
    let mut scored: Vec<(i64, &str)> = catalog
        .products()
        .iter()
        .filter_map(|p| {
            matcher
                .fuzzy_match(&p.name, query)
                .map(|score| (score, p.name.as_str()))
        })
        .collect();
    scored.sort_by_key(|(score, _)| std::cmp::Reverse(*score));
    scored.into_iter().take(3).map(|(_, name)| name.to_string()).collect()
}

fn run_calculate(
    room: &str,
    length: f64,
    width: f64,
    height: u32,
    watts: u32,
    json: bool,
) -> anyhow::Result<()> {
    let room_type = RoomType::from_id(room).with_context(|| {
        let known: Vec<_> = RoomType::ALL.iter().map(|r| r.id()).collect();
        format!("unknown room type {:?}; expected one of {}", room, known.join(", "))
    })?;
    let bulb = BulbOption::for_watts(watts).with_context(|| {
        let ladder: Vec<_> = BULB_OPTIONS.iter().map(|b| b.watts.to_string()).collect();
        format!("no {}W option; available wattages: {}", watts, ladder.join(", "))
    })?;
    if !(8..=15).contains(&height) {
        bail!("ceiling height must be between 8 and 15 feet");
    }

    let result = LightingCalculator::calculate(room_type, length, width, height, bulb)
        .context("length and width must be positive")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!(
        "Your {} ({:.0} sq.ft) needs {} x {}",
        room_type.label(),
        result.area_sq_ft,
        result.bulbs_needed,
        bulb.label()
    );
    println!("  Total lumens:     {} lm", result.total_lumens_needed);
    println!("  Energy saved:     {}% vs incandescent", result.energy_saved_percent);
    println!("  Monthly cost:     {} (vs {})", result.monthly_cost_led, result.monthly_cost_incandescent);
    println!("  Monthly savings:  {}", result.monthly_savings);
    println!("  Yearly savings:   {}", result.yearly_savings);
    Ok(())
}

fn run_catalog(catalog: &Catalog, cmd: CatalogCommands) -> anyhow::Result<()> {
    match cmd {
        CatalogCommands::List { category } => {
            let products: Vec<_> = match &category {
                Some(id) => catalog.by_category(id),
                None => catalog.products().iter().collect(),
            };
            if products.is_empty() {
                println!("No products in that category");
                return Ok(());
            }
            for product in products {
                let bis = if product.bis_certified { " [BIS]" } else { "" };
                println!(
                    "  {:<24} {} ({}){}",
                    product.id,
                    product.name,
                    product.wattage_range(),
                    bis
                );
            }
        }
        CatalogCommands::Show { id } => {
            let product = catalog.product(&id)?;
            println!("{} ({})", product.name, product.id);
            println!("  Category:      {}", product.category_name());
            println!("  Description:   {}", product.short_description);
            println!("  Wattages:      {}", product.wattage_range());
            println!("  Colours:       {}", product.color_temperatures.join(", "));
            println!("  Applications:  {}", product.application_types.join(", "));
            println!("  BIS certified: {}", if product.bis_certified { "yes" } else { "no" });
            if !product.specifications.is_empty() {
                println!("  Specifications:");
                for (field, value) in &product.specifications {
                    println!("    {:<14} {}", field, value);
                }
            }
            let related = luxscout_core::recommend::related(catalog, product);
            if !related.is_empty() {
                let names: Vec<_> = related.iter().map(|p| p.name.as_str()).collect();
                println!("  Related:       {}", names.join(", "));
            }
        }
        CatalogCommands::Categories => {
            for category in catalog.categories() {
                let count = catalog.by_category(&category.id).len();
                println!("  {:<18} {} ({} products)", category.id, category.name, count);
            }
        }
    }
    Ok(())
}

fn run_wishlist(
    catalog: &Catalog,
    store: &StoreManager,
    cmd: WishlistCommands,
) -> anyhow::Result<()> {
    let mut wishlist = WishlistStore::new();
    store.load_wishlist(&mut wishlist)?;

    match cmd {
        WishlistCommands::Add { product_id } => {
            let product = catalog.product(&product_id)?;
            wishlist.add(&product_id);
            store.wishlist_add(&product_id)?;
            println!("Added {} to the wishlist", product.name);
        }
        WishlistCommands::Remove { product_id } => {
            wishlist.remove(&product_id);
            store.wishlist_remove(&product_id)?;
            println!("Removed {} from the wishlist", product_id);
        }
        WishlistCommands::List => {
            if wishlist.is_empty() {
                println!("Your wishlist is empty");
                return Ok(());
            }
            println!("{} item(s) saved:", wishlist.len());
            for id in wishlist.ids() {
                match catalog.product(id) {
                    Ok(product) => {
                        println!("  {} ({})", product.name, product.wattage_range())
                    }
                    // Wishlisted before the catalog changed underneath it
                    Err(_) => println!("  {} (no longer in catalog)", id),
                }
            }
        }
        WishlistCommands::Clear => {
            wishlist.clear();
            store.wishlist_clear()?;
            println!("Wishlist cleared");
        }
    }
    Ok(())
}

fn run_enquiry(
    catalog: &Catalog,
    store: &StoreManager,
    cmd: EnquiryCommands,
) -> anyhow::Result<()> {
    let mut cart = SelectionStore::new();
    store.load_selections(&mut cart)?;

    match cmd {
        EnquiryCommands::Add {
            product_id,
            watts,
            color,
            application,
            quantity,
            notes,
        } => {
            let product = catalog.product(&product_id)?;

            let wattage = match watts {
                Some(w) if product.wattage_options.contains(&w) => w,
                Some(w) => bail!(
                    "{} is not offered in {}W (options: {:?})",
                    product.name,
                    w,
                    product.wattage_options
                ),
                None => product.wattage_options[0],
            };
            let color_temperature = color
                .or_else(|| product.color_temperatures.first().cloned())
                .unwrap_or_default();
            let application_type = application
                .or_else(|| product.application_types.first().cloned())
                .unwrap_or_default();

            let selection_id = cart.add(NewSelection {
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                wattage,
                color_temperature,
                application_type,
                quantity,
                notes,
            });
            let item = cart
                .get(&selection_id)
                .context("selection missing right after insert")?;
            store.selection_save(item)?;
            println!(
                "Added {} x {} ({}W) to the enquiry cart [{}]",
                quantity, product.name, wattage, selection_id
            );
        }
        EnquiryCommands::Remove { selection_id } => {
            cart.remove(&selection_id)?;
            store.selection_remove(&selection_id)?;
            println!("Removed line {}", selection_id);
        }
        EnquiryCommands::List => {
            if cart.items().is_empty() {
                println!("The enquiry cart is empty");
                return Ok(());
            }
            println!("{} unit(s) across {} line(s):", cart.total_count(), cart.items().len());
            for item in cart.items() {
                print_selection(item);
            }
        }
        EnquiryCommands::Clear => {
            cart.clear();
            store.selections_clear()?;
            println!("Enquiry cart cleared");
        }
    }
    Ok(())
}

fn print_selection(item: &SelectedProduct) {
    println!(
        "  [{}] {} x {} - {}W, {}, {}",
        item.selection_id,
        item.quantity,
        item.product_name,
        item.wattage,
        item.color_temperature,
        item.application_type
    );
    if let Some(notes) = &item.notes {
        println!("      note: {}", notes);
    }
}
