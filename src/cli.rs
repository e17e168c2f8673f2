use clap::{Parser, Subcommand};
use cinescope::browse::{FilterCriteria, Listings};
use cinescope::ops::{self, QueryMode};
use cinescope::{Config, Recommender};
use serde_json::Value;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "cinescope",
    version,
    about = "Content-based movie recommendations over a streaming catalog"
)]
struct Cli {
    /// Path to a TOML config file. Defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend movies similar to a title
    Recommend {
        /// Movie title (exact, or approximate with --fuzzy)
        title: String,
        /// Catalog CSV file
        #[arg(short, long)]
        catalog: PathBuf,
        /// Resolve the title by fuzzy matching instead of exact equality
        #[arg(short, long)]
        fuzzy: bool,
        /// Result page (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// Filter the listing table by genre, year, rating and service
    Filter {
        /// Catalog CSV file
        #[arg(short, long)]
        catalog: PathBuf,
        /// Genre to include (repeatable; any match passes)
        #[arg(short, long = "genre")]
        genres: Vec<String>,
        /// Earliest release year
        #[arg(long, requires = "to")]
        from: Option<i32>,
        /// Latest release year
        #[arg(long, requires = "from")]
        to: Option<i32>,
        /// Minimum IMDb score
        #[arg(short = 'r', long)]
        min_rating: Option<f64>,
        /// Streaming service
        #[arg(short, long)]
        service: Option<String>,
        /// Result page (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },
    /// List available genres, services and the release year range
    Facets {
        /// Catalog CSV file
        #[arg(short, long)]
        catalog: PathBuf,
    },
    /// Show the normalized form of a description
    Normalize {
        text: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "cinescope=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(cli.config.as_deref())?;
    let page_size = config.browse.page_size;

    let output = match cli.command {
        Commands::Recommend {
            title,
            catalog,
            fuzzy,
            page,
        } => {
            let recommender = Recommender::load(&catalog, config.recommender)?;
            let mode = if fuzzy { QueryMode::Fuzzy } else { QueryMode::Exact };
            ops::op_recommend(&recommender, &title, mode, page, page_size)
        }
        Commands::Filter {
            catalog,
            genres,
            from,
            to,
            min_rating,
            service,
            page,
        } => {
            let listings = Listings::load(&catalog, &config.browse)?;
            let criteria = FilterCriteria {
                genres,
                year_range: from.zip(to),
                min_rating,
                service,
            };
            ops::op_filter(&listings, &criteria, page, page_size)
        }
        Commands::Facets { catalog } => {
            let listings = Listings::load(&catalog, &config.browse)?;
            ops::op_facets(&listings)
        }
        Commands::Normalize { text } => ops::op_normalize(&text),
    };

    print_json(&output)
}

fn print_json(value: &Value) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
