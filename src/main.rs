//! CLI entry point for blogkit

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use blogkit::filter::{DateRange, FilterState};

#[derive(Parser)]
#[command(name = "blogkit")]
#[command(version)]
#[command(about = "Index, query and export a Markdown blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List posts, featured posts, tags or categories
    List {
        /// Type of content to list (post, featured, tag, category)
        #[arg(default_value = "post")]
        r#type: String,
    },

    /// Show a single post with its table of contents and related posts
    Show {
        /// Post slug (file name without .md)
        slug: String,

        /// Print the rendered HTML instead of a summary
        #[arg(long)]
        html: bool,
    },

    /// Search titles, excerpts and tags
    Search {
        query: String,
    },

    /// Filter posts by text, category, tag and date range
    Filter {
        /// Free-text query
        #[arg(short, long, default_value = "")]
        query: String,

        /// Exact category
        #[arg(short = 'C', long)]
        category: Option<String>,

        /// Exact tag
        #[arg(short, long)]
        tag: Option<String>,

        /// all, last-week, last-month, last-3-months or last-year
        #[arg(short, long)]
        range: Option<DateRange>,
    },

    /// Export page data as JSON
    #[command(alias = "g")]
    Export {
        /// Re-export when content changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// File name (without .md); derived from the title when omitted
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Remove exported page data
    Clean,

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blogkit=debug,info"
    } else {
        "blogkit=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::List { r#type } => {
            let blog = blogkit::Blog::new(&base_dir)?;
            blogkit::commands::list::run(&blog, &r#type)?;
        }

        Commands::Show { slug, html } => {
            let blog = blogkit::Blog::new(&base_dir)?;
            blogkit::commands::show::run(&blog, &slug, html)?;
        }

        Commands::Search { query } => {
            let blog = blogkit::Blog::new(&base_dir)?;
            blogkit::commands::search::run(&blog, &query)?;
        }

        Commands::Filter {
            query,
            category,
            tag,
            range,
        } => {
            let blog = blogkit::Blog::new(&base_dir)?;
            let state = FilterState {
                query,
                category,
                tag,
                date_range: range,
            };
            blogkit::commands::filter::run(&blog, &state)?;
        }

        Commands::Export { watch } => {
            let blog = blogkit::Blog::new(&base_dir)?;
            tracing::info!("Exporting page data...");

            blogkit::commands::export::run(&blog)?;
            println!("Exported to {}", blogkit::commands::export::output_dir(&blog).display());

            if watch {
                tokio::task::spawn_blocking(move || blogkit::commands::export::watch(&blog))
                    .await??;
            }
        }

        Commands::New { title, slug } => {
            let blog = blogkit::Blog::new(&base_dir)?;
            let path = blog.new_post(&title, slug.as_deref())?;
            println!("Created: {}", path.display());
        }

        Commands::Clean => {
            let blog = blogkit::Blog::new(&base_dir)?;
            tracing::info!("Cleaning exported data...");
            blog.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("blogkit version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
