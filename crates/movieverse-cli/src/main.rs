use clap::{ArgAction, Parser, Subcommand};
use commands::{auth, config, details, home, notices, react, review, trailer, watchlist};
use movieverse_config::PathManager;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "movieverse")]
#[command(about = "MovieVerse - browse movies, trailers, and reviews from the terminal")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    /// Write logs to the application log file instead of stderr
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    log_file: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the home page: all categories, a featured pick, and notices
    #[command(long_about = "Fetch every configured category concurrently and show the listings, a randomly featured trending movie, review counts, and any service notices. A failing category degrades to an empty listing.")]
    Home,

    /// Show details for one movie
    #[command(long_about = "Fetch details, reviews, and reaction tallies for one movie, and resolve a playable trailer through the configured sources.")]
    Details {
        /// Catalog the movie came from (e.g. tmdb, imdb)
        source: String,
        /// Catalog-local movie id
        external_id: String,

        /// Also fetch backdrop screenshots
        #[arg(long, action = ArgAction::SetTrue)]
        screenshots: bool,
    },

    /// Resolve a playable trailer URL for a movie
    #[command(long_about = "Run the trailer fallback chain for a movie id: primary metadata lookup, then video search (needs --title and --year), then the static fallback table from the config file.")]
    Trailer {
        /// Catalog-local movie id
        external_id: String,

        /// Movie title, enables the search fallback
        #[arg(long)]
        title: Option<String>,

        /// Release year, enables the search fallback
        #[arg(long)]
        year: Option<u32>,
    },

    /// Manage the local watchlist
    Watchlist {
        #[command(subcommand)]
        cmd: WatchlistCommands,
    },

    /// Submit a review for a movie
    Review {
        /// Catalog the movie came from
        source: String,
        /// Catalog-local movie id
        external_id: String,

        /// Your display name (prompted when omitted)
        #[arg(long)]
        name: Option<String>,

        /// Your email address (prompted when omitted)
        #[arg(long)]
        email: Option<String>,

        /// Review text (prompted when omitted)
        #[arg(long)]
        text: Option<String>,

        /// Optional rating from 1 to 10
        #[arg(long)]
        rating: Option<u8>,
    },

    /// Reply to an existing review
    Reply {
        /// Catalog the movie came from
        source: String,
        /// Catalog-local movie id
        external_id: String,
        /// Id of the review being answered
        review_id: String,

        /// Your display name (prompted when omitted)
        #[arg(long)]
        name: Option<String>,

        /// Your email address (prompted when omitted)
        #[arg(long)]
        email: Option<String>,

        /// Reply text (prompted when omitted)
        #[arg(long)]
        text: Option<String>,
    },

    /// React to a movie (excellent, good, average, sad)
    React {
        /// Catalog the movie came from
        source: String,
        /// Catalog-local movie id
        external_id: String,
        /// One of: excellent, good, average, sad
        reaction: String,
    },

    /// Log in and store the session token
    Login {
        /// Account email (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
    },

    /// Create an account and store the session token
    Register {
        /// Account email (prompted when omitted)
        #[arg(long)]
        email: Option<String>,
    },

    /// Discard the stored session token
    Logout,

    /// Show current service notices
    Notices,

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        cmd: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum WatchlistCommands {
    /// Add a movie to the watchlist
    Add {
        /// Catalog the movie came from
        source: String,
        /// Catalog-local movie id
        external_id: String,
    },
    /// Remove a movie from the watchlist
    Remove {
        /// Catalog the movie came from
        source: String,
        /// Catalog-local movie id
        external_id: String,
    },
    /// List watchlist entries in insertion order
    List,
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks API keys)
    Show {
        /// Show full configuration including masked secrets
        #[arg(long, action = ArgAction::SetTrue)]
        full: bool,
    },

    /// Configure the backend endpoint
    Backend {
        /// Backend base URL
        #[arg(long)]
        url: Option<String>,

        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Configure the TMDB metadata source
    Tmdb {
        /// TMDB API key (prompted when omitted)
        #[arg(long)]
        api_key: Option<String>,
    },

    /// Configure the YouTube search fallback
    Youtube {
        /// YouTube Data API key (prompted when omitted)
        #[arg(long)]
        api_key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let log_file = if cli.log_file {
        Some(PathManager::from_env().map_err(|e| color_eyre::eyre::eyre!("{}", e))?.log_file())
    } else {
        None
    };
    logging::init_logging(cli.verbose, cli.quiet, log_file)
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    match cli.command {
        Commands::Home => home::run_home(&output).await,
        Commands::Details {
            source,
            external_id,
            screenshots,
        } => details::run_details(&source, &external_id, screenshots, &output).await,
        Commands::Trailer {
            external_id,
            title,
            year,
        } => trailer::run_trailer(&external_id, title.as_deref(), year, &output).await,
        Commands::Watchlist { cmd } => match cmd {
            WatchlistCommands::Add {
                source,
                external_id,
            } => watchlist::run_add(&source, &external_id, &output).await,
            WatchlistCommands::Remove {
                source,
                external_id,
            } => watchlist::run_remove(&source, &external_id, &output),
            WatchlistCommands::List => watchlist::run_list(&output),
        },
        Commands::Review {
            source,
            external_id,
            name,
            email,
            text,
            rating,
        } => review::run_review(&source, &external_id, name, email, text, rating, &output).await,
        Commands::Reply {
            source,
            external_id,
            review_id,
            name,
            email,
            text,
        } => review::run_reply(&source, &external_id, &review_id, name, email, text, &output).await,
        Commands::React {
            source,
            external_id,
            reaction,
        } => react::run_react(&source, &external_id, &reaction, &output).await,
        Commands::Login { email } => auth::run_login(email, &output).await,
        Commands::Register { email } => auth::run_register(email, &output).await,
        Commands::Logout => auth::run_logout(&output),
        Commands::Notices => notices::run_notices(&output).await,
        Commands::Config { cmd } => {
            let cmd = cmd.unwrap_or(ConfigCommands::Show { full: false });
            config::run_config(cmd, &output)
        }
    }
}
