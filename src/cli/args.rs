use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "movieverse",
    version,
    about = "paginated movie-collection management client",
    long_about = "Movieverse is a terminal client for a paginated movie collection: it lists pages from the backend, layers local search/filter criteria on top, and performs create/update/delete mutations with an automatic page refresh.\n\nExamples:\n  movieverse list\n  movieverse list --page 2 --sort rating --query dune\n  movieverse add --title Dune --genre Sci-Fi --release-date 2021-10-22 --rating 8.5\n\nTip: Run `movieverse init-config` to persist the server URL and keep invocations short."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    #[arg(
        short = 'C',
        long = "cfg",
        visible_alias = "config",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.movieverse/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        short = 's',
        long = "server",
        value_name = "URL",
        help_heading = "Input",
        help = "Backend base URL (overrides config)."
    )]
    pub server: Option<String>,

    #[arg(
        long = "timeout",
        value_name = "SECONDS",
        help_heading = "Performance",
        help = "HTTP request timeout in seconds."
    )]
    pub timeout: Option<u64>,

    #[arg(
        long = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        long = "json",
        help_heading = "Output",
        help = "Render the snapshot as JSON instead of a table."
    )]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List a page of movies, with optional local filters applied on top.
    List(ListArgs),
    /// Create a movie and show the refreshed first page.
    Add(DraftArgs),
    /// Update a movie by id and show the refreshed current page.
    Update(UpdateArgs),
    /// Delete a movie by id (asks for confirmation unless --yes).
    Delete(DeleteArgs),
    /// Write a starter config file if none exists.
    InitConfig,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    #[arg(
        short = 'p',
        long = "page",
        value_name = "N",
        default_value_t = 1,
        help = "Page number to fetch (clamped to the available range)."
    )]
    pub page: u32,

    #[arg(
        long = "sort",
        value_name = "KEY",
        help = "Server-side sort key: none, title, or rating."
    )]
    pub sort: Option<String>,

    #[arg(
        short = 'q',
        long = "query",
        value_name = "TEXT",
        help = "Case-insensitive substring match on title or genre."
    )]
    pub query: Option<String>,

    #[arg(
        short = 'g',
        long = "genre",
        value_name = "GENRE",
        help = "Exact genre match."
    )]
    pub genre: Option<String>,

    #[arg(
        long = "min-date",
        value_name = "YYYY-MM-DD",
        help = "Keep movies released on or after this date."
    )]
    pub min_date: Option<String>,

    #[arg(
        long = "min-rating",
        value_name = "N",
        help = "Keep movies rated at or above this value."
    )]
    pub min_rating: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct DraftArgs {
    #[arg(long = "title", value_name = "TITLE", help = "Movie title.")]
    pub title: String,

    #[arg(long = "genre", value_name = "GENRE", help = "Movie genre.")]
    pub genre: String,

    #[arg(
        long = "release-date",
        value_name = "YYYY-MM-DD",
        help = "Release date."
    )]
    pub release_date: String,

    #[arg(long = "rating", value_name = "N", help = "Rating (e.g. 8.5).")]
    pub rating: String,
}

#[derive(Args, Debug, Clone)]
pub struct UpdateArgs {
    #[arg(value_name = "ID", help = "Server-assigned movie id.")]
    pub id: String,

    #[command(flatten)]
    pub draft: DraftArgs,
}

#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    #[arg(value_name = "ID", help = "Server-assigned movie id.")]
    pub id: String,

    #[arg(short = 'y', long = "yes", help = "Skip the confirmation prompt.")]
    pub yes: bool,
}
