use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::cli::args::{CliArgs, Command, DraftArgs, ListArgs};
use crate::cli::validation;
use crate::config;
use crate::controller::MovieController;
use crate::model::{FilterField, MovieDraft, SortKey};
use crate::output;
use crate::pager::ViewError;
use crate::remote::{HttpBackend, RemoteError, TransportConfig};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid arguments: {message}")]
    InvalidArgs { message: String },

    #[error("{message}")]
    Config { message: String },

    #[error("no backend server configured (pass --server or set `server` in the config file)")]
    MissingServer,

    #[error("terminal i/o failed: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    View(#[from] ViewError),
}

pub async fn run() -> Result<(), AppError> {
    let args = CliArgs::parse();
    validation::validate(&args).map_err(|message| AppError::InvalidArgs { message })?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = resolve_config_path(&args)?;
    if matches!(args.command, Command::InitConfig) {
        config::ensure_default_config_file(&config_path)
            .map_err(|message| AppError::Config { message })?;
        println!("config ready at {}", config_path.display());
        return Ok(());
    }

    // An explicitly passed config path must exist; the default one may not.
    let cfg = config::load_config(&config_path, args.config.is_none())
        .map_err(|message| AppError::Config { message })?;

    if args.no_color || cfg.no_color.unwrap_or(false) {
        colored::control::set_override(false);
    }

    let mut transport = TransportConfig::new(
        args.server
            .clone()
            .or(cfg.server.clone())
            .ok_or(AppError::MissingServer)?,
    );
    if let Some(timeout) = args.timeout.or(cfg.timeout) {
        transport.timeout = timeout;
    }
    transport.send_credentials = cfg.send_credentials.unwrap_or(false);

    let backend = HttpBackend::new(&transport)?;
    let mut controller = MovieController::new(backend);

    let outcome = match &args.command {
        Command::List(list) => {
            let default_sort = cfg.sort.as_deref().and_then(SortKey::parse);
            run_list(&mut controller, list, default_sort).await
        }
        Command::Add(draft) => controller.create(&to_draft(draft)).await,
        Command::Update(update) => controller.update(&update.id, &to_draft(&update.draft)).await,
        Command::Delete(delete) => {
            if !delete.yes && !confirm_delete(&delete.id)? {
                println!("aborted");
                return Ok(());
            }
            controller.delete(&delete.id).await
        }
        Command::InitConfig => unreachable!("handled above"),
    };

    let snapshot = controller.snapshot();
    if args.json {
        let rendered = output::render_json(&snapshot);
        io::stdout()
            .write_all(&rendered)
            .map_err(|source| AppError::Io { source })?;
        println!();
    } else {
        print!("{}", output::render_table(&snapshot));
    }

    outcome.map_err(AppError::from)
}

async fn run_list<B: crate::remote::MovieBackend>(
    controller: &mut MovieController<B>,
    list: &ListArgs,
    default_sort: Option<SortKey>,
) -> Result<(), ViewError> {
    if let Some(query) = &list.query {
        controller.set_filter(FilterField::Query, query.clone());
    }
    if let Some(genre) = &list.genre {
        controller.set_filter(FilterField::Genre, genre.clone());
    }
    if let Some(min_date) = &list.min_date {
        controller.set_filter(FilterField::MinReleaseDate, min_date.clone());
    }
    if let Some(min_rating) = &list.min_rating {
        controller.set_filter(FilterField::MinRating, min_rating.clone());
    }

    let sort = list
        .sort
        .as_deref()
        .and_then(SortKey::parse)
        .or(default_sort)
        .unwrap_or_default();
    if sort != SortKey::None {
        controller.set_sort(sort).await?;
        if list.page > 1 {
            controller.fetch_page(list.page).await?;
        }
        return Ok(());
    }
    controller.fetch_page(list.page).await
}

fn to_draft(args: &DraftArgs) -> MovieDraft {
    MovieDraft {
        title: args.title.clone(),
        genre: args.genre.clone(),
        release_date: args.release_date.clone(),
        rating: args.rating.clone(),
    }
}

fn resolve_config_path(args: &CliArgs) -> Result<PathBuf, AppError> {
    match args.config.as_deref() {
        Some(path) => Ok(config::expand_tilde(path)),
        None => config::default_config_path().ok_or_else(|| AppError::Config {
            message: "could not determine home directory for config".to_string(),
        }),
    }
}

fn confirm_delete(id: &str) -> Result<bool, AppError> {
    print!("Are you sure you want to delete movie {id}? [y/N] ");
    io::stdout()
        .flush()
        .map_err(|source| AppError::Io { source })?;
    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .map_err(|source| AppError::Io { source })?;
    Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
}
