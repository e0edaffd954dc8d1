//! # CLI Layer
//!
//! Turns parsed arguments into API calls and prints the outcome. Handlers never
//! exit the process; they return errors and `main` decides the exit code.

use super::render::{
    done_message, render_done, render_list, render_recipe, render_search, saved_message,
};
use super::setup::{Cli, Commands};
use anyhow::{bail, Context};
use chrono::Utc;
use clap::Parser;
use recipeapp::api::RecipesApi;
use recipeapp::config::RecipesConfig;
use recipeapp::edit::RecipeEdit;
use recipeapp::envelope::Envelope;
use recipeapp::error::RecipeError;
use recipeapp::model::Recipe;
use recipeapp::storage::fs_backend::FsBackend;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter, e.g. `recipeapp=debug`.
const LOG_ENV: &str = "RECIPEBOX_LOG";

struct AppContext {
    api: RecipesApi<FsBackend>,
    json: bool,
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let ctx = create_context(&cli)?;
    debug!(command = ?cli.command, "dispatching");

    match cli.command {
        Commands::List => handle_list(&ctx),
        Commands::Show { slug } => handle_show(&ctx, &slug),
        Commands::Add { file } => handle_add(&ctx, &file),
        Commands::Update { file } => handle_update(&ctx, &file),
        Commands::Delete { slug } => handle_delete(&ctx, &slug),
        Commands::Search { term } => handle_search(&ctx, &term.join(" ")),
        Commands::Edit { slug } => handle_edit(&ctx, &slug),
        Commands::Save { slug, file } => handle_save(&ctx, &slug, &file),
        Commands::Path => handle_path(&ctx),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn create_context(cli: &Cli) -> anyhow::Result<AppContext> {
    let config_file = match &cli.config {
        Some(path) => {
            if !path.is_file() {
                bail!("config file not found: {}", path.display());
            }
            Some(path.clone())
        }
        None => RecipesConfig::default_file(),
    };

    let mut config = RecipesConfig::load(config_file.as_deref())?;
    if let Some(dir) = &cli.data_dir {
        config = config.with_data_dir(dir);
    }

    let api = RecipesApi::open(&config).context("failed to open the recipe box")?;
    Ok(AppContext {
        api,
        json: cli.json,
    })
}

/// Print `result` in the active output mode. Failures are printed as an
/// envelope in JSON mode and always returned as errors.
fn emit<T: Serialize>(
    ctx: &AppContext,
    result: Result<T, RecipeError>,
    render: impl FnOnce(&T) -> String,
) -> anyhow::Result<()> {
    match result {
        Ok(data) => {
            if ctx.json {
                print_json(&Envelope::ok(data))?;
            } else {
                print!("{}", render(&data));
            }
            Ok(())
        }
        Err(err) => fail(ctx, err),
    }
}

/// Like [`emit`] for mutations: the confirmation goes to the terminal, or
/// into the envelope's `message` in JSON mode.
fn emit_confirmed<T: Serialize>(
    ctx: &AppContext,
    result: Result<T, RecipeError>,
    message: impl FnOnce(&T) -> String,
) -> anyhow::Result<()> {
    match result {
        Ok(data) => {
            let message = message(&data);
            if ctx.json {
                print_json(&Envelope::ok(data).with_message(message))?;
            } else {
                print!("{}", render_done(&message));
            }
            Ok(())
        }
        Err(err) => fail(ctx, err),
    }
}

fn fail(ctx: &AppContext, err: RecipeError) -> anyhow::Result<()> {
    if ctx.json {
        print_json(&Envelope::<()>::failed(&err))?;
    }
    Err(err.into())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn handle_list(ctx: &AppContext) -> anyhow::Result<()> {
    let now = Utc::now();
    emit(ctx, ctx.api.list(), |recipes| render_list(recipes, now))
}

fn handle_show(ctx: &AppContext, slug: &str) -> anyhow::Result<()> {
    emit(ctx, ctx.api.get(slug), render_recipe)
}

fn handle_add(ctx: &AppContext, file: &Path) -> anyhow::Result<()> {
    let result = read_json::<Recipe>(file).and_then(|recipe| ctx.api.add(recipe));
    emit_confirmed(ctx, result, |r| done_message("added", r))
}

fn handle_update(ctx: &AppContext, file: &Path) -> anyhow::Result<()> {
    let result = read_json::<Recipe>(file).and_then(|recipe| ctx.api.update(recipe));
    emit_confirmed(ctx, result, |r| done_message("updated", r))
}

fn handle_delete(ctx: &AppContext, slug: &str) -> anyhow::Result<()> {
    emit_confirmed(ctx, ctx.api.delete(slug), |r| done_message("deleted", r))
}

fn handle_search(ctx: &AppContext, term: &str) -> anyhow::Result<()> {
    emit(ctx, ctx.api.search(term), |results| {
        render_search(term, results)
    })
}

fn handle_edit(ctx: &AppContext, slug: &str) -> anyhow::Result<()> {
    let form = ctx.api.edit_form(slug);
    if ctx.json {
        return emit(ctx, form, |_| String::new());
    }
    let form = form?;
    print_json(&form)
}

fn handle_save(ctx: &AppContext, slug: &str, file: &Path) -> anyhow::Result<()> {
    let result = read_json::<RecipeEdit>(file).and_then(|form| ctx.api.save(slug, form));
    emit_confirmed(ctx, result, saved_message)
}

fn handle_path(ctx: &AppContext) -> anyhow::Result<()> {
    emit(ctx, ctx.api.snapshot_path(), |path| {
        format!("{}\n", path.display())
    })
}

/// Read and parse failures are `InvalidArgument`.
fn read_json<T: DeserializeOwned>(file: &Path) -> Result<T, RecipeError> {
    let text = read_input(file).map_err(|e| {
        RecipeError::InvalidArgument(format!("failed to read {}: {}", file.display(), e))
    })?;
    serde_json::from_str(&text).map_err(|e| {
        RecipeError::InvalidArgument(format!("invalid JSON in {}: {}", file.display(), e))
    })
}

/// Read a whole input file; `-` is stdin.
fn read_input(file: &Path) -> std::io::Result<String> {
    if file == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    std::fs::read_to_string(file)
}
