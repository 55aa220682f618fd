use anyhow::{Context, Result};
use recipe_vault::catalog::{load_ingredient_catalog, load_message_overrides};
use recipe_vault::cli::{parse_args, Command};
use recipe_vault::config::VaultConfig;
use recipe_vault::domain::RecipeInput;
use recipe_vault::error::VaultError;
use recipe_vault::messages::MessageCatalog;
use recipe_vault::service::{RecipeResponse, RecipeService};
use recipe_vault::store::{IngredientStore, InMemoryIngredientStore, InMemoryRecipeStore, VaultSnapshot};
use serde::Serialize;
use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

type Service = RecipeService<InMemoryRecipeStore, InMemoryIngredientStore, MessageCatalog>;

fn init_tracing(filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn load_snapshot(path: &Path) -> Result<VaultSnapshot> {
    // First run: no vault file yet
    if !fs::try_exists(path).await.unwrap_or(false) {
        info!("No vault at {:?}, starting empty", path);
        return Ok(VaultSnapshot::default());
    }
    let json = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read vault file '{}'", path.display()))?;
    VaultSnapshot::from_json(&json)
        .with_context(|| format!("Vault file '{}' is not a valid snapshot", path.display()))
}

async fn read_recipe(path: &Path) -> Result<RecipeInput> {
    let json = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read recipe file '{}'", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Recipe file '{}' is not valid", path.display()))
}

fn seed_catalog(ingredients: &InMemoryIngredientStore, csv_path: &Path) -> Result<()> {
    let seeded = load_ingredient_catalog(csv_path)?;
    let total = seeded.len();
    let mut added = 0;
    for ingredient in seeded {
        if ingredients.exists_by_name_ignore_case(&ingredient.name)? {
            continue; // Already in the vault from an earlier run
        }
        ingredients.insert(ingredient)?;
        added += 1;
    }
    info!("Ingredient catalog: {} of {} rows from {:?} added", added, total, csv_path);
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn report(response: &RecipeResponse) -> Result<()> {
    if !response.accepted {
        warn!("{}", response.message);
    }
    print_json(response)
}

/// Runs one command. Vault errors are rendered through the message catalog.
async fn run(service: &Service, command: Command) -> Result<()> {
    let describe = |err: VaultError| anyhow::anyhow!(service.describe(&err));
    match command {
        Command::Add { file } => {
            let source = read_recipe(&file).await?;
            report(&service.create(source).map_err(describe)?)
        }
        Command::Update { id, file } => {
            let source = read_recipe(&file).await?;
            report(&service.update(id, source).map_err(describe)?)
        }
        Command::Get { id } => print_json(&service.get_by_id(id).map_err(describe)?),
        Command::Delete { id } => {
            service.delete(id).map_err(describe)?;
            println!("{}", service.deleted_message());
            Ok(())
        }
        Command::Search(args) => print_json(&service.search(&args.into()).map_err(describe)?),
        Command::List => print_json(&service.list_all().map_err(describe)?),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Env (and .env) first, command line flags win
    let cli_args = parse_args();
    let config = cli_args.apply_to(VaultConfig::from_env());
    init_tracing(&config.log_filter);

    // Restore the stores from the last saved vault
    let snapshot = load_snapshot(&config.data_file).await?;
    let (recipes, ingredients) = snapshot.into_stores();

    if let Some(csv_path) = &config.ingredients_csv {
        seed_catalog(&ingredients, csv_path)
            .with_context(|| format!("Failed to seed ingredient catalog from '{}'", csv_path.display()))?;
    }

    // Built-in English messages, optionally overridden from CSV
    let mut messages = MessageCatalog::new();
    if let Some(csv_path) = &config.messages_csv {
        messages = messages.with_overrides(load_message_overrides(csv_path)?);
    }

    let mutates = cli_args.mutates();
    let service = RecipeService::new(recipes, ingredients, messages);
    run(&service, cli_args.command).await?;

    // Read-only commands leave the vault file alone
    if mutates {
        let snapshot = VaultSnapshot::capture(service.recipe_store(), service.ingredient_store())?;
        fs::write(&config.data_file, snapshot.to_json()?)
            .await
            .with_context(|| format!("Failed to write vault file '{}'", config.data_file.display()))?;
        info!("Vault saved to {:?}", config.data_file);
    }

    Ok(())
}
