use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::VaultConfig;
use crate::domain::RecipeId;
use crate::search::SearchRequest;

#[derive(Parser, Debug)]
#[command(author, version, about = "Keep a vault of recipes and search it", long_about = None)]
pub struct Cli {
    /// JSON file holding the vault (overrides RECIPE_VAULT_DATA_FILE)
    #[arg(short, long, global = true)]
    pub data_file: Option<PathBuf>,

    /// CSV of reference ingredients to merge into the catalog
    #[arg(long, global = true)]
    pub ingredients_csv: Option<PathBuf>,

    /// CSV of `key,message` overrides
    #[arg(long, global = true)]
    pub messages_csv: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Store a new recipe read from a JSON file
    Add {
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Replace a stored recipe with the one read from a JSON file
    Update {
        #[arg(long)]
        id: RecipeId,
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Show one recipe
    Get {
        #[arg(long)]
        id: RecipeId,
    },
    /// Remove one recipe
    Delete {
        #[arg(long)]
        id: RecipeId,
    },
    /// Find recipes matching the given criteria
    Search(SearchArgs),
    /// Show every recipe
    List,
}

#[derive(Args, Debug, Default)]
pub struct SearchArgs {
    /// Only vegetarian (true) or only non-vegetarian (false) recipes
    #[arg(long)]
    pub vegetarian: Option<bool>,

    /// Exact number of servings
    #[arg(long)]
    pub servings: Option<u32>,

    /// Text that must appear in the instructions (case-sensitive)
    #[arg(long)]
    pub search_key: Option<String>,

    /// Ingredient of which at least one must be present (repeatable)
    #[arg(long = "include")]
    pub include_ingredients: Vec<String>,

    /// Ingredient that must be absent (repeatable)
    #[arg(long = "exclude")]
    pub exclude_ingredients: Vec<String>,
}

impl From<SearchArgs> for SearchRequest {
    fn from(args: SearchArgs) -> Self {
        let non_empty = |names: Vec<String>| (!names.is_empty()).then_some(names);
        SearchRequest {
            vegetarian: args.vegetarian,
            servings: args.servings,
            search_key: args.search_key,
            include_ingredients: non_empty(args.include_ingredients),
            exclude_ingredients: non_empty(args.exclude_ingredients),
        }
    }
}

impl Cli {
    /// Command line flags win over the environment.
    pub fn apply_to(&self, mut config: VaultConfig) -> VaultConfig {
        if let Some(path) = &self.data_file {
            config.data_file = path.clone();
        }
        if let Some(path) = &self.ingredients_csv {
            config.ingredients_csv = Some(path.clone());
        }
        if let Some(path) = &self.messages_csv {
            config.messages_csv = Some(path.clone());
        }
        config
    }

    pub fn mutates(&self) -> bool {
        matches!(
            self.command,
            Command::Add { .. } | Command::Update { .. } | Command::Delete { .. }
        ) || self.ingredients_csv.is_some()
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_flags_build_request() {
        let cli = Cli::try_parse_from([
            "recipe_vault",
            "search",
            "--vegetarian",
            "true",
            "--include",
            "salt",
            "--include",
            "pepper",
            "--search-key",
            "oven",
        ])
        .unwrap();
        let Command::Search(args) = cli.command else {
            panic!("expected search");
        };
        let request = SearchRequest::from(args);
        assert_eq!(request.vegetarian, Some(true));
        assert_eq!(request.servings, None);
        assert_eq!(request.search_key.as_deref(), Some("oven"));
        assert_eq!(
            request.include_ingredients,
            Some(vec!["salt".to_string(), "pepper".to_string()])
        );
        assert_eq!(request.exclude_ingredients, None);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = Cli::try_parse_from(["recipe_vault", "list", "--data-file", "other.json"]).unwrap();
        let config = cli.apply_to(VaultConfig::default());
        assert_eq!(config.data_file, PathBuf::from("other.json"));
        assert!(!cli.mutates());
    }

    #[test]
    fn test_delete_requires_id() {
        assert!(Cli::try_parse_from(["recipe_vault", "delete"]).is_err());
        let cli = Cli::try_parse_from(["recipe_vault", "delete", "--id", "3"]).unwrap();
        assert!(matches!(cli.command, Command::Delete { id: 3 }));
        assert!(cli.mutates());
    }
}
