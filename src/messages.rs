use std::collections::HashMap;

pub const RECIPE_NAME_EXISTS: &str = "Exists.recipe.name";
pub const INGREDIENT_NAME_EXISTS: &str = "Exists.ingredient.name";
pub const RECIPE_NOT_FOUND: &str = "NotFound.recipe";
pub const RECIPE_CREATED: &str = "recipe.create.success";
pub const RECIPE_UPDATED: &str = "recipe.update.success";
pub const RECIPE_DELETED: &str = "recipe.delete.success";
pub const STORE_FAILURE: &str = "store.failure";

const DEFAULT_MESSAGES: &[(&str, &str)] = &[
    (RECIPE_NAME_EXISTS, "A recipe named '{0}' already exists."),
    (INGREDIENT_NAME_EXISTS, "An ingredient named '{0}' already exists."),
    (RECIPE_NOT_FOUND, "Recipe {0} does not exist."),
    (RECIPE_CREATED, "Recipe created successfully."),
    (RECIPE_UPDATED, "Recipe updated successfully."),
    (RECIPE_DELETED, "Recipe deleted."),
    (STORE_FAILURE, "The recipe vault could not complete the request: {0}"),
];

/// Turns a symbolic message key plus positional arguments into text for the caller.
pub trait MessageResolver: Send + Sync {
    fn resolve(&self, key: &str, args: &[String]) -> String;
}

#[derive(Debug, Clone)]
pub struct MessageCatalog {
    templates: HashMap<String, String>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self {
            templates: DEFAULT_MESSAGES
                .iter()
                .map(|(key, template)| (key.to_string(), template.to_string()))
                .collect(),
        }
    }

    pub fn with_overrides(mut self, overrides: impl IntoIterator<Item = (String, String)>) -> Self {
        self.templates.extend(overrides);
        self
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageResolver for MessageCatalog {
    /// `{0}`, `{1}`, ... are replaced by the matching argument. Unknown keys
    /// resolve to the key itself.
    fn resolve(&self, key: &str, args: &[String]) -> String {
        let Some(template) = self.templates.get(key) else {
            return key.to_string();
        };
        args.iter()
            .enumerate()
            .fold(template.clone(), |text, (idx, arg)| {
                text.replace(&format!("{{{}}}", idx), arg)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolves_default_with_argument() {
        let catalog = MessageCatalog::new();
        assert_eq!(
            catalog.resolve(RECIPE_NAME_EXISTS, &["Soup".to_string()]),
            "A recipe named 'Soup' already exists."
        );
    }

    #[test]
    fn test_unknown_key_falls_back_to_key() {
        assert_eq!(MessageCatalog::new().resolve("no.such.key", &[]), "no.such.key");
    }

    #[test]
    fn test_overrides_replace_defaults() {
        let catalog = MessageCatalog::new().with_overrides(vec![(
            RECIPE_CREATED.to_string(),
            "Recept '{0}' opgeslagen".to_string(),
        )]);
        assert_eq!(
            catalog.resolve(RECIPE_CREATED, &["Soep".to_string()]),
            "Recept 'Soep' opgeslagen"
        );
    }
}
