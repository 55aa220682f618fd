use recipe_vault::domain::{IngredientInput, MeasureUnit, Recipe, RecipeInput};
use recipe_vault::error::VaultError;
use recipe_vault::messages::MessageCatalog;
use recipe_vault::reconcile::{merge_ingredients, merge_recipe};
use recipe_vault::search::{compile, SearchRequest};
use recipe_vault::service::RecipeService;
use recipe_vault::store::{InMemoryIngredientStore, InMemoryRecipeStore, RecipeStore, VaultSnapshot};

type Service = RecipeService<InMemoryRecipeStore, InMemoryIngredientStore, MessageCatalog>;

fn empty_service() -> Service {
    RecipeService::new(
        InMemoryRecipeStore::new(),
        InMemoryIngredientStore::new(),
        MessageCatalog::new(),
    )
}

fn recipe(name: &str, vegetarian: bool, servings: u32, instructions: &str, ingredients: &[&str]) -> RecipeInput {
    RecipeInput {
        name: name.to_string(),
        instructions: instructions.to_string(),
        servings,
        vegetarian,
        ingredients: ingredients
            .iter()
            .map(|name| IngredientInput::new(*name, 100.0, MeasureUnit::Gram))
            .collect(),
    }
}

/// Ingredient names are unique across the whole catalog, so every recipe here
/// brings its own ingredients.
fn seeded_service() -> Result<Service, VaultError> {
    let service = empty_service();
    for input in [
        recipe("Tomato Soup", true, 4, "Roast the tomatoes in the oven", &["tomato", "basil"]),
        recipe("Peanut Curry", true, 4, "Stir the peanuts into the sauce", &["nuts", "coconut milk"]),
        recipe("Roast Chicken", false, 6, "Roast the chicken in the oven", &["chicken", "salt"]),
        recipe("Fish Tacos", false, 2, "Fry the fish", &["cod", "pepper"]),
        recipe("Plain Rice", true, 2, "Boil", &[]),
    ] {
        let response = service.create(input)?;
        assert!(response.accepted, "{}", response.message);
    }
    Ok(service)
}

fn names(recipes: &[Recipe]) -> Vec<&str> {
    recipes.iter().map(|r| r.name.as_str()).collect()
}

#[test]
fn test_search_without_criteria_returns_everything() -> Result<(), VaultError> {
    let service = seeded_service()?;
    let all = service.search(&SearchRequest::default())?;
    assert_eq!(all.len(), 5);
    Ok(())
}

#[test]
fn test_search_by_vegetarian_and_servings() -> Result<(), VaultError> {
    let service = seeded_service()?;
    let found = service.search(&SearchRequest {
        vegetarian: Some(true),
        servings: Some(4),
        ..Default::default()
    })?;
    assert_eq!(names(&found), vec!["Tomato Soup", "Peanut Curry"]);
    Ok(())
}

#[test]
fn test_search_include_any_exclude_all() -> Result<(), VaultError> {
    let service = seeded_service()?;

    let with_salt_or_pepper = service.search(&SearchRequest {
        include_ingredients: Some(vec!["salt".to_string(), "pepper".to_string()]),
        ..Default::default()
    })?;
    assert_eq!(names(&with_salt_or_pepper), vec!["Roast Chicken", "Fish Tacos"]);

    let without_nuts = service.search(&SearchRequest {
        exclude_ingredients: Some(vec!["nuts".to_string()]),
        ..Default::default()
    })?;
    assert_eq!(
        names(&without_nuts),
        vec!["Tomato Soup", "Roast Chicken", "Fish Tacos", "Plain Rice"]
    );
    Ok(())
}

#[test]
fn test_search_key_combined_with_exclusion() -> Result<(), VaultError> {
    let service = seeded_service()?;
    let found = service.search(&SearchRequest {
        search_key: Some("oven".to_string()),
        exclude_ingredients: Some(vec!["chicken".to_string()]),
        ..Default::default()
    })?;
    assert_eq!(names(&found), vec!["Tomato Soup"]);
    Ok(())
}

#[test]
fn test_create_rejects_ingredient_already_in_catalog() -> Result<(), VaultError> {
    let service = seeded_service()?;
    let response = service.create(recipe("Caprese", true, 2, "Slice", &["mozzarella", "Tomato"]))?;
    assert!(!response.accepted);
    assert_eq!(response.message, "An ingredient named 'tomato' already exists.");
    assert_eq!(service.list_all()?.len(), 5);
    Ok(())
}

#[test]
fn test_update_renaming_onto_existing_name_is_rejected() -> Result<(), VaultError> {
    let service = seeded_service()?;
    let mut rename = recipe("fish tacos", true, 4, "Roast", &[]);
    rename.ingredients.clear();
    let response = service.update(1, rename)?;
    assert!(!response.accepted);
    assert_eq!(response.message, "A recipe named 'fish tacos' already exists.");
    assert_eq!(service.get_by_id(1)?.name, "Tomato Soup");
    Ok(())
}

#[test]
fn test_not_found_is_rendered_by_catalog() {
    let service = empty_service();
    let err = service.get_by_id(12).unwrap_err();
    assert_eq!(service.describe(&err), "Recipe 12 does not exist.");
}

#[test]
fn test_reconcilers_without_store() {
    let fresh = merge_recipe(None, Some(&recipe("Toast", true, 1, "Toast it", &["bread"]))).unwrap();
    assert_eq!(fresh.name, "Toast");
    assert_eq!(fresh.ingredients.len(), 1);
    assert_eq!(fresh.ingredients[0].id, None);

    assert!(merge_ingredients(fresh.ingredients, &[]).is_empty());
}

#[test]
fn test_snapshot_round_trip_keeps_search_results() -> Result<(), Box<dyn std::error::Error>> {
    let service = seeded_service()?;
    let snapshot = VaultSnapshot::capture(service.recipe_store(), service.ingredient_store())?;

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("vault.json");
    std::fs::write(&path, snapshot.to_json()?)?;

    let restored = VaultSnapshot::from_json(&std::fs::read_to_string(&path)?)?;
    let (recipes, _ingredients) = restored.into_stores();
    let predicate = compile(&SearchRequest {
        vegetarian: Some(false),
        ..Default::default()
    });
    let found = recipes.find_all(&predicate)?;
    assert_eq!(names(&found), vec!["Roast Chicken", "Fish Tacos"]);
    Ok(())
}
