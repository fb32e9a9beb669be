//! Recipe catalog providers.
//!
//! `AppState` holds an `Arc<dyn RecipeCatalog>`; the planner only ever reads from it.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::errors::AppError;
use crate::models::recipe::{Recipe, RecipeRow};
use crate::recipes::sample::sample_recipes;
use crate::recipes::search::{search_recipes, SearchFilters, SEARCH_LIMIT};

#[async_trait]
pub trait RecipeCatalog: Send + Sync {
    /// Every recipe, in catalog order.
    async fn all(&self) -> Result<Vec<Recipe>, AppError>;

    async fn find(&self, id: i64) -> Result<Option<Recipe>, AppError>;

    async fn search(&self, filters: &SearchFilters) -> Result<Vec<Recipe>, AppError> {
        Ok(search_recipes(&self.all().await?, filters))
    }
}

/// Fixed in-memory catalog. Used for the built-in samples and for test fixtures.
pub struct StaticCatalog {
    recipes: Vec<Recipe>,
}

impl StaticCatalog {
    pub fn new(recipes: Vec<Recipe>) -> Self {
        Self { recipes }
    }

    pub fn sample() -> Self {
        Self::new(sample_recipes())
    }
}

#[async_trait]
impl RecipeCatalog for StaticCatalog {
    async fn all(&self) -> Result<Vec<Recipe>, AppError> {
        Ok(self.recipes.clone())
    }

    async fn find(&self, id: i64) -> Result<Option<Recipe>, AppError> {
        Ok(self.recipes.iter().find(|r| r.id == id).cloned())
    }
}

/// Catalog backed by the `recipes` table.
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const RECIPE_COLUMNS: &str =
    "SELECT id, title, category, difficulty, cooking_time, ingredients, nutrition FROM recipes";

#[async_trait]
impl RecipeCatalog for PgCatalog {
    async fn all(&self) -> Result<Vec<Recipe>, AppError> {
        let rows = sqlx::query_as::<_, RecipeRow>(&format!("{RECIPE_COLUMNS} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    async fn find(&self, id: i64) -> Result<Option<Recipe>, AppError> {
        let row = sqlx::query_as::<_, RecipeRow>(&format!("{RECIPE_COLUMNS} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Recipe::from))
    }

    async fn search(&self, filters: &SearchFilters) -> Result<Vec<Recipe>, AppError> {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new(RECIPE_COLUMNS);
        query.push(" WHERE TRUE");

        if let Some(q) = filters.query.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            query
                .push(" AND (title ILIKE ")
                .push_bind(format!("%{q}%"))
                .push(" OR EXISTS (SELECT 1 FROM unnest(ingredients) AS i WHERE i ILIKE ")
                .push_bind(format!("%{q}%"))
                .push("))");
        }
        if let Some(category) = &filters.category {
            query.push(" AND category = ").push_bind(category.clone());
        }
        if let Some(difficulty) = &filters.difficulty {
            query.push(" AND difficulty = ").push_bind(difficulty.clone());
        }
        if let Some(max_time) = filters.max_time {
            query
                .push(" AND cooking_time <= ")
                .push_bind(i32::try_from(max_time).unwrap_or(i32::MAX));
        }
        query
            .push(" ORDER BY id LIMIT ")
            .push_bind(SEARCH_LIMIT as i64);

        let rows = query
            .build_query_as::<RecipeRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Recipe::from).collect())
    }
}
