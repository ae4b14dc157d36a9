use std::collections::{HashMap, HashSet};

use chrono::Utc;
use sea_orm::{DatabaseTransaction, QueryFilter, QueryOrder, prelude::*};

use crate::{Category, ResultEngine, categories};

use super::{Engine, INSERT_CHUNK, with_tx};

impl Engine {
    /// Resolves every title to its category, creating the missing ones.
    ///
    /// Duplicated titles are resolved once; resolving a title that already
    /// exists never creates a second category.
    pub async fn resolve_categories(
        &self,
        titles: &[&str],
    ) -> ResultEngine<HashMap<String, Category>> {
        with_tx!(self, |db_tx| Self::resolve_categories_in(&db_tx, titles).await)
    }

    /// Lists all categories ordered by title.
    pub async fn categories(&self) -> ResultEngine<Vec<Category>> {
        let models = categories::Entity::find()
            .order_by_asc(categories::Column::Title)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Category::from).collect())
    }

    pub(super) async fn resolve_categories_in(
        db_tx: &DatabaseTransaction,
        titles: &[&str],
    ) -> ResultEngine<HashMap<String, Category>> {
        if titles.is_empty() {
            return Ok(HashMap::new());
        }

        // First occurrence wins so creation order follows the input.
        let mut seen = HashSet::new();
        let distinct: Vec<&str> = titles
            .iter()
            .copied()
            .filter(|title| seen.insert(*title))
            .collect();

        let mut resolved: HashMap<String, Category> = HashMap::with_capacity(distinct.len());
        for chunk in distinct.chunks(INSERT_CHUNK) {
            let existing = categories::Entity::find()
                .filter(categories::Column::Title.is_in(chunk.iter().copied()))
                .all(db_tx)
                .await?;
            resolved.extend(
                existing
                    .into_iter()
                    .map(|model| (model.title.clone(), Category::from(model))),
            );
        }

        let missing: Vec<&str> = distinct
            .into_iter()
            .filter(|title| !resolved.contains_key(*title))
            .collect();

        if missing.is_empty() {
            return Ok(resolved);
        }

        let created_at = Utc::now();
        let created: Vec<Category> = missing
            .into_iter()
            .map(|title| Category::new(title, created_at))
            .collect();

        for chunk in created.chunks(INSERT_CHUNK) {
            categories::Entity::insert_many(chunk.iter().map(categories::ActiveModel::from))
                .exec(db_tx)
                .await?;
        }
        tracing::debug!(count = created.len(), "created categories");

        resolved.extend(
            created
                .into_iter()
                .map(|category| (category.title.clone(), category)),
        );

        Ok(resolved)
    }
}
