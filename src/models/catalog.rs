//! Read-only reference data: cities and their bookable activities.
//! Rows are created by the seeder only and never mutated by the API.

use serde::{Deserialize, Serialize};
use sqlx::{FromRow, QueryBuilder, Sqlite};

use crate::{db::DbPool, error::AppError};

/// Reference lists are capped; user-owned lists are not.
const RESULT_CAP: i64 = 50;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct City {
    pub id: String,
    pub name: String,
    pub country: String,
    pub region: Option<String>,
    pub cost_index: i64,
    pub popularity: i64,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Activity {
    pub id: String,
    pub name: String,
    pub city_id: String,
    pub category: String,
    pub cost: f64,
    pub duration: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CityFilter {
    pub search: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ActivityFilter {
    pub city_id: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
}

impl City {
    pub async fn find_by_id(db: &DbPool, id: &str) -> Result<Option<City>, AppError> {
        let city = sqlx::query_as::<_, City>("SELECT * FROM cities WHERE id = ?")
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(city)
    }

    pub async fn list(db: &DbPool, filter: &CityFilter) -> Result<Vec<City>, AppError> {
        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT * FROM cities WHERE 1 = 1");
        if let Some(search) = &filter.search {
            // SQLite LIKE is case-insensitive for ASCII.
            query.push(" AND name LIKE ");
            query.push_bind(format!("%{search}%"));
        }
        if let Some(country) = &filter.country {
            query.push(" AND country = ");
            query.push_bind(country);
        }
        query.push(" LIMIT ");
        query.push_bind(RESULT_CAP);

        let cities = query.build_query_as::<City>().fetch_all(db).await?;
        Ok(cities)
    }
}

impl Activity {
    pub async fn find_by_id(db: &DbPool, id: &str) -> Result<Option<Activity>, AppError> {
        let activity = sqlx::query_as::<_, Activity>("SELECT * FROM activities WHERE id = ?")
            .bind(id)
            .fetch_optional(db)
            .await?;
        Ok(activity)
    }

    pub async fn list(db: &DbPool, filter: &ActivityFilter) -> Result<Vec<Activity>, AppError> {
        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT * FROM activities WHERE 1 = 1");
        if let Some(city_id) = &filter.city_id {
            query.push(" AND city_id = ");
            query.push_bind(city_id);
        }
        if let Some(category) = &filter.category {
            query.push(" AND category = ");
            query.push_bind(category);
        }
        if let Some(search) = &filter.search {
            query.push(" AND name LIKE ");
            query.push_bind(format!("%{search}%"));
        }
        query.push(" LIMIT ");
        query.push_bind(RESULT_CAP);

        let activities = query.build_query_as::<Activity>().fetch_all(db).await?;
        Ok(activities)
    }
}
