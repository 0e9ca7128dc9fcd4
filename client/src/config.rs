//! Configuration management for the client.

use shopbook_engine::ResourceKind;
use std::env;

/// Collection ids in the document database, one per resource kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionIds {
    pub inventory: String,
    pub sales: String,
    pub purchases: String,
    pub expenses: String,
    pub users: String,
}

impl CollectionIds {
    /// Collection id for a resource kind.
    pub fn get(&self, kind: ResourceKind) -> &str {
        match kind {
            ResourceKind::Inventory => &self.inventory,
            ResourceKind::Sales => &self.sales,
            ResourceKind::Purchases => &self.purchases,
            ResourceKind::Expenses => &self.expenses,
            ResourceKind::UserProfile => &self.users,
        }
    }
}

impl Default for CollectionIds {
    /// Each collection named after its kind.
    fn default() -> Self {
        Self {
            inventory: ResourceKind::Inventory.as_str().to_string(),
            sales: ResourceKind::Sales.as_str().to_string(),
            purchases: ResourceKind::Purchases.as_str().to_string(),
            expenses: ResourceKind::Expenses.as_str().to_string(),
            users: ResourceKind::UserProfile.as_str().to_string(),
        }
    }
}

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the document store REST API
    pub endpoint: String,
    /// Project the database belongs to
    pub project_id: String,
    /// Server API key, if requests are not made with a user session
    pub api_key: Option<String>,
    /// Database holding the per-user collections
    pub database_id: String,
    pub collections: CollectionIds,
}

impl Config {
    /// Configuration with default collection ids and no API key.
    pub fn new(
        endpoint: impl Into<String>,
        project_id: impl Into<String>,
        database_id: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            project_id: project_id.into(),
            api_key: None,
            database_id: database_id.into(),
            collections: CollectionIds::default(),
        }
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let endpoint = required("DOCUMENT_STORE_ENDPOINT")?;
        let project_id = required("DOCUMENT_STORE_PROJECT_ID")?;
        let database_id = required("DATABASE_ID")?;
        let api_key = env::var("DOCUMENT_STORE_API_KEY")
            .ok()
            .filter(|key| !key.is_empty());

        let defaults = CollectionIds::default();
        let collections = CollectionIds {
            inventory: env::var("INVENTORY_COLLECTION").unwrap_or(defaults.inventory),
            sales: env::var("SALES_COLLECTION").unwrap_or(defaults.sales),
            purchases: env::var("PURCHASES_COLLECTION").unwrap_or(defaults.purchases),
            expenses: env::var("EXPENSES_COLLECTION").unwrap_or(defaults.expenses),
            users: env::var("USERS_COLLECTION").unwrap_or(defaults.users),
        };

        Ok(Self {
            endpoint,
            project_id,
            api_key,
            database_id,
            collections,
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::Missing(name)),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    Missing(&'static str),
}
