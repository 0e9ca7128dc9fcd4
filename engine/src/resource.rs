//! Resource kinds and the documents stored for them.
//!
//! Every user owns exactly one stored document per [`ResourceKind`]. The
//! remote store keeps the document as text; [`ResourceDocument::decode`]
//! turns that text into the typed shape for its kind.
//!
//! Defaults live here and nowhere else. Both the sync fallback (no stored
//! document) and container initial state are built from
//! [`ResourceKind::default_document`] or the `Default` impls it delegates to.

use crate::error::{Error, Result};
use crate::ledger::SaleRecord;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Expense categories every new account starts with.
pub const DEFAULT_EXPENSE_CATEGORIES: [&str; 8] = [
    "Rent",
    "Salaries",
    "Utilities",
    "Supplies",
    "Marketing",
    "Insurance",
    "Maintenance",
    "Other",
];

/// Owned copy of [`DEFAULT_EXPENSE_CATEGORIES`].
pub fn default_expense_categories() -> Vec<String> {
    DEFAULT_EXPENSE_CATEGORIES
        .iter()
        .map(|c| c.to_string())
        .collect()
}

/// Treat an explicit `null` the same as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn categories_or_default<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?
        .unwrap_or_else(default_expense_categories))
}

/// Decode a sales list, dropping entries that are not sale objects.
fn sales_or_default<'de, D>(deserializer: D) -> std::result::Result<Vec<SaleRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(entries
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect())
}

/// The five data domains synchronized per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceKind {
    Inventory,
    Sales,
    Purchases,
    Expenses,
    UserProfile,
}

impl ResourceKind {
    /// All kinds, in synchronization order.
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Inventory,
        ResourceKind::Sales,
        ResourceKind::Purchases,
        ResourceKind::Expenses,
        ResourceKind::UserProfile,
    ];

    /// Stable wire name of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Inventory => "inventory",
            ResourceKind::Sales => "sales",
            ResourceKind::Purchases => "purchases",
            ResourceKind::Expenses => "expenses",
            ResourceKind::UserProfile => "userProfile",
        }
    }

    /// The document a user has before anything was ever stored for this kind.
    pub fn default_document(self) -> ResourceDocument {
        match self {
            ResourceKind::Inventory => ResourceDocument::Inventory(InventoryDocument::default()),
            ResourceKind::Sales => ResourceDocument::Sales(SalesDocument::default()),
            ResourceKind::Purchases => ResourceDocument::Purchases(PurchasesDocument::default()),
            ResourceKind::Expenses => ResourceDocument::Expenses(ExpensesDocument::default()),
            ResourceKind::UserProfile => {
                ResourceDocument::UserProfile(UserProfileDocument::default())
            }
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ResourceKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::UnknownResourceKind(s.to_string()))
    }
}

/// Stored inventory: the product catalogue.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub products: Vec<Value>,
}

/// Stored sales history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesDocument {
    #[serde(default, deserialize_with = "sales_or_default")]
    pub sales: Vec<SaleRecord>,
    /// Aggregate as last persisted. Never trusted on load; the ledger recomputes it.
    #[serde(default, deserialize_with = "null_as_default")]
    pub today_total: f64,
}

/// Stored purchase orders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchasesDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub purchases: Vec<Value>,
}

/// Stored expenses along with the user's category list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpensesDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub expenses: Vec<Value>,
    #[serde(
        default = "default_expense_categories",
        deserialize_with = "categories_or_default"
    )]
    pub categories: Vec<String>,
}

impl Default for ExpensesDocument {
    fn default() -> Self {
        Self {
            expenses: Vec::new(),
            categories: default_expense_categories(),
        }
    }
}

/// Stored user profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub settings: Map<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile_picture_url: String,
}

/// A decoded document tagged with the kind it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceDocument {
    Inventory(InventoryDocument),
    Sales(SalesDocument),
    Purchases(PurchasesDocument),
    Expenses(ExpensesDocument),
    UserProfile(UserProfileDocument),
}

impl ResourceDocument {
    /// The kind this document belongs to.
    pub fn kind(&self) -> ResourceKind {
        match self {
            ResourceDocument::Inventory(_) => ResourceKind::Inventory,
            ResourceDocument::Sales(_) => ResourceKind::Sales,
            ResourceDocument::Purchases(_) => ResourceKind::Purchases,
            ResourceDocument::Expenses(_) => ResourceKind::Expenses,
            ResourceDocument::UserProfile(_) => ResourceKind::UserProfile,
        }
    }

    /// Decode the stored textual form of a document.
    ///
    /// Returns `Ok(None)` when the stored payload is JSON `null`; there is
    /// nothing to apply in that case. Any other non-object payload (a bare
    /// array, a number) is an [`Error::InvalidDocument`].
    pub fn decode(kind: ResourceKind, text: &str) -> Result<Option<Self>> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| Error::invalid_document(kind, e))?;
        Self::from_value(kind, value)
    }

    /// Build a document from an already parsed JSON value.
    pub fn from_value(kind: ResourceKind, value: Value) -> Result<Option<Self>> {
        if value.is_null() {
            return Ok(None);
        }
        if !value.is_object() {
            return Err(Error::invalid_document(kind, "payload is not an object"));
        }

        let document = match kind {
            ResourceKind::Inventory => ResourceDocument::Inventory(parse(kind, value)?),
            ResourceKind::Sales => ResourceDocument::Sales(parse(kind, value)?),
            ResourceKind::Purchases => ResourceDocument::Purchases(parse(kind, value)?),
            ResourceKind::Expenses => ResourceDocument::Expenses(parse(kind, value)?),
            ResourceKind::UserProfile => ResourceDocument::UserProfile(parse(kind, value)?),
        };
        Ok(Some(document))
    }

    /// Convert to a JSON value.
    pub fn to_value(&self) -> Result<Value> {
        let kind = self.kind();
        let value = match self {
            ResourceDocument::Inventory(doc) => serde_json::to_value(doc),
            ResourceDocument::Sales(doc) => serde_json::to_value(doc),
            ResourceDocument::Purchases(doc) => serde_json::to_value(doc),
            ResourceDocument::Expenses(doc) => serde_json::to_value(doc),
            ResourceDocument::UserProfile(doc) => serde_json::to_value(doc),
        };
        value.map_err(|e| Error::invalid_document(kind, e))
    }

    /// Encode to the textual form kept by the remote store.
    pub fn encode(&self) -> Result<String> {
        let value = self.to_value()?;
        serde_json::to_string(&value).map_err(|e| Error::invalid_document(self.kind(), e))
    }
}

fn parse<T: serde::de::DeserializeOwned>(kind: ResourceKind, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::invalid_document(kind, e))
}
