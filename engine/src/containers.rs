//! State containers for the non-sales resource kinds.

use crate::resource::{ExpensesDocument, InventoryDocument, PurchasesDocument};
use serde::Serialize;
use serde_json::Value;

/// Product catalogue.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryState {
    pub products: Vec<Value>,
}

impl InventoryState {
    pub fn set_products(&mut self, products: Vec<Value>) {
        self.products = products;
    }

    pub fn snapshot(&self) -> InventoryDocument {
        InventoryDocument {
            products: self.products.clone(),
        }
    }
}

/// Purchase orders.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseState {
    pub purchases: Vec<Value>,
}

impl PurchaseState {
    pub fn set_purchases(&mut self, purchases: Vec<Value>) {
        self.purchases = purchases;
    }

    pub fn snapshot(&self) -> PurchasesDocument {
        PurchasesDocument {
            purchases: self.purchases.clone(),
        }
    }
}

/// Expenses and the categories they are filed under.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseState {
    pub expenses: Vec<Value>,
    pub categories: Vec<String>,
}

impl Default for ExpenseState {
    fn default() -> Self {
        Self::from(ExpensesDocument::default())
    }
}

impl From<ExpensesDocument> for ExpenseState {
    fn from(doc: ExpensesDocument) -> Self {
        Self {
            expenses: doc.expenses,
            categories: doc.categories,
        }
    }
}

impl ExpenseState {
    /// Whole-object replace, categories included.
    pub fn set_expenses(&mut self, doc: ExpensesDocument) {
        *self = Self::from(doc);
    }

    pub fn snapshot(&self) -> ExpensesDocument {
        ExpensesDocument {
            expenses: self.expenses.clone(),
            categories: self.categories.clone(),
        }
    }
}

/// Profile data shown in the app chrome.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserState {
    pub profile_picture_url: String,
}

impl UserState {
    pub fn update_profile_picture_url(&mut self, url: String) {
        self.profile_picture_url = url;
    }
}
