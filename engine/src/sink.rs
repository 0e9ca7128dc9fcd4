//! The update surface synchronization writes into.

use crate::ledger::SaleRecord;
use crate::resource::{ExpensesDocument, ResourceDocument};
use serde_json::Value;

/// Container-update operations, one per resource kind, plus lifecycle hooks.
///
/// Each update replaces the prior contents of its container. Containers own
/// their state and any derived aggregates; callers only hand over values.
pub trait StateSink {
    /// Replace the product catalogue.
    fn set_products(&mut self, products: Vec<Value>);

    /// Replace the sales history.
    fn load_sales(&mut self, sales: Vec<SaleRecord>);

    /// Replace the purchase orders.
    fn set_purchases(&mut self, purchases: Vec<Value>);

    /// Replace expenses and categories together.
    fn set_expenses(&mut self, expenses: ExpensesDocument);

    /// Replace the profile picture URL.
    fn update_profile_picture_url(&mut self, url: String);

    /// Called once before any resource is fetched.
    fn sync_started(&mut self) {}

    /// Called once after every resolved resource has been dispatched.
    fn sync_finished(&mut self, _success: bool) {}

    /// Route a decoded document to the update operation for its kind.
    fn apply_document(&mut self, document: ResourceDocument) {
        match document {
            ResourceDocument::Inventory(doc) => self.set_products(doc.products),
            ResourceDocument::Sales(doc) => self.load_sales(doc.sales),
            ResourceDocument::Purchases(doc) => self.set_purchases(doc.purchases),
            ResourceDocument::Expenses(doc) => self.set_expenses(doc),
            ResourceDocument::UserProfile(doc) => {
                self.update_profile_picture_url(doc.profile_picture_url)
            }
        }
    }
}
