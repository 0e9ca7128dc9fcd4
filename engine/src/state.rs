//! Application state - every container for one signed-in user.

use crate::containers::{ExpenseState, InventoryState, PurchaseState, UserState};
use crate::ledger::{SaleRecord, SalesLedger};
use crate::resource::ExpensesDocument;
use crate::session::SessionState;
use crate::sink::StateSink;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// State domains reset by [`AppState::teardown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StateDomain {
    Session,
    Sales,
    Inventory,
    Purchases,
    Expenses,
    Profile,
    SessionCache,
}

impl StateDomain {
    pub const ALL: [StateDomain; 7] = [
        StateDomain::Session,
        StateDomain::Sales,
        StateDomain::Inventory,
        StateDomain::Purchases,
        StateDomain::Expenses,
        StateDomain::Profile,
        StateDomain::SessionCache,
    ];
}

/// All containers, owned together.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub session: SessionState,
    pub inventory: InventoryState,
    pub sales: SalesLedger,
    pub purchases: PurchaseState,
    pub expenses: ExpenseState,
    pub user: UserState,
    /// Scratch values that live only as long as the session
    session_cache: BTreeMap<String, String>,
}

impl AppState {
    /// Fresh state with every container at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a value until the session ends.
    pub fn cache_put(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.session_cache.insert(key.into(), value.into());
    }

    pub fn cache_get(&self, key: &str) -> Option<&str> {
        self.session_cache.get(key).map(String::as_str)
    }

    /// Session teardown on sign-out.
    ///
    /// Resets each domain in [`StateDomain::ALL`] and returns the list.
    pub fn teardown(&mut self) -> Vec<StateDomain> {
        for domain in StateDomain::ALL {
            self.reset(domain);
        }
        StateDomain::ALL.to_vec()
    }

    fn reset(&mut self, domain: StateDomain) {
        match domain {
            StateDomain::Session => self.session.clear_user(),
            StateDomain::Sales => self.sales.clear_sales(),
            StateDomain::Inventory => self.inventory = InventoryState::default(),
            StateDomain::Purchases => self.purchases = PurchaseState::default(),
            StateDomain::Expenses => self.expenses = ExpenseState::default(),
            StateDomain::Profile => self.user = UserState::default(),
            StateDomain::SessionCache => self.session_cache.clear(),
        }
    }
}

impl StateSink for AppState {
    fn set_products(&mut self, products: Vec<Value>) {
        self.inventory.set_products(products);
    }

    fn load_sales(&mut self, sales: Vec<SaleRecord>) {
        self.sales.load_sales(sales);
    }

    fn set_purchases(&mut self, purchases: Vec<Value>) {
        self.purchases.set_purchases(purchases);
    }

    fn set_expenses(&mut self, expenses: ExpensesDocument) {
        self.expenses.set_expenses(expenses);
    }

    fn update_profile_picture_url(&mut self, url: String) {
        self.user.update_profile_picture_url(url);
    }

    fn sync_started(&mut self) {
        self.session.begin_sync();
    }

    fn sync_finished(&mut self, success: bool) {
        self.session.finish_sync(success);
    }
}
