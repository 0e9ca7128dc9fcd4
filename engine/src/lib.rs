//! # Shopbook Engine
//!
//! State containers for a small business bookkeeping app: inventory, sales,
//! purchases, expenses and the user profile.
//!
//! ## Design Principles
//!
//! - **No IO**: fetching documents is the client's job; the engine only
//!   decodes them and applies them to containers
//! - **Owned invariants**: each container protects its own derived state;
//!   the sales ledger recomputes its daily total after every mutation
//! - **One source of defaults**: [`ResourceKind::default_document`] is the
//!   only place default documents are defined
//!
//! ## Core Concepts
//!
//! ### Resources
//!
//! Each user has one stored document per [`ResourceKind`]. A stored document
//! is decoded into a [`ResourceDocument`], which a [`StateSink`] routes to the
//! matching container-update operation.
//!
//! ### Sales Ledger
//!
//! [`SalesLedger`] keeps sales in insertion order and maintains
//! `today_total`, the sum of all sales whose business date is today.
//!
//! ## Quick Start
//!
//! ```rust
//! use shopbook_engine::{AppState, ResourceKind, SaleDraft, StateSink};
//!
//! let mut state = AppState::new();
//!
//! // Nothing stored yet for this user: apply the default documents.
//! for kind in ResourceKind::ALL {
//!     state.apply_document(kind.default_document());
//! }
//! assert_eq!(state.expenses.categories.len(), 8);
//!
//! // Record a sale for today.
//! let today = chrono::Local::now().date_naive().format("%Y-%m-%d").to_string();
//! state.sales.add_sale(SaleDraft::new(today, 25.5));
//! assert_eq!(state.sales.today_total(), 25.5);
//!
//! // Sign out.
//! state.teardown();
//! assert!(state.sales.is_empty());
//! ```

pub mod containers;
pub mod error;
pub mod ledger;
pub mod resource;
pub mod session;
pub mod sink;
pub mod state;

// Re-export main types at crate root
pub use containers::{ExpenseState, InventoryState, PurchaseState, UserState};
pub use error::{Error, Result};
pub use ledger::{
    generate_sale_id, parse_business_date, today_total, SaleDraft, SaleRecord, SalesLedger,
};
pub use resource::{
    default_expense_categories, ExpensesDocument, InventoryDocument, PurchasesDocument,
    ResourceDocument, ResourceKind, SalesDocument, UserProfileDocument,
    DEFAULT_EXPENSE_CATEGORIES,
};
pub use session::{SessionState, SessionUser, SyncPhase, SYNC_FAILED_MESSAGE};
pub use sink::StateSink;
pub use state::{AppState, StateDomain};

/// Identifier of the authenticated principal.
pub type UserId = String;
