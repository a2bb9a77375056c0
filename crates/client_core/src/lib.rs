//! Client-side core for the reporting dashboard and storefront: session
//! lifecycle, the all-or-nothing dashboard fetch fan-out, the geo
//! drill-down hierarchy, and the cart/notification state machines.
//! Rendering, routing, and the remote API itself live elsewhere.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod geo;
pub mod notifications;
pub mod orchestrator;
pub mod report;
pub mod session;
mod transport;

pub use cart::{CartLine, CartManager, CheckoutReceipt};
pub use catalog::StorefrontClient;
pub use error::{AuthError, FetchError, OrchestrationError, RegisterError};
pub use geo::{build_geo_hierarchy, TreemapNode};
pub use notifications::{Notification, NotificationCenter, Severity};
pub use orchestrator::{DashboardSnapshot, DataOrchestrator, FetchOutcome};
pub use session::{
    CredentialStore, MemoryCredentialStore, SessionEvent, SessionGuard, SessionManager,
    SqliteCredentialStore,
};
