//! `automations` crate — the automation catalog consumed by automated-step
//! nodes.
//!
//! The simulator never consults the catalog. It exists for whoever configures
//! automated nodes: it lists the available actions and the parameter names
//! each one needs.

pub mod error;
pub mod traits;
pub mod builtin;
pub mod configure;
pub mod mock;

pub use error::CatalogError;
pub use traits::{AutomationAction, AutomationCatalog};
pub use builtin::BuiltinCatalog;
pub use configure::{apply_action, find_action, missing_parameters};
