//! Data model, mock data provider, and selection state for branchlens.

pub mod backend;
pub mod dataset;
pub mod diff;
pub mod edge_cases;
pub mod error;
pub mod pager;
pub mod session;
pub mod store;
pub mod types;

pub use backend::{Backend, MockBackend};
pub use dataset::Dataset;
pub use error::{DatasetError, FetchError};
pub use session::Session;
pub use store::{SelectionState, SelectionStore};
