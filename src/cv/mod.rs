//! CV generation: records, their store, the tracker and the HTTP routes.

pub mod model;
pub mod routes;
pub mod store;
pub mod tracker;

pub use store::{GenerationStore, InMemoryGenerationStore};
pub use tracker::{GenerationTracker, TrackerError};
