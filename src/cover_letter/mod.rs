//! Cover letters: stored records, PDF downloads and one-off custom renderings.

pub mod model;
pub mod routes;
pub mod service;
pub mod store;

pub use service::{CoverLetterError, CoverLetterService};
pub use store::{CoverLetterStore, InMemoryCoverLetterStore};
