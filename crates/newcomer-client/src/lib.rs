pub mod client;
pub mod error;
pub mod loader;
pub(crate) mod retry;
pub mod types;

pub use client::DirectoryClient;
pub use error::ClientError;
pub use loader::{load_catalog, load_saved_locations, refresh_options};
