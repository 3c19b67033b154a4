// Crate root library declaration and module exports.
pub mod config;
pub mod error;
pub mod model;
pub mod store;

pub use config::Config;
pub use error::Error;
pub use store::BoardStore;
