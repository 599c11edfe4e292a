pub mod connection;
pub mod jobs;
pub mod properties;
pub mod refreshes;

pub use connection::{init_db, Database};
