mod client;
mod directory_error;

pub use client::DirectoryClient;
pub use directory_error::DirectoryError;
