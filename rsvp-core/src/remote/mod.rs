//! The spreadsheet-backed remote store.

pub mod row;
mod store;

pub use store::{HttpRemoteStore, RemoteStore};
