//! Repository layer for database operations

pub mod inventory;
