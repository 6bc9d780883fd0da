//! SQLite-backed storage for screens, maintenance events and monthly expenses.

pub mod db;
pub mod models;
pub mod repository;

pub use db::ScreenDb;
