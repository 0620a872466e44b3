pub mod auction;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod repository;
