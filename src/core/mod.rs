pub mod booking;
pub mod config;
pub mod handler;
pub mod models;
