//! API Gateway handlers and request processing

pub mod auth;
pub mod booking;
pub mod events;
pub mod fields;
pub mod hello;
pub mod helpers;
pub mod parsing;
pub mod reservations;
pub mod tables;
pub mod weather;
