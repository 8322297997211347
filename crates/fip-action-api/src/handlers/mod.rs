//! Route handlers.

pub mod action;
pub mod health;
pub mod index;
