//! Libris application library
//!
//! The books and read-books modules, their storage adapters, and the input
//! validation rules they share.
#![recursion_limit = "256"]

pub mod modules;
pub mod validation;

pub use modules::{register_all, Repositories};
