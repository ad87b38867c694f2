//! Shakwa server library.
//!
//! This crate provides the complaint intake and admin dashboard
//! functionality as a library, allowing it to be tested and reused
//! from the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod forms;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
