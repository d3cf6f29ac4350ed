//! core
//!
//! Core domain types and configuration for Slideway.
//!
//! # Modules
//!
//! - [`types`] - Strong types: RoutePath, Direction
//! - [`routes`] - The ordered route table and direction rules
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Schemas are strict and self-describing
//! - Direction is a pure function of the route table

pub mod config;
pub mod routes;
pub mod types;
