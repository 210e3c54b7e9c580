//! Core business logic for Kasbook.
//!
//! This crate contains pure business logic with ZERO web or database
//! dependencies. All domain types, validation rules, and calculations live
//! here.
//!
//! # Modules
//!
//! - `ledger` - Transaction and category domain types with validation
//! - `reports` - The aggregation engine: totals, net income, time series
//! - `policy` - Role-based access predicates for the presentation layer
//! - `auth` - Password hashing and sign-up form validation

pub mod auth;
pub mod ledger;
pub mod policy;
pub mod reports;
