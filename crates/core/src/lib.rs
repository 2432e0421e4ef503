//! Core analysis logic for Comparo.
//!
//! This crate contains pure business logic with ZERO file or terminal dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `comparison` - Two-period account comparison, classification and rankings

pub mod comparison;
