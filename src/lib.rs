//! BBPS Insurance Premium Payment API Library
//!
//! This library provides the core functionality for the insurance premium
//! payment service: a thin proxy over the BBPS billing aggregator, response
//! normalization, the four-step payment wizard session, and the payment
//! verification viewer.
//!
//! # Modules
//!
//! - `aggregator`: Billing aggregator HTTP client.
//! - `config`: Configuration management.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `models`: Core data models.
//! - `normalize`: Upstream response normalization.
//! - `verification`: Payment verification viewer.
//! - `wizard`: Premium payment wizard state machine.

pub mod aggregator;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod normalize;
pub mod verification;
pub mod wizard;
