//! Dreamcatcher booking service.
//!
//! A REST API for a wedding-photography business: access keys gate the
//! booking form, each booking gets a unique 4-digit client code that the
//! client later logs in with, and administrators manage bookings and keys.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Database**: PostgreSQL with sqlx (async queries)
//! - **Authentication**: bcrypt password hashes, HS256 JWTs in two separate
//!   domains (client and admin)
//! - **Format**: JSON requests/responses

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;
pub mod state;
