pub mod auth;
pub mod cascade;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod ownership;
pub mod routes;
pub mod seed;
pub mod state;
