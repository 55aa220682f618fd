pub mod catalog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod messages;
pub mod reconcile;
pub mod search;
pub mod service;
pub mod store;
pub mod validation;
