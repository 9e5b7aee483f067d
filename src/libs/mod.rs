//! Core library modules shared by the storage layer and the menus.
//!
//! - Infrastructure: [`config`], [`data_storage`], [`error`], [`messages`]
//! - Domain services: [`auth`], [`indicator`]
//! - Console output: [`formatter`], [`view`]

pub mod auth;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod formatter;
pub mod indicator;
pub mod messages;
pub mod view;
