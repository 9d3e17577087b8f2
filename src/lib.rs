//! Song catalog with interchangeable search and sort strategies.
//!
//! The [`engine`] module holds the algorithms and is free of I/O. [`catalog`]
//! owns the songs, playlists and hash index and dispatches to the engine;
//! [`store`], [`menu`] and [`display`] are the console and file glue around it.

pub mod catalog;
pub mod config;
pub mod display;
pub mod engine;
pub mod menu;
pub mod models;
pub mod store;
