//! Client-side logic for a marketplace of surplus homemade food.
//!
//! The interesting part is [`pipeline::build_view`], which aggregates ratings and
//! filters and sorts listings for the browse page. Around it sit the submission
//! models, the payment and geocoding glue in [`modules`], and [`feed`], which
//! connects the pipeline to the backend's pushed updates.

pub mod common;
pub mod config;
pub mod error;
pub mod feed;
pub mod models;
pub mod modules;
pub mod pipeline;

pub use chrono;
