//! Sizehint: Image Width Resolution
//!
//! Decides which pixel width a storefront image will be displayed at and
//! stamps it onto the image URL as a `w=<width>` query parameter, so an
//! image-resizing CDN can serve an appropriately sized rendition.

pub mod adapters;
pub mod annotate;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod resolver;
pub mod rules;
pub mod types;
pub mod view_config;
