//! Marquee is the client-side core of the administrative console for a media
//! publishing backend (articles, theater and OTT releases, image galleries).
//!
//! The crate owns list-view state: the fetched collection, the active filter
//! set, and pagination. It decides whether filtering and paging happen
//! server-side (via re-fetch) or client-side (via local slicing), keeps the
//! visible slice consistent with both, and discards stale fetch responses so
//! a slow request can never overwrite a newer one. Rendering is left to the
//! embedding UI; the controller exposes snapshots for it to draw.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;

pub use application::controller::{ListSnapshot, ListViewController};
