//! Application services layer: the list-view controller and its collaborators.

pub mod controller;
pub mod filters;
pub mod pagination;
pub mod prefs;
pub mod sources;
