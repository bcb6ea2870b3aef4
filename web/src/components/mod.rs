pub mod error;
pub mod filter_panel;
pub mod loading;
pub mod location_search;
pub mod navbar;
pub mod reviews;
