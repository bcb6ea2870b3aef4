pub mod account;
pub mod admin;
pub mod auth;
pub mod content_page;
pub mod directory;
pub mod home;
pub mod join;
pub mod map;
pub mod not_found;
pub mod qr;
pub mod venue_owner;
