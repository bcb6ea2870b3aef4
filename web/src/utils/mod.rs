pub mod auth;
pub mod geolocation;
pub mod security;
pub mod slug;
pub mod stale;

#[cfg(feature = "ssr")]
pub mod tokens;
#[cfg(feature = "ssr")]
pub mod uploads;
