pub mod entities;
pub mod pool;

#[cfg(feature = "ssr")]
pub mod account_repository;
#[cfg(feature = "ssr")]
pub mod content_repository;
#[cfg(feature = "ssr")]
pub mod moderation_repository;
#[cfg(feature = "ssr")]
pub mod repository;
