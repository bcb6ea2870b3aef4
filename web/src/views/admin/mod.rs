pub mod applications;
pub mod dashboard;
pub mod pending_changes;
pub mod reviews;
pub mod settings;
pub mod sponsors;
pub mod users;

pub use dashboard::AdminDashboard;
