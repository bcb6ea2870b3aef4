pub mod dashboard;

pub use dashboard::OwnerDashboard;

/// Where the owner dashboard lives. `/owner` is kept as a short alias; links
/// always target this path.
pub const OWNER_DASHBOARD_PATH: &str = "/venue-owner/dashboard";

#[cfg(test)]
mod tests {
    use super::OWNER_DASHBOARD_PATH;

    #[test]
    fn dashboard_links_point_at_the_mounted_route() {
        assert_eq!(OWNER_DASHBOARD_PATH, "/venue-owner/dashboard");
    }
}
