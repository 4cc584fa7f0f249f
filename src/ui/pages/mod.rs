//! Application pages module
//!
//! - Home page
//! - Login page
//! - Dashboard (dispatched on the user's role)

mod dashboard;
mod home;
mod login;
mod not_found;

pub use dashboard::DashboardPage;
pub use home::HomePage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
