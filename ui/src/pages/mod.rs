pub mod dashboard;
pub mod hierarchy;
pub mod login;
pub mod node_questions;
pub mod not_found;

pub use dashboard::DashboardPage;
pub use hierarchy::HierarchyPage;
pub use login::LoginPage;
pub use node_questions::NodeQuestionsPage;
pub use not_found::NotFoundPage;
