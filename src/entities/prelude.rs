pub use super::found_report::Entity as FoundReport;
pub use super::lost_report::Entity as LostReport;
