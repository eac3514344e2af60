//! Application service layer.
//!
//! Services hold the console's business rules on top of the repositories:
//! the add form, the stored list, the stats cards and the dashboard that
//! combines the last two.

mod dashboard;
mod phone_number_form;
mod phone_number_list;
mod stats;

pub use dashboard::{Dashboard, DashboardService};
pub use phone_number_form::PhoneNumberForm;
pub use phone_number_list::{
    begin_edit, delete_prompt, EditDraft, ListedEntry, PhoneNumberListService,
    PhoneNumberListServiceImpl, PhoneNumberListing,
};
pub use stats::{DashboardStats, StatsService, StatsServiceImpl};
