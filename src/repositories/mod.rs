mod admin_phone_number_repository;
mod admin_stats_repository;
mod traits;

pub use admin_phone_number_repository::AdminPhoneNumberRepository;
pub use admin_stats_repository::AdminStatsRepository;
pub use traits::{PhoneNumberRepository, StatsRepository};
