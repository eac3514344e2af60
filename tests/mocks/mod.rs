//! Hand-written repository mocks shared by the integration tests.

mod mock_phone_number_repository;
mod mock_stats_repository;

#[allow(unused_imports)]
pub use mock_phone_number_repository::MockPhoneNumberRepository;
#[allow(unused_imports)]
pub use mock_stats_repository::MockStatsRepository;
