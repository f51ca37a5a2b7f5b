pub mod historical;
pub mod station;

pub use historical::get_historical;
pub use station::get_station;
