pub mod aggregate;
pub mod coordinates;
pub mod job;
pub mod map_state;
pub mod markers;
pub mod property;
pub mod status;

pub use coordinates::GeoBounds;
pub use job::Job;
pub use map_state::MapState;
pub use property::Property;
pub use status::MarkerStatus;
