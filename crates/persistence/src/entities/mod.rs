//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod booking;
pub mod club;
pub mod court;
pub mod instructor;
pub mod time_slot;
pub mod user;

pub use booking::{BookingEntity, BookingWithUserEntity};
pub use club::ClubEntity;
pub use court::CourtEntity;
pub use instructor::InstructorEntity;
pub use time_slot::{TimeSlotEntity, TimeSlotWithCountsEntity};
pub use user::UserEntity;
