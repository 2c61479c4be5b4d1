//! Repository implementations for database operations.

pub mod booking;
pub mod club;
pub mod court;
pub mod instructor;
pub mod time_slot;
pub mod user;

pub use booking::{is_busy_error, BookingRepository};
pub use club::ClubRepository;
pub use court::CourtRepository;
pub use instructor::InstructorRepository;
pub use time_slot::TimeSlotRepository;
pub use user::UserRepository;
