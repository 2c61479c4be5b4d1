//! Schedule grid expansion for the slot generator.
//!
//! The generator pre-creates "open" slots across a grid of
//! date x start time x instructor combinations, rotating courts round-robin.
//! This module is pure: it produces blueprints, and the persistence layer
//! inserts whichever do not exist yet.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Timelike, Utc};
use rand::Rng;
use uuid::Uuid;

/// Time-of-day grid a club schedules classes on.
#[derive(Debug, Clone)]
pub struct ScheduleGrid {
    pub first_start: NaiveTime,
    pub last_start: NaiveTime,
    pub step_minutes: u32,
    pub duration_minutes: u32,
}

impl ScheduleGrid {
    /// Class start times for one day, inclusive of `last_start`.
    pub fn start_times(&self) -> Vec<NaiveTime> {
        let first = self.first_start.num_seconds_from_midnight();
        let last = self.last_start.num_seconds_from_midnight();
        let step = self.step_minutes.max(1) * 60;

        let mut times = Vec::new();
        let mut seconds = first;
        while seconds <= last {
            if let Some(time) = NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0) {
                times.push(time);
            }
            seconds += step;
        }
        times
    }
}

/// Price band generated slots are priced from; a zero-width band yields a
/// fixed price.
#[derive(Debug, Clone, Copy)]
pub struct PriceBand {
    pub min_cents: i64,
    pub max_cents: i64,
}

impl PriceBand {
    pub fn sample<R: Rng>(&self, rng: &mut R) -> i64 {
        if self.min_cents >= self.max_cents {
            self.min_cents
        } else {
            rng.gen_range(self.min_cents..=self.max_cents)
        }
    }
}

/// Defaults applied to every generated slot.
#[derive(Debug, Clone)]
pub struct SlotDefaults {
    pub max_players: i64,
    pub level: String,
    pub category: String,
}

/// A slot the generator wants to exist. Identity is the natural key
/// `(club, instructor, start_at)`; inserting an existing blueprint is a
/// silent skip, not an error.
#[derive(Debug, Clone)]
pub struct SlotBlueprint {
    pub club_id: Uuid,
    pub court_id: Option<Uuid>,
    pub instructor_id: Uuid,
    pub start_at: DateTime<Utc>,
    pub end_at: DateTime<Utc>,
    pub max_players: i64,
    pub total_price_cents: i64,
    pub level: String,
    pub category: String,
}

/// Expands the grid into one blueprint per date x start time x instructor.
///
/// Courts rotate round-robin over the combinations; a club without courts
/// produces slots with no court assigned.
#[allow(clippy::too_many_arguments)]
pub fn expand_grid<R: Rng>(
    club_id: Uuid,
    start_date: NaiveDate,
    days: u32,
    grid: &ScheduleGrid,
    band: &PriceBand,
    defaults: &SlotDefaults,
    instructor_ids: &[Uuid],
    court_ids: &[Uuid],
    rng: &mut R,
) -> Vec<SlotBlueprint> {
    let starts = grid.start_times();
    let mut blueprints =
        Vec::with_capacity(days as usize * starts.len() * instructor_ids.len());
    let mut rotation = 0usize;

    for day in 0..days {
        let date = start_date + Duration::days(i64::from(day));
        for time in &starts {
            for &instructor_id in instructor_ids {
                let start_at = date.and_time(*time).and_utc();
                let court_id = if court_ids.is_empty() {
                    None
                } else {
                    Some(court_ids[rotation % court_ids.len()])
                };
                rotation += 1;

                blueprints.push(SlotBlueprint {
                    club_id,
                    court_id,
                    instructor_id,
                    start_at,
                    end_at: start_at + Duration::minutes(i64::from(grid.duration_minutes)),
                    max_players: defaults.max_players,
                    total_price_cents: band.sample(rng),
                    level: defaults.level.clone(),
                    category: defaults.category.clone(),
                });
            }
        }
    }
    blueprints
}
