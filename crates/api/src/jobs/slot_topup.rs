//! Slot top-up background job.
//!
//! Keeps every club's horizon of bookable open slots filled without anyone
//! having to call the generation endpoint.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;
use uuid::Uuid;

use super::scheduler::{Job, JobFrequency};
use crate::config::GeneratorConfig;
use domain::services::slot_grid;
use persistence::repositories::{
    ClubRepository, CourtRepository, InstructorRepository, TimeSlotRepository,
};

/// Background job that generates missing open slots for all clubs.
pub struct SlotTopupJob {
    pool: SqlitePool,
    generator: GeneratorConfig,
}

impl SlotTopupJob {
    /// Create a new top-up job.
    pub fn new(pool: SqlitePool, generator: GeneratorConfig) -> Self {
        Self { pool, generator }
    }

    /// Generate missing slots for every club over the configured horizon.
    /// Returns the number of slots created.
    async fn top_up(&self) -> Result<u64, sqlx::Error> {
        let grid = self
            .generator
            .schedule_grid()
            .map_err(|e| sqlx::Error::Configuration(e.to_string().into()))?;
        let band = self.generator.price_band();
        let defaults = self.generator.slot_defaults();
        let start_date = Utc::now().date_naive();

        let clubs = ClubRepository::new(self.pool.clone()).list_all().await?;
        let court_repo = CourtRepository::new(self.pool.clone());
        let instructor_repo = InstructorRepository::new(self.pool.clone());
        let slot_repo = TimeSlotRepository::new(self.pool.clone());

        let mut created = 0u64;
        for club in clubs {
            let instructor_ids: Vec<Uuid> = instructor_repo
                .find_by_club_id(club.id)
                .await?
                .iter()
                .map(|i| i.id)
                .collect();
            if instructor_ids.is_empty() {
                continue;
            }
            let court_ids: Vec<Uuid> = court_repo
                .find_by_club_id(club.id)
                .await?
                .iter()
                .map(|c| c.id)
                .collect();

            let blueprints = {
                let mut rng = rand::thread_rng();
                slot_grid::expand_grid(
                    club.id,
                    start_date,
                    self.generator.days_ahead,
                    &grid,
                    &band,
                    &defaults,
                    &instructor_ids,
                    &court_ids,
                    &mut rng,
                )
            };

            for blueprint in &blueprints {
                if slot_repo.insert_if_absent(blueprint).await? {
                    created += 1;
                }
            }
        }

        Ok(created)
    }
}

#[async_trait::async_trait]
impl Job for SlotTopupJob {
    fn name(&self) -> &'static str {
        "slot_topup"
    }

    fn frequency(&self) -> JobFrequency {
        JobFrequency::Daily
    }

    async fn execute(&self) -> Result<(), String> {
        let created = self
            .top_up()
            .await
            .map_err(|e| format!("Failed to top up slots: {}", e))?;

        info!(created, "Topped up open slots");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_frequency_is_daily() {
        let freq = JobFrequency::Daily;
        assert_eq!(freq.duration(), std::time::Duration::from_secs(86400));
    }
}
