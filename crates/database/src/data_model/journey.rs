use super::DatabaseRow;
use crate::{
    queries::journey::{get_page, last_id},
    PgSession,
};
use async_trait::async_trait;
use bikeshare::{
    database::{JourneyRepo, Result},
    pagination::JourneyPage,
};
use model::journey::Journey;
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct JourneyRow {
    pub id: i32,
    pub departure: String,
    #[sqlx(rename = "return")]
    pub return_time: String,
    pub departure_station_id: i32,
    pub departure_station_name: String,
    pub return_station_id: i32,
    pub return_station_name: String,
    pub covered_distance_m: f64,
    pub duration_sec: i32,
}

impl DatabaseRow for JourneyRow {
    type Model = Journey;

    fn to_model(self) -> Self::Model {
        Journey {
            id: self.id,
            departure: self.departure,
            return_time: self.return_time,
            departure_station_id: self.departure_station_id,
            departure_station_name: self.departure_station_name,
            return_station_id: self.return_station_id,
            return_station_name: self.return_station_name,
            covered_distance_m: self.covered_distance_m,
            duration_sec: self.duration_sec,
        }
    }
}

#[async_trait]
impl JourneyRepo for PgSession {
    async fn last_journey_id(&self) -> Result<i32> {
        last_id(&self.pool).await
    }

    async fn get_journeys(&self, page: &JourneyPage) -> Result<Vec<Journey>> {
        get_page(&self.pool, page).await
    }
}
