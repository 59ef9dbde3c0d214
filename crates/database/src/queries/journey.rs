use bikeshare::{database::Result, pagination::JourneyPage};
use model::journey::Journey;
use sqlx::{Executor, Postgres};

use crate::data_model::{journey::JourneyRow, DatabaseRow};

use super::convert_error;

pub async fn last_id<'c, E>(executor: E) -> Result<i32>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_scalar("SELECT MAX(id) FROM all_journeys;")
        .fetch_one(executor)
        .await
        .map_err(convert_error)
        .map(|id: Option<i32>| id.unwrap_or(0))
}

pub async fn get_page<'c, E>(executor: E, page: &JourneyPage) -> Result<Vec<Journey>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            id, departure, \"return\",
            departure_station_id, departure_station_name,
            return_station_id, return_station_name,
            covered_distance_m, duration_sec
        FROM
            all_journeys
        WHERE id > $1
        ORDER BY id ASC
        LIMIT $2;
        ",
    )
    .bind(page.after)
    .bind(i64::from(page.limit))
    .fetch_all(executor)
    .await
    .map_err(convert_error)
    .map(|rows: Vec<JourneyRow>| {
        rows.into_iter()
            .map(|row| row.to_model())
            .collect::<Vec<_>>()
    })
}
