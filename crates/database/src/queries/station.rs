use bikeshare::{
    database::{DatabaseError, Result},
    filter::{Condition, Predicate, StationFilter},
};
use model::{station::Station, WithId};
use sqlx::{postgres::PgArguments, query::QueryAs, Executor, Postgres};

use crate::data_model::{station::StationRow, DatabaseRow};

use super::convert_error;

pub async fn get_all<'c, E>(executor: E) -> Result<Vec<WithId<Station>>>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query_as(
        "
        SELECT
            fid, id, nimi, namn, name, osoite, adress, kaupunki, stad,
            operaattor, kapasiteet, x, y, journeys_from, journeys_to
        FROM
            stations
        ORDER BY fid DESC;
        ",
    )
    .fetch_all(executor)
    .await
    .map_err(convert_error)
    .map(|rows: Vec<StationRow>| {
        rows.into_iter()
            .map(|row| row.to_model())
            .collect::<Vec<_>>()
    })
}

/// Returns the first station matching every populated field of `filter`.
pub async fn find<'c, E>(executor: E, filter: &StationFilter) -> Result<WithId<Station>>
where
    E: Executor<'c, Database = Postgres>,
{
    let predicate = filter.predicate();
    if predicate.matches_nothing() {
        return Err(DatabaseError::NotFound);
    }

    let query_str = format!(
        "
        SELECT
            fid, id, nimi, namn, name, osoite, adress, kaupunki, stad,
            operaattor, kapasiteet, x, y, journeys_from, journeys_to
        FROM
            stations
        WHERE {}
        LIMIT 1;
        ",
        where_clause(&predicate)
    );

    let mut query = sqlx::query_as::<Postgres, StationRow>(&query_str);
    for condition in predicate.conditions() {
        query = bind_condition(query, condition);
    }
    query
        .fetch_one(executor)
        .await
        .map_err(convert_error)
        .map(|row| row.to_model())
}

pub async fn insert<'c, E>(executor: E, station: &Station) -> Result<()>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query(
        "
        INSERT INTO stations(
            id,
            nimi,
            namn,
            name,
            osoite,
            adress,
            kaupunki,
            stad,
            operaattor,
            kapasiteet,
            x,
            y,
            journeys_from,
            journeys_to
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14);
        ",
    )
    .bind(station.id)
    .bind(&station.name_fi)
    .bind(&station.name_sv)
    .bind(&station.name_en)
    .bind(&station.address_fi)
    .bind(&station.address_sv)
    .bind(&station.city_fi)
    .bind(&station.city_sv)
    .bind(&station.operator)
    .bind(station.capacity)
    .bind(station.latitude)
    .bind(station.longitude)
    .bind(station.journeys_from)
    .bind(station.journeys_to)
    .execute(executor)
    .await
    .map_err(convert_error)
    .map(|_| ())
}

/// Columns compared by a condition, one placeholder each.
fn columns(condition: &Condition) -> &'static [&'static str] {
    match condition {
        Condition::Id(_) => &["id"],
        Condition::NameFi(_) => &["nimi"],
        Condition::NameSv(_) => &["namn"],
        Condition::NameEn(_) => &["name"],
        Condition::AddressFi(_) => &["osoite"],
        Condition::AddressSv(_) => &["adress"],
        Condition::Coordinates(_, _) => &["x", "y"],
    }
}

/// Renders the predicate with placeholders `$1..$n` in condition order.
/// A predicate without conditions renders as `FALSE`.
pub fn where_clause(predicate: &Predicate) -> String {
    if predicate.matches_nothing() {
        return "FALSE".to_owned();
    }
    predicate
        .conditions()
        .iter()
        .flat_map(columns)
        .enumerate()
        .map(|(i, column)| format!("{} = ${}", column, i + 1))
        .collect::<Vec<_>>()
        .join(" AND ")
}

fn bind_condition<'q>(
    query: QueryAs<'q, Postgres, StationRow, PgArguments>,
    condition: &Condition,
) -> QueryAs<'q, Postgres, StationRow, PgArguments> {
    match condition {
        Condition::Id(id) => query.bind(*id),
        Condition::NameFi(value)
        | Condition::NameSv(value)
        | Condition::NameEn(value)
        | Condition::AddressFi(value)
        | Condition::AddressSv(value) => query.bind(value.clone()),
        Condition::Coordinates(latitude, longitude) => query.bind(*latitude).bind(*longitude),
    }
}
