use super::DatabaseRow;
use crate::{
    queries::station::{find, get_all, insert},
    PgSession,
};
use async_trait::async_trait;
use bikeshare::{
    database::{Result, StationRepo},
    filter::StationFilter,
};
use model::{station::Station, WithId};
use sqlx::prelude::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct StationRow {
    pub fid: i32,
    pub id: i32,
    pub nimi: String,
    pub namn: String,
    pub name: String,
    pub osoite: String,
    pub adress: String,
    pub kaupunki: String,
    pub stad: String,
    pub operaattor: String,
    pub kapasiteet: i32,
    pub x: f64,
    pub y: f64,
    pub journeys_from: i32,
    pub journeys_to: i32,
}

impl DatabaseRow for StationRow {
    type Model = WithId<Station>;

    fn to_model(self) -> Self::Model {
        WithId::new(
            self.fid,
            Station {
                id: self.id,
                name_fi: self.nimi,
                name_sv: self.namn,
                name_en: self.name,
                address_fi: self.osoite,
                address_sv: self.adress,
                city_fi: self.kaupunki,
                city_sv: self.stad,
                operator: self.operaattor,
                capacity: self.kapasiteet,
                latitude: self.x,
                longitude: self.y,
                journeys_from: self.journeys_from,
                journeys_to: self.journeys_to,
            },
        )
    }
}

#[async_trait]
impl StationRepo for PgSession {
    async fn get_all_stations(&self) -> Result<Vec<WithId<Station>>> {
        get_all(&self.pool).await
    }

    async fn find_station(&self, filter: &StationFilter) -> Result<WithId<Station>> {
        find(&self.pool, filter).await
    }

    async fn insert_station(&self, station: &Station) -> Result<()> {
        insert(&self.pool, station).await
    }
}
