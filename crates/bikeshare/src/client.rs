use model::{journey::Journey, station::Station, WithId};

use crate::{
    database::{Database, DatabaseError, JourneyRepo, Session, StationRepo},
    filter::StationFilter,
    pagination::JourneyPage,
    validator::Validator,
    RequestError, RequestResult,
};

/// Entry point for all station and journey requests.
///
/// Every call opens its own session and closes it again before returning,
/// whether the call succeeded or not.
#[derive(Debug, Clone)]
pub struct Client<D>
where
    D: Database + 'static,
{
    pub database: D,
    validator: Validator,
}

impl<D> Client<D>
where
    D: Database,
{
    pub fn new(database: D, validator: Validator) -> Self {
        Self {
            database,
            validator,
        }
    }

    async fn open(&self) -> RequestResult<D::Session> {
        self.database.open().await.map_err(|why| {
            RequestError::storage(
                "an error has been produced trying to access the database",
                why,
            )
        })
    }

    pub async fn get_stations(&self) -> RequestResult<Vec<WithId<Station>>> {
        let session = self.open().await?;
        let result = session
            .get_all_stations()
            .await
            .map_err(|why| RequestError::storage("error while getting stations", why));
        session.close().await;
        result
    }

    pub async fn get_station(&self, id: i32) -> RequestResult<WithId<Station>> {
        let session = self.open().await?;
        let result = session
            .find_station(&StationFilter::by_id(id))
            .await
            .map_err(|why| match why {
                DatabaseError::NotFound => RequestError::NotFound(format!(
                    "station with ID {} does not exist",
                    id
                )),
                why => RequestError::storage(
                    format!("error while getting station ID {}", id),
                    why,
                ),
            });
        session.close().await;
        result
    }

    /// Validates `station` against all stored stations and inserts it if no
    /// field collides.
    pub async fn create_station(&self, station: Station) -> RequestResult<()> {
        if station.id <= 0 {
            return Err(RequestError::validation(format!(
                "{} is an invalid ID",
                station.id
            )));
        }

        let session = self.open().await?;
        let result: RequestResult<()> = async {
            let conflicts = self.validator.validate(&session, &station).await?;
            if !conflicts.is_empty() {
                return Err(RequestError::Conflicts(conflicts));
            }
            session.insert_station(&station).await.map_err(|why| {
                RequestError::storage("failed to add new station", why)
            })
        }
        .await;
        session.close().await;

        if result.is_ok() {
            log::info!("added station {} ({})", station.id, station.name_fi);
        }
        result
    }

    /// Returns the next page of journeys with ids greater than `after`.
    pub async fn get_journeys(&self, after: i32) -> RequestResult<Vec<Journey>> {
        let session = self.open().await?;
        let result: RequestResult<Vec<Journey>> = async {
            let last_id = session.last_journey_id().await.map_err(|why| {
                RequestError::storage(
                    "error trying to retrieve a journey, please try again later",
                    why,
                )
            })?;
            let page = JourneyPage::new(after, last_id).ok_or_else(|| {
                RequestError::validation(format!(
                    "{} is an invalid ID request for journeys",
                    after
                ))
            })?;
            session.get_journeys(&page).await.map_err(|why| {
                RequestError::storage(
                    "error while receiving journeys, please try again later",
                    why,
                )
            })
        }
        .await;
        session.close().await;
        result
    }
}
