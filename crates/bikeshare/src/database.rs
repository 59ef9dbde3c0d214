use std::{error, fmt, result};

use async_trait::async_trait;
use model::{journey::Journey, station::Station, WithId};

use crate::{filter::StationFilter, pagination::JourneyPage};

#[derive(Debug)]
pub enum DatabaseError {
    NotFound,
    Other(Box<dyn error::Error + Send + Sync>),
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => f.write_str("no matching row"),
            Self::Other(why) => write!(f, "{}", why),
        }
    }
}

impl error::Error for DatabaseError {}

pub type Result<T> = result::Result<T, DatabaseError>;

#[async_trait]
pub trait StationRepo {
    /// Returns all stations, most recently stored first.
    async fn get_all_stations(&self) -> Result<Vec<WithId<Station>>>;

    /// Returns the first station matching the filter, or
    /// [`DatabaseError::NotFound`] if there is none.
    async fn find_station(&self, filter: &StationFilter) -> Result<WithId<Station>>;

    async fn insert_station(&self, station: &Station) -> Result<()>;
}

#[async_trait]
pub trait JourneyRepo {
    /// Highest stored journey id, zero if there are no journeys.
    async fn last_journey_id(&self) -> Result<i32>;

    async fn get_journeys(&self, page: &JourneyPage) -> Result<Vec<Journey>>;
}

/// A connection to the store, opened for a single request.
///
/// Lookups take `&self` so that several of them can run concurrently on the
/// same session.
#[async_trait]
pub trait Session: StationRepo + JourneyRepo + Send + Sync + Sized + 'static {
    async fn close(self);
}

/// trait to implement a bike share database.
/// cloning must be cheap, every request opens its own session.
#[async_trait]
pub trait Database: Clone + Send + Sync + Sized {
    type Session: Session;

    async fn open(&self) -> Result<Self::Session>;
}
