//! Uniqueness checks for new stations.
//!
//! The store does not enforce uniqueness of station names, addresses or
//! coordinates, so every candidate is checked against existing rows before
//! it is inserted.

use std::str::FromStr;

use futures::future::join_all;
use model::station::Station;

use crate::{
    database::{DatabaseError, StationRepo},
    filter::StationFilter,
    RequestError, RequestResult,
};

/// What to do when a uniqueness lookup fails for another reason than "not
/// found".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LookupErrorPolicy {
    /// Fail the whole validation with a storage error.
    #[default]
    Propagate,
    /// Count the failed lookup as "no conflict".
    Ignore,
}

impl FromStr for LookupErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "propagate" => Ok(Self::Propagate),
            "ignore" => Ok(Self::Ignore),
            other => Err(format!("unknown lookup error policy '{}'", other)),
        }
    }
}

/// A field, or group of fields, that must be unique among all stations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Id,
    NameFi,
    NameSv,
    NameEn,
    AddressFi,
    AddressSv,
    Coordinates,
}

impl Dimension {
    pub const ALL: [Dimension; 7] = [
        Self::Id,
        Self::NameFi,
        Self::NameSv,
        Self::NameEn,
        Self::AddressFi,
        Self::AddressSv,
        Self::Coordinates,
    ];

    /// Filter selecting stored stations that collide with `station` on this
    /// dimension only.
    pub fn filter(self, station: &Station) -> StationFilter {
        let empty = StationFilter::default();
        match self {
            Self::Id => StationFilter::by_id(station.id),
            Self::NameFi => StationFilter {
                name_fi: station.name_fi.clone(),
                ..empty
            },
            Self::NameSv => StationFilter {
                name_sv: station.name_sv.clone(),
                ..empty
            },
            Self::NameEn => StationFilter {
                name_en: station.name_en.clone(),
                ..empty
            },
            Self::AddressFi => StationFilter {
                address_fi: station.address_fi.clone(),
                ..empty
            },
            Self::AddressSv => StationFilter {
                address_sv: station.address_sv.clone(),
                ..empty
            },
            Self::Coordinates => {
                let (latitude, longitude) = station.coordinates();
                StationFilter {
                    latitude,
                    longitude,
                    ..empty
                }
            }
        }
    }

    pub fn conflict_message(self, station: &Station) -> String {
        match self {
            Self::Id => format!("station with ID {} already exists", station.id),
            Self::NameFi => format!(
                "station with Finnish name '{}' already exists",
                station.name_fi
            ),
            Self::NameSv => format!(
                "station with Swedish name '{}' already exists",
                station.name_sv
            ),
            Self::NameEn => format!(
                "station with English name '{}' already exists",
                station.name_en
            ),
            Self::AddressFi => format!(
                "station with Finnish address '{}' already exists",
                station.address_fi
            ),
            Self::AddressSv => format!(
                "station with Swedish address '{}' already exists",
                station.address_sv
            ),
            Self::Coordinates => {
                let (latitude, longitude) = station.coordinates();
                format!(
                    "station with coordinates ({:.6}, {:.6}) already exists",
                    latitude, longitude
                )
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    policy: LookupErrorPolicy,
}

impl Validator {
    pub fn new(policy: LookupErrorPolicy) -> Self {
        Self { policy }
    }

    /// Checks every dimension concurrently and returns one message per
    /// conflicting dimension, in the order of [`Dimension::ALL`]. An empty
    /// result means the station can be inserted.
    pub async fn validate<R>(
        &self,
        repo: &R,
        candidate: &Station,
    ) -> RequestResult<Vec<String>>
    where
        R: StationRepo + Sync,
    {
        let checks = Dimension::ALL
            .iter()
            .map(|dimension| self.check(repo, *dimension, candidate));

        // each check owns its slot, results are merged after all have finished
        let mut conflicts = vec![];
        for result in join_all(checks).await {
            if let Some(message) = result? {
                conflicts.push(message);
            }
        }
        Ok(conflicts)
    }

    async fn check<R>(
        &self,
        repo: &R,
        dimension: Dimension,
        candidate: &Station,
    ) -> RequestResult<Option<String>>
    where
        R: StationRepo + Sync,
    {
        match repo.find_station(&dimension.filter(candidate)).await {
            Ok(existing) => {
                let message = dimension.conflict_message(candidate);
                log::info!("{} (row {})", message, existing.id);
                Ok(Some(message))
            }
            Err(DatabaseError::NotFound) => Ok(None),
            Err(why) => match self.policy {
                LookupErrorPolicy::Ignore => {
                    log::warn!(
                        "ignoring failed {:?} lookup for station {}: {}",
                        dimension,
                        candidate.id,
                        why
                    );
                    Ok(None)
                }
                LookupErrorPolicy::Propagate => Err(RequestError::storage(
                    format!("could not validate station {}", candidate.id),
                    why,
                )),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{database::Database, memory::MemoryDatabase};

    fn station(id: i32, tag: &str, latitude: f64, longitude: f64) -> Station {
        Station {
            id,
            name_fi: format!("{} fi", tag),
            name_sv: format!("{} sv", tag),
            name_en: format!("{} en", tag),
            address_fi: format!("{}katu 1", tag),
            address_sv: format!("{}gatan 1", tag),
            city_fi: "Helsinki".to_owned(),
            city_sv: "Helsingfors".to_owned(),
            operator: "CityBike Finland".to_owned(),
            capacity: 20,
            latitude,
            longitude,
            ..Default::default()
        }
    }

    /// Stores each colliding field of `candidate` on a different row.
    fn spread_collisions(candidate: &Station) -> Vec<Station> {
        let base = |id: i32, tag: &str, lat: f64| station(id, tag, lat, 24.0);
        vec![
            Station {
                id: candidate.id,
                ..base(100, "a", 60.1)
            },
            Station {
                name_fi: candidate.name_fi.clone(),
                ..base(101, "b", 60.2)
            },
            Station {
                name_sv: candidate.name_sv.clone(),
                ..base(102, "c", 60.3)
            },
            Station {
                name_en: candidate.name_en.clone(),
                ..base(103, "d", 60.4)
            },
            Station {
                address_fi: candidate.address_fi.clone(),
                ..base(104, "e", 60.5)
            },
            Station {
                address_sv: candidate.address_sv.clone(),
                ..base(105, "f", 60.6)
            },
            Station {
                latitude: candidate.latitude,
                longitude: candidate.longitude,
                ..base(106, "g", 0.0)
            },
        ]
    }

    #[tokio::test]
    async fn reports_every_colliding_dimension() {
        let candidate = station(1, "Kaivopuisto", 60.155369, 24.950293);
        let database = MemoryDatabase::new()
            .with_stations(spread_collisions(&candidate))
            .await;
        let session = database.open().await.unwrap();

        let conflicts = Validator::default()
            .validate(&session, &candidate)
            .await
            .unwrap();

        assert_eq!(
            conflicts,
            vec![
                "station with ID 1 already exists",
                "station with Finnish name 'Kaivopuisto fi' already exists",
                "station with Swedish name 'Kaivopuisto sv' already exists",
                "station with English name 'Kaivopuisto en' already exists",
                "station with Finnish address 'Kaivopuistokatu 1' already exists",
                "station with Swedish address 'Kaivopuistogatan 1' already exists",
                "station with coordinates (60.155369, 24.950293) already exists",
            ]
        );
    }

    #[tokio::test]
    async fn unique_station_has_no_conflicts() {
        let database = MemoryDatabase::new()
            .with_stations(vec![
                station(1, "Kaivopuisto", 60.155369, 24.950293),
                station(2, "Laivasillankatu", 60.160883, 24.956510),
            ])
            .await;
        let session = database.open().await.unwrap();

        let conflicts = Validator::default()
            .validate(&session, &station(3, "Kapteeninpuistikko", 60.158991, 24.944927))
            .await
            .unwrap();

        assert!(conflicts.is_empty());
    }

    #[tokio::test]
    async fn one_shared_coordinate_is_not_a_conflict() {
        let database = MemoryDatabase::new()
            .with_stations(vec![station(1, "Kaivopuisto", 60.155369, 24.950293)])
            .await;
        let session = database.open().await.unwrap();

        let conflicts = Validator::default()
            .validate(&session, &station(2, "Hanasaari", 60.155369, 24.840319))
            .await
            .unwrap();

        assert!(conflicts.is_empty());
    }

    #[tokio::test]
    async fn zero_latitude_with_a_shared_longitude_is_not_a_conflict() {
        let database = MemoryDatabase::new()
            .with_stations(vec![station(1, "Kaivopuisto", 60.155369, 24.950293)])
            .await;
        let session = database.open().await.unwrap();

        let conflicts = Validator::default()
            .validate(&session, &station(2, "Hanasaari", 0.0, 24.950293))
            .await
            .unwrap();

        assert!(conflicts.is_empty());
    }

    #[tokio::test]
    async fn failed_lookup_is_propagated_by_default() {
        let database = MemoryDatabase::new();
        database.fail_lookups(true);
        let session = database.open().await.unwrap();

        let result = Validator::default()
            .validate(&session, &station(1, "Kaivopuisto", 60.155369, 24.950293))
            .await;

        assert!(matches!(result, Err(RequestError::Storage { .. })));
    }

    #[tokio::test]
    async fn failed_lookup_can_be_ignored() {
        let database = MemoryDatabase::new();
        database.fail_lookups(true);
        let session = database.open().await.unwrap();

        let conflicts = Validator::new(LookupErrorPolicy::Ignore)
            .validate(&session, &station(1, "Kaivopuisto", 60.155369, 24.950293))
            .await
            .unwrap();

        assert!(conflicts.is_empty());
    }

    #[test]
    fn parses_policy_names() {
        assert_eq!("ignore".parse(), Ok(LookupErrorPolicy::Ignore));
        assert_eq!("Propagate".parse(), Ok(LookupErrorPolicy::Propagate));
        assert!("sometimes".parse::<LookupErrorPolicy>().is_err());
    }
}
