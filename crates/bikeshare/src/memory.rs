//! In-memory database for local development and tests.

use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use model::{journey::Journey, station::Station, WithId};
use tokio::sync::RwLock;

use crate::{
    database::{
        Database, DatabaseError, JourneyRepo, Result, Session, StationRepo,
    },
    filter::StationFilter,
    pagination::JourneyPage,
};

#[derive(Default)]
struct Tables {
    stations: Vec<WithId<Station>>,
    journeys: Vec<Journey>,
}

#[derive(Default)]
struct Inner {
    tables: RwLock<Tables>,
    sessions_opened: AtomicUsize,
    sessions_closed: AtomicUsize,
    fail_lookups: AtomicBool,
}

/// Keeps all rows in memory. Clones share the same tables.
#[derive(Clone, Default)]
pub struct MemoryDatabase {
    inner: Arc<Inner>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_stations(self, stations: Vec<Station>) -> Self {
        {
            let mut tables = self.inner.tables.write().await;
            for station in stations {
                let row_id = tables.stations.len() as i32 + 1;
                tables.stations.push(WithId::new(row_id, station));
            }
        }
        self
    }

    pub async fn with_journeys(self, journeys: Vec<Journey>) -> Self {
        {
            let mut tables = self.inner.tables.write().await;
            tables.journeys.extend(journeys);
            tables.journeys.sort_by_key(|journey| journey.id);
        }
        self
    }

    /// Makes every station lookup fail with a storage error.
    pub fn fail_lookups(&self, fail: bool) {
        self.inner.fail_lookups.store(fail, Ordering::SeqCst);
    }

    pub fn sessions_opened(&self) -> usize {
        self.inner.sessions_opened.load(Ordering::SeqCst)
    }

    /// Number of sessions opened but not closed yet.
    pub fn sessions_open(&self) -> usize {
        self.sessions_opened() - self.inner.sessions_closed.load(Ordering::SeqCst)
    }

    pub async fn station_count(&self) -> usize {
        self.inner.tables.read().await.stations.len()
    }
}

#[async_trait]
impl Database for MemoryDatabase {
    type Session = MemorySession;

    async fn open(&self) -> Result<Self::Session> {
        self.inner.sessions_opened.fetch_add(1, Ordering::SeqCst);
        Ok(MemorySession {
            inner: self.inner.clone(),
        })
    }
}

pub struct MemorySession {
    inner: Arc<Inner>,
}

#[async_trait]
impl Session for MemorySession {
    async fn close(self) {
        self.inner.sessions_closed.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl StationRepo for MemorySession {
    async fn get_all_stations(&self) -> Result<Vec<WithId<Station>>> {
        let tables = self.inner.tables.read().await;
        Ok(tables.stations.iter().rev().cloned().collect())
    }

    async fn find_station(&self, filter: &StationFilter) -> Result<WithId<Station>> {
        if self.inner.fail_lookups.load(Ordering::SeqCst) {
            return Err(DatabaseError::Other("lookup failed".into()));
        }
        let predicate = filter.predicate();
        let tables = self.inner.tables.read().await;
        tables
            .stations
            .iter()
            .find(|station| predicate.matches(&station.content))
            .cloned()
            .ok_or(DatabaseError::NotFound)
    }

    async fn insert_station(&self, station: &Station) -> Result<()> {
        let mut tables = self.inner.tables.write().await;
        let row_id = tables
            .stations
            .iter()
            .map(|station| station.id)
            .max()
            .unwrap_or(0)
            + 1;
        tables.stations.push(WithId::new(row_id, station.clone()));
        Ok(())
    }
}

#[async_trait]
impl JourneyRepo for MemorySession {
    async fn last_journey_id(&self) -> Result<i32> {
        let tables = self.inner.tables.read().await;
        Ok(tables
            .journeys
            .iter()
            .map(|journey| journey.id)
            .max()
            .unwrap_or(0))
    }

    async fn get_journeys(&self, page: &JourneyPage) -> Result<Vec<Journey>> {
        let tables = self.inner.tables.read().await;
        Ok(tables
            .journeys
            .iter()
            .filter(|journey| journey.id > page.after)
            .take(page.limit.max(0) as usize)
            .cloned()
            .collect())
    }
}
