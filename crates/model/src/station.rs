use serde::{Deserialize, Serialize};

/// A bike station.
///
/// Field names on the wire follow the published open data set, which mixes
/// Finnish and Swedish column names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Station {
    #[serde(rename = "ID")]
    pub id: i32,
    #[serde(rename = "Nimi", default)]
    pub name_fi: String,
    #[serde(rename = "Namn", default)]
    pub name_sv: String,
    #[serde(rename = "Name", default)]
    pub name_en: String,
    #[serde(rename = "Osoite", default)]
    pub address_fi: String,
    #[serde(rename = "Adress", default)]
    pub address_sv: String,
    #[serde(rename = "Kaupunki", default)]
    pub city_fi: String,
    #[serde(rename = "Stad", default)]
    pub city_sv: String,
    #[serde(rename = "Operaattor", default)]
    pub operator: String,
    #[serde(rename = "Kapasiteet", default)]
    pub capacity: i32,
    #[serde(rename = "Latitude", default)]
    pub latitude: f64,
    #[serde(rename = "Longitude", default)]
    pub longitude: f64,
    #[serde(rename = "JourneysFrom", default)]
    pub journeys_from: i32,
    #[serde(rename = "JourneysTo", default)]
    pub journeys_to: i32,
}

impl Station {
    pub fn coordinates(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}
