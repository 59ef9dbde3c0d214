use model::station::Station;

/// A sparse lookup over stations. Zero and empty values mean "unset".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationFilter {
    pub id: i32,
    pub name_fi: String,
    pub name_sv: String,
    pub name_en: String,
    pub address_fi: String,
    pub address_sv: String,
    /// Latitude and longitude form one unit. The pair is unset only when
    /// both are zero.
    pub latitude: f64,
    pub longitude: f64,
}

impl StationFilter {
    pub fn by_id(id: i32) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    /// Builds the predicate for this filter.
    ///
    /// A set id takes precedence over every other field. Other fields are
    /// combined with AND in declaration order.
    pub fn predicate(&self) -> Predicate {
        if self.id != 0 {
            return Predicate {
                conditions: vec![Condition::Id(self.id)],
            };
        }

        let mut conditions = vec![];
        let text_fields: [(&String, fn(String) -> Condition); 5] = [
            (&self.name_fi, Condition::NameFi),
            (&self.name_sv, Condition::NameSv),
            (&self.name_en, Condition::NameEn),
            (&self.address_fi, Condition::AddressFi),
            (&self.address_sv, Condition::AddressSv),
        ];
        for (value, condition) in text_fields {
            if !value.is_empty() {
                conditions.push(condition(value.clone()));
            }
        }
        if self.latitude != 0.0 || self.longitude != 0.0 {
            conditions.push(Condition::Coordinates(self.latitude, self.longitude));
        }

        Predicate { conditions }
    }
}

/// A single equality on a station field.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Id(i32),
    NameFi(String),
    NameSv(String),
    NameEn(String),
    AddressFi(String),
    AddressSv(String),
    /// Latitude and longitude, both of which must match.
    Coordinates(f64, f64),
}

impl Condition {
    pub fn matches(&self, station: &Station) -> bool {
        match self {
            Self::Id(id) => station.id == *id,
            Self::NameFi(name) => station.name_fi == *name,
            Self::NameSv(name) => station.name_sv == *name,
            Self::NameEn(name) => station.name_en == *name,
            Self::AddressFi(address) => station.address_fi == *address,
            Self::AddressSv(address) => station.address_sv == *address,
            Self::Coordinates(latitude, longitude) => {
                station.coordinates() == (*latitude, *longitude)
            }
        }
    }
}

/// Conjunction of conditions. An empty predicate matches no station at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    conditions: Vec<Condition>,
}

impl Predicate {
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn matches_nothing(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches(&self, station: &Station) -> bool {
        !self.matches_nothing()
            && self
                .conditions
                .iter()
                .all(|condition| condition.matches(station))
    }
}
