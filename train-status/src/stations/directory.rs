//! Station lookup.

use std::collections::HashMap;

use crate::domain::StopId;

/// A station as listed in the static table.
#[derive(Debug, Clone, PartialEq)]
pub struct Station {
    /// Display name
    pub name: String,
    /// Latitude in signed decimal degrees, if the table had a valid value
    pub latitude: Option<f64>,
    /// Longitude in signed decimal degrees, if the table had a valid value
    pub longitude: Option<f64>,
}

impl Station {
    /// Create a station without coordinates.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            latitude: None,
            longitude: None,
        }
    }

    /// Set the coordinates.
    pub fn with_coordinates(mut self, latitude: Option<f64>, longitude: Option<f64>) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }
}

/// Read-only station directory.
///
/// Keyed by the codes used in the static table. A feed identifier is
/// looked up verbatim first, then by its trailing numeric code, so both
/// `33605` and `-SR70ST-33605` find the same entry.
#[derive(Debug, Clone, Default)]
pub struct StationDirectory {
    stations: HashMap<String, Station>,
}

impl StationDirectory {
    /// An empty directory; every lookup falls back to a synthesized name.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add a station. Returns `false` if the code was already present, in
    /// which case the existing entry is kept.
    pub fn insert(&mut self, code: impl Into<String>, station: Station) -> bool {
        match self.stations.entry(code.into()) {
            std::collections::hash_map::Entry::Occupied(_) => false,
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(station);
                true
            }
        }
    }

    /// Look up a station by feed identifier.
    pub fn get(&self, id: &StopId) -> Option<&Station> {
        self.stations.get(id.as_str()).or_else(|| {
            id.numeric_code()
                .and_then(|code| self.stations.get(code))
        })
    }

    /// Display name for a station, synthesized when unknown.
    pub fn name_of(&self, id: &StopId) -> String {
        match self.get(id) {
            Some(station) => station.name.clone(),
            None => fallback_name(id),
        }
    }

    /// Coordinates for a station, if known.
    pub fn coordinates_of(&self, id: &StopId) -> (Option<f64>, Option<f64>) {
        self.get(id)
            .map(|s| (s.latitude, s.longitude))
            .unwrap_or((None, None))
    }

    /// Number of stations in the directory.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Whether the directory is empty.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl FromIterator<(String, Station)> for StationDirectory {
    fn from_iter<I: IntoIterator<Item = (String, Station)>>(iter: I) -> Self {
        let mut directory = Self::empty();
        for (code, station) in iter {
            directory.insert(code, station);
        }
        directory
    }
}

/// Name shown for a station missing from the table.
fn fallback_name(id: &StopId) -> String {
    format!("Station {}", id)
}
