//! Waypoint registry with name/location disambiguation.
//!
//! Navigation data reuses short identifiers across regions, so a name alone
//! does not identify a waypoint. Every waypoint is addressed by a
//! [`WaypointKey`] made of its name and its coordinate rounded to a fixed
//! number of decimal places. Lookups by name that match several waypoints
//! must be disambiguated with a reference coordinate.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::trace;

use crate::error::{Error, Result};
use crate::geo::Coordinate;

/// Default rounding precision (decimal places) of the composite key.
pub const DEFAULT_KEY_PRECISION: u32 = 5;

/// Upper bound for the key precision; keeps the scaled coordinates well inside `i64`.
const MAX_KEY_PRECISION: u32 = 12;

/// Minimum Jaro-Winkler similarity for a name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Index of a waypoint inside a [`WaypointRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct WaypointHandle(usize);

impl WaypointHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for WaypointHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Content address of a waypoint: name plus coordinate scaled by `10^precision`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WaypointKey {
    name: String,
    latitude: i64,
    longitude: i64,
}

impl WaypointKey {
    pub fn new(name: &str, coordinate: Coordinate, precision: u32) -> Self {
        let scale = 10f64.powi(precision.min(MAX_KEY_PRECISION) as i32);
        Self {
            name: name.to_string(),
            latitude: (coordinate.latitude() * scale).round() as i64,
            longitude: (coordinate.longitude() * scale).round() as i64,
        }
    }
}

/// A named geographic fix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Waypoint {
    pub name: String,
    pub coordinate: Coordinate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

/// Store of all known waypoints.
#[derive(Debug, Clone)]
pub struct WaypointRegistry {
    waypoints: Vec<Waypoint>,
    by_name: HashMap<String, Vec<WaypointHandle>>,
    by_key: HashMap<WaypointKey, WaypointHandle>,
    precision: u32,
}

impl Default for WaypointRegistry {
    fn default() -> Self {
        Self::with_precision(DEFAULT_KEY_PRECISION)
    }
}

impl WaypointRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry whose deduplication key rounds to `precision` decimal places.
    pub fn with_precision(precision: u32) -> Self {
        Self {
            waypoints: Vec::new(),
            by_name: HashMap::new(),
            by_key: HashMap::new(),
            precision: precision.min(MAX_KEY_PRECISION),
        }
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Insert a waypoint, or return the existing handle when one with the same
    /// composite key is already registered.
    pub fn register(
        &mut self,
        name: &str,
        coordinate: Coordinate,
        region: Option<&str>,
    ) -> WaypointHandle {
        let key = self.key_for(name, coordinate);
        if let Some(&existing) = self.by_key.get(&key) {
            trace!(name, %coordinate, handle = %existing, "waypoint already registered");
            return existing;
        }

        let handle = WaypointHandle(self.waypoints.len());
        self.waypoints.push(Waypoint {
            name: name.to_string(),
            coordinate,
            region: region.map(str::to_string),
        });
        self.by_name
            .entry(name.to_string())
            .or_default()
            .push(handle);
        self.by_key.insert(key, handle);
        handle
    }

    /// Resolve a name to a single waypoint.
    ///
    /// A unique name resolves regardless of `hint`. When several waypoints
    /// share the name, the one closest to `hint` wins, with ties going to the
    /// earliest registration. Without a hint such a name is ambiguous.
    pub fn resolve(&self, name: &str, hint: Option<Coordinate>) -> Result<WaypointHandle> {
        let candidates = self.candidates(name);
        match (candidates, hint) {
            ([], _) => Err(Error::UnknownWaypoint {
                name: name.to_string(),
                suggestions: self.fuzzy_matches(name, 3),
            }),
            ([only], _) => Ok(*only),
            (many, None) => Err(Error::AmbiguousWaypoint {
                name: name.to_string(),
                candidates: many
                    .iter()
                    .map(|handle| self.waypoints[handle.0].coordinate)
                    .collect(),
            }),
            (many, Some(hint)) => {
                let mut best = many[0];
                let mut best_distance = self.waypoints[best.0].coordinate.distance_to(&hint);
                for &handle in &many[1..] {
                    let d = self.waypoints[handle.0].coordinate.distance_to(&hint);
                    // Strict comparison keeps the first registered candidate on ties.
                    if d < best_distance {
                        best = handle;
                        best_distance = d;
                    }
                }
                trace!(
                    name,
                    %hint,
                    handle = %best,
                    distance_nm = best_distance,
                    "disambiguated waypoint by proximity"
                );
                Ok(best)
            }
        }
    }

    /// All handles registered under `name`, in registration order.
    pub fn candidates(&self, name: &str) -> &[WaypointHandle] {
        self.by_name.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Look up a waypoint by handle.
    pub fn get(&self, handle: WaypointHandle) -> Option<&Waypoint> {
        self.waypoints.get(handle.0)
    }

    /// Look up a waypoint by handle. Panics on handles from another registry.
    pub fn waypoint(&self, handle: WaypointHandle) -> &Waypoint {
        &self.waypoints[handle.0]
    }

    /// Composite key of a registered waypoint.
    pub fn key(&self, handle: WaypointHandle) -> Option<WaypointKey> {
        self.get(handle)
            .map(|waypoint| self.key_for(&waypoint.name, waypoint.coordinate))
    }

    /// Iterate over all waypoints in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (WaypointHandle, &Waypoint)> {
        self.waypoints
            .iter()
            .enumerate()
            .map(|(index, waypoint)| (WaypointHandle(index), waypoint))
    }

    /// Up to `limit` registered names similar to `name`, best match first.
    pub fn fuzzy_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.to_ascii_uppercase();
        let mut scored: Vec<(f64, &str)> = self
            .by_name
            .keys()
            .map(|candidate| {
                let score = strsim::jaro_winkler(&needle, &candidate.to_ascii_uppercase());
                (score, candidate.as_str())
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }

    fn key_for(&self, name: &str, coordinate: Coordinate) -> WaypointKey {
        WaypointKey::new(name, coordinate, self.precision)
    }
}
