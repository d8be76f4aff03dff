use std::path::PathBuf;

use thiserror::Error;

use crate::geo::Coordinate;

/// Convenient result alias for the navroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Latitude or longitude outside the valid range, or not a finite number.
    #[error("invalid coordinate {latitude},{longitude}: latitude must be within [-90, 90] and longitude within [-180, 180]")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// Raised when a coordinate string could not be parsed.
    #[error("could not parse coordinate '{input}'; expected LAT,LON in decimal degrees")]
    CoordinateSyntax { input: String },

    /// Raised when a waypoint name is not present in the registry.
    #[error("unknown waypoint: {name}{}", format_suggestions(.suggestions))]
    UnknownWaypoint {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when several waypoints share a name and no location hint was given.
    #[error("waypoint name {name} is ambiguous; {} candidates at {}", .candidates.len(), format_candidates(.candidates))]
    AmbiguousWaypoint {
        name: String,
        candidates: Vec<Coordinate>,
    },

    /// Raised when an edge cost is negative or not finite.
    #[error("invalid cost {cost} for edge {from} -> {to}")]
    InvalidCost { from: String, to: String, cost: f64 },

    /// Raised when no route could be found between two waypoints.
    #[error("no route found between {start} and {goal}")]
    RouteNotFound { start: String, goal: String },

    /// Raised when the search expanded more nodes than the caller allowed.
    #[error("route search from {start} to {goal} exceeded {limit} node expansions")]
    SearchLimitExceeded {
        start: String,
        goal: String,
        limit: usize,
    },

    /// Navigation data file could not be located.
    #[error("navdata file not found at {path}")]
    NavdataNotFound { path: PathBuf },

    /// Raised when a navigation data row cannot be interpreted.
    #[error("invalid navdata in {source_name} line {line}: {message}")]
    NavdataParse {
        source_name: String,
        line: u64,
        message: String,
    },

    /// Wrapper for CSV reader errors.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for registry lookup failures (unknown or ambiguous names).
    pub fn is_lookup(&self) -> bool {
        matches!(
            self,
            Error::UnknownWaypoint { .. } | Error::AmbiguousWaypoint { .. }
        )
    }
}

/// Trailing "Did you mean ..." hint for a list of suggested names, empty when
/// there are none.
pub fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

fn format_candidates(candidates: &[Coordinate]) -> String {
    candidates
        .iter()
        .map(|c| format!("({c})"))
        .collect::<Vec<_>>()
        .join(", ")
}
