//! Readers for the comma-separated navigation data files.
//!
//! A data directory holds:
//!
//! - `Waypoints.txt`: `name,lat,lon[,region]` (required)
//! - `Navaids.txt`: `name,_,_,_,_,_,lat,lon,_,region,...`
//! - `ats.txt`: airway blocks; an `A,<airway>,<count>` row introduces the
//!   airway, followed by `S,name,lat,lon,next,next_lat,next_lon,_,_,distance`
//!   segment rows
//! - `direct.csv` and any `direct/*.csv`: `from,lat,lon,to,lat,lon[,distance]`
//!   legs usable in both directions
//!
//! Files carry no header row. Blank lines are ignored.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::geo::Coordinate;
use crate::network::{build_network, BuildOptions, EdgeRecord, Network, WaypointRecord};

pub const WAYPOINTS_FILE: &str = "Waypoints.txt";
pub const NAVAIDS_FILE: &str = "Navaids.txt";
pub const AIRWAYS_FILE: &str = "ats.txt";
pub const DIRECT_FILE: &str = "direct.csv";
pub const DIRECT_DIR: &str = "direct";

/// Paths of the navigation data files found in a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavdataPaths {
    pub waypoints: PathBuf,
    pub navaids: Option<PathBuf>,
    pub airways: Option<PathBuf>,
    pub direct: Vec<PathBuf>,
}

impl NavdataPaths {
    /// Locate the data files inside `dir`. Only the waypoint file is mandatory.
    pub fn discover(dir: &Path) -> Result<Self> {
        let waypoints = dir.join(WAYPOINTS_FILE);
        if !waypoints.is_file() {
            return Err(Error::NavdataNotFound { path: waypoints });
        }

        let optional = |name: &str| {
            let path = dir.join(name);
            path.is_file().then_some(path)
        };

        let mut direct: Vec<PathBuf> = optional(DIRECT_FILE).into_iter().collect();
        let direct_dir = dir.join(DIRECT_DIR);
        if direct_dir.is_dir() {
            let mut files = Vec::new();
            for entry in fs::read_dir(&direct_dir)? {
                let path = entry?.path();
                let is_csv = path
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| ext.eq_ignore_ascii_case("csv"))
                    .unwrap_or(false);
                if is_csv && path.is_file() {
                    files.push(path);
                }
            }
            files.sort();
            direct.extend(files);
        }

        Ok(Self {
            waypoints,
            navaids: optional(NAVAIDS_FILE),
            airways: optional(AIRWAYS_FILE),
            direct,
        })
    }
}

/// Load every navigation data file in `dir` and build the route network.
pub fn load_navdata(dir: &Path, options: &BuildOptions) -> Result<Network> {
    let paths = NavdataPaths::discover(dir)?;
    debug!(dir = %dir.display(), ?paths, "loading navdata");

    let mut waypoints = read_waypoints(File::open(&paths.waypoints)?, WAYPOINTS_FILE)?;
    if let Some(path) = &paths.navaids {
        waypoints.extend(read_navaids(File::open(path)?, NAVAIDS_FILE)?);
    }

    let mut edges = Vec::new();
    if let Some(path) = &paths.airways {
        edges.extend(read_airways(File::open(path)?, AIRWAYS_FILE)?);
    }
    for path in &paths.direct {
        let name = path.display().to_string();
        edges.extend(read_direct_legs(File::open(path)?, &name)?);
    }

    info!(
        dir = %dir.display(),
        waypoints = waypoints.len(),
        edges = edges.len(),
        "read navdata records"
    );
    build_network(waypoints, edges, options)
}

/// Parse `name,lat,lon[,region]` rows.
pub fn read_waypoints<R: Read>(reader: R, source: &str) -> Result<Vec<WaypointRecord>> {
    let mut records = Vec::new();
    for row in rows(reader) {
        let row = row?;
        let ctx = RowContext::new(source, &row);
        let mut record = WaypointRecord::new(
            ctx.text(&row, 0, "name")?,
            ctx.number(&row, 1, "latitude")?,
            ctx.number(&row, 2, "longitude")?,
        );
        record.region = ctx.optional_text(&row, 3);
        records.push(record);
    }
    Ok(records)
}

/// Parse navaid rows; only name, position and region are used.
pub fn read_navaids<R: Read>(reader: R, source: &str) -> Result<Vec<WaypointRecord>> {
    let mut records = Vec::new();
    for row in rows(reader) {
        let row = row?;
        let ctx = RowContext::new(source, &row);
        let mut record = WaypointRecord::new(
            ctx.text(&row, 0, "name")?,
            ctx.number(&row, 6, "latitude")?,
            ctx.number(&row, 7, "longitude")?,
        );
        record.region = ctx.optional_text(&row, 9);
        records.push(record);
    }
    Ok(records)
}

/// Parse airway blocks into one-way segment records.
pub fn read_airways<R: Read>(reader: R, source: &str) -> Result<Vec<EdgeRecord>> {
    let mut records = Vec::new();
    let mut airway: Option<String> = None;

    for row in rows(reader) {
        let row = row?;
        let ctx = RowContext::new(source, &row);
        match ctx.text(&row, 0, "row type")? {
            "A" => airway = Some(ctx.text(&row, 1, "airway")?.to_string()),
            "S" => {
                let designator = airway
                    .as_deref()
                    .ok_or_else(|| ctx.error("segment row before any airway row"))?;
                let from_hint = ctx.coordinate(&row, 2, 3)?;
                let to_hint = ctx.coordinate(&row, 5, 6)?;
                let record = EdgeRecord::airway(
                    designator,
                    ctx.text(&row, 1, "name")?,
                    ctx.text(&row, 4, "next name")?,
                )
                .with_hints(Some(from_hint), Some(to_hint))
                .with_cost(ctx.number(&row, 9, "distance")?);
                records.push(record);
            }
            other => debug!(source, line = ctx.line, row_type = other, "ignoring airway row"),
        }
    }
    Ok(records)
}

/// Parse `from,lat,lon,to,lat,lon[,distance]` direct legs.
pub fn read_direct_legs<R: Read>(reader: R, source: &str) -> Result<Vec<EdgeRecord>> {
    let mut records = Vec::new();
    for row in rows(reader) {
        let row = row?;
        let ctx = RowContext::new(source, &row);
        let from_hint = ctx.coordinate(&row, 1, 2)?;
        let to_hint = ctx.coordinate(&row, 4, 5)?;
        let mut record = EdgeRecord::direct(ctx.text(&row, 0, "from")?, ctx.text(&row, 3, "to")?)
            .with_hints(Some(from_hint), Some(to_hint));
        if ctx.optional_text(&row, 6).is_some() {
            record.cost = Some(ctx.number(&row, 6, "distance")?);
        }
        records.push(record);
    }
    Ok(records)
}

fn rows<R: Read>(reader: R) -> csv::StringRecordsIntoIter<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader)
        .into_records()
}

/// Source location of a row, used for error messages.
struct RowContext<'a> {
    source: &'a str,
    line: u64,
}

impl<'a> RowContext<'a> {
    fn new(source: &'a str, row: &StringRecord) -> Self {
        Self {
            source,
            line: row.position().map(|p| p.line()).unwrap_or(0),
        }
    }

    fn error(&self, message: impl Into<String>) -> Error {
        Error::NavdataParse {
            source_name: self.source.to_string(),
            line: self.line,
            message: message.into(),
        }
    }

    fn text<'r>(&self, row: &'r StringRecord, index: usize, what: &str) -> Result<&'r str> {
        match row.get(index) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(self.error(format!("missing {what} (column {})", index + 1))),
        }
    }

    fn optional_text(&self, row: &StringRecord, index: usize) -> Option<String> {
        row.get(index)
            .filter(|value| !value.is_empty())
            .map(str::to_string)
    }

    fn number(&self, row: &StringRecord, index: usize, what: &str) -> Result<f64> {
        let raw = self.text(row, index, what)?;
        raw.parse::<f64>()
            .map_err(|_| self.error(format!("{what} '{raw}' is not a number")))
    }

    fn coordinate(&self, row: &StringRecord, lat: usize, lon: usize) -> Result<Coordinate> {
        Coordinate::new(
            self.number(row, lat, "latitude")?,
            self.number(row, lon, "longitude")?,
        )
    }
}
