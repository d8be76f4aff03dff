//! Resolve command handler: look up a waypoint name, optionally near a location.

use std::fmt::Write as _;

use anyhow::Result;
use serde::Serialize;

use navroute_lib::{Coordinate, Error as LookupError, WaypointHandle, WaypointRegistry};

use crate::commands::route::{format_ambiguous_message, format_unknown_waypoint_message};
use crate::commands::GlobalOptions;
use crate::output::OutputFormat;

/// Arguments for the resolve command.
#[derive(Debug, Clone)]
pub struct ResolveCommandArgs {
    pub name: String,
    pub near: Option<Coordinate>,
}

/// Waypoint chosen for a name, with the number of waypoints sharing it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ResolvedWaypoint {
    pub handle: WaypointHandle,
    pub name: String,
    pub coordinate: Coordinate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    pub candidates: usize,
}

impl ResolvedWaypoint {
    pub fn lookup(
        registry: &WaypointRegistry,
        name: &str,
        near: Option<Coordinate>,
    ) -> navroute_lib::Result<Self> {
        let handle = registry.resolve(name, near)?;
        let waypoint = registry.waypoint(handle);
        Ok(Self {
            handle,
            name: waypoint.name.clone(),
            coordinate: waypoint.coordinate,
            region: waypoint.region.clone(),
            candidates: registry.candidates(name).len(),
        })
    }

    fn render_text(&self) -> String {
        let mut buffer = format!("{} {} at {}", self.name, self.handle, self.coordinate);
        if let Some(region) = &self.region {
            let _ = write!(buffer, " ({region})");
        }
        if self.candidates > 1 {
            let _ = write!(buffer, "; nearest of {} waypoints", self.candidates);
        }
        buffer.push('\n');
        buffer
    }
}

/// Handle the resolve subcommand.
pub fn handle_resolve_command(
    options: &GlobalOptions,
    format: OutputFormat,
    args: &ResolveCommandArgs,
) -> Result<()> {
    let network = options.load_network()?;
    let resolved = match ResolvedWaypoint::lookup(&network.registry, &args.name, args.near) {
        Ok(resolved) => resolved,
        Err(LookupError::UnknownWaypoint { name, suggestions }) => {
            anyhow::bail!(format_unknown_waypoint_message(&name, &suggestions))
        }
        Err(LookupError::AmbiguousWaypoint { name, candidates }) => {
            anyhow::bail!(format_ambiguous_message(&name, &candidates, "--near"))
        }
        Err(other) => return Err(other.into()),
    };
    format.render_value(&resolved, &resolved.render_text())
}
