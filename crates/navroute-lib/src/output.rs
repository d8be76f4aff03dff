use std::fmt::Write;

use serde::Serialize;

use crate::path::{Path, RouteAlgorithm};
use crate::routing::RoutePlan;

/// Render every hop: `START D1 W1 D2 W2 ...`.
pub fn render_long(path: &Path) -> String {
    let mut buffer = path.start().name.clone();
    for (designator, step) in path.hops() {
        let _ = write!(buffer, " {designator} {}", step.name);
    }
    buffer
}

/// Render the route with consecutive hops on the same designator collapsed
/// into one entry naming the last waypoint of the run.
pub fn render_short(path: &Path) -> String {
    let mut buffer = path.start().name.clone();
    for (designator, name) in collapse_airways(path) {
        let _ = write!(buffer, " {designator} {name}");
    }
    buffer
}

/// Pairs of `(designator, exit waypoint)` for each run of identical designators.
pub fn collapse_airways(path: &Path) -> Vec<(&str, &str)> {
    let mut runs: Vec<(&str, &str)> = Vec::new();
    for (designator, step) in path.hops() {
        if let Some((current, exit)) = runs.last_mut() {
            if *current == designator {
                *exit = step.name.as_str();
                continue;
            }
        }
        runs.push((designator, step.name.as_str()));
    }
    runs
}

/// Presentation style for turning a [`RouteSummary`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteRenderMode {
    /// Header line followed by both route strings.
    PlainText,
    Long,
    Short,
}

/// Leg between two consecutive waypoints.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteLeg {
    pub from: String,
    pub to: String,
    pub designator: String,
    pub distance_nm: f64,
}

/// Structured representation of a planned route that higher-level consumers can serialise.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteSummary {
    pub algorithm: RouteAlgorithm,
    pub start: String,
    pub goal: String,
    pub hops: usize,
    pub distance_nm: f64,
    pub long_route: String,
    pub short_route: String,
    pub legs: Vec<RouteLeg>,
}

impl RouteSummary {
    pub fn from_plan(plan: &RoutePlan) -> Self {
        let path = &plan.path;
        let legs = path
            .steps()
            .windows(2)
            .map(|pair| RouteLeg {
                from: pair[0].name.clone(),
                to: pair[1].name.clone(),
                designator: pair[1].designator.clone().unwrap_or_default(),
                distance_nm: pair[1].leg_cost,
            })
            .collect();

        Self {
            algorithm: plan.algorithm,
            start: path.start().name.clone(),
            goal: path.goal().name.clone(),
            hops: path.hop_count(),
            distance_nm: path.total_cost(),
            long_route: render_long(path),
            short_route: render_short(path),
            legs,
        }
    }

    /// Render the summary using the requested textual mode.
    pub fn render(&self, mode: RouteRenderMode) -> String {
        match mode {
            RouteRenderMode::PlainText => self.render_plain(),
            RouteRenderMode::Long => format!("{}\n", self.long_route),
            RouteRenderMode::Short => format!("{}\n", self.short_route),
        }
    }

    fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops, {:.1} NM, algorithm: {})",
            self.start, self.goal, self.hops, self.distance_nm, self.algorithm
        );
        let _ = writeln!(buffer, "long:  {}", self.long_route);
        let _ = writeln!(buffer, "short: {}", self.short_route);
        buffer
    }
}
