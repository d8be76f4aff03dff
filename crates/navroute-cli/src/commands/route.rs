//! Route command handler for computing paths between waypoints.

use anyhow::Result;
use clap::ValueEnum;

use navroute_lib::error::format_suggestions;
use navroute_lib::{
    plan_route, Coordinate, Error as RouteError, RouteAlgorithm, RouteRequest, RouteSummary,
};

use crate::commands::GlobalOptions;
use crate::output::OutputFormat;

/// Search algorithm selectable with `--algorithm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AlgorithmArg {
    #[default]
    AStar,
    Dijkstra,
}

impl From<AlgorithmArg> for RouteAlgorithm {
    fn from(value: AlgorithmArg) -> Self {
        match value {
            AlgorithmArg::AStar => RouteAlgorithm::AStar,
            AlgorithmArg::Dijkstra => RouteAlgorithm::Dijkstra,
        }
    }
}

/// Arguments for the route command.
#[derive(Debug, Clone)]
pub struct RouteCommandArgs {
    /// Starting waypoint name.
    pub from: String,
    /// Destination waypoint name.
    pub to: String,
    /// Location near the intended start when its name is shared.
    pub from_near: Option<Coordinate>,
    /// Location near the intended destination when its name is shared.
    pub to_near: Option<Coordinate>,
    pub algorithm: AlgorithmArg,
    /// Abort the search after this many node expansions.
    pub max_expansions: Option<usize>,
}

impl RouteCommandArgs {
    /// Convert CLI args to a library RouteRequest.
    pub fn to_request(&self) -> RouteRequest {
        let request = RouteRequest::new(&self.from, &self.to)
            .with_hints(self.from_near, self.to_near)
            .with_algorithm(self.algorithm.into());
        match self.max_expansions {
            Some(limit) => request.with_max_expansions(limit),
            None => request,
        }
    }
}

/// Handle the route subcommand.
pub fn handle_route_command(
    options: &GlobalOptions,
    format: OutputFormat,
    args: &RouteCommandArgs,
) -> Result<()> {
    let network = options.load_network()?;
    let request = args.to_request();

    let plan = match plan_route(&network.registry, &network.graph, &request) {
        Ok(plan) => plan,
        Err(err) => return Err(handle_route_failure(&request, err)),
    };

    let summary = RouteSummary::from_plan(&plan);
    format.render_route_result(&summary)
}

fn handle_route_failure(request: &RouteRequest, err: RouteError) -> anyhow::Error {
    match err {
        RouteError::UnknownWaypoint { name, suggestions } => {
            anyhow::anyhow!(format_unknown_waypoint_message(&name, &suggestions))
        }
        RouteError::AmbiguousWaypoint { name, candidates } => {
            let flag = if name == request.start {
                "--from-near"
            } else {
                "--to-near"
            };
            anyhow::anyhow!(format_ambiguous_message(&name, &candidates, flag))
        }
        RouteError::RouteNotFound { start, goal } => {
            anyhow::anyhow!(format_route_not_found_message(&start, &goal, request))
        }
        other => anyhow::Error::new(other),
    }
}

pub(crate) fn format_unknown_waypoint_message(name: &str, suggestions: &[String]) -> String {
    format!("Unknown waypoint '{}'{}", name, format_suggestions(suggestions))
}

pub(crate) fn format_ambiguous_message(
    name: &str,
    candidates: &[Coordinate],
    flag: &str,
) -> String {
    let listed = candidates
        .iter()
        .map(|c| format!("  {c}"))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "Waypoint '{}' matches {} locations; pass {} LAT,LON to choose one:\n{}",
        name,
        candidates.len(),
        flag,
        listed
    )
}

fn format_route_not_found_message(start: &str, goal: &str, request: &RouteRequest) -> String {
    let mut message = format!("No route found between {} and {}.", start, goal);
    if request.start_hint.is_some() || request.goal_hint.is_some() {
        message.push_str(
            " Check that the --from-near/--to-near locations select the intended waypoints.",
        );
    } else {
        message.push_str(" The waypoints are not connected by any airway or direct leg.");
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> RouteCommandArgs {
        RouteCommandArgs {
            from: "MANIK".to_string(),
            to: "ODEMI".to_string(),
            from_near: None,
            to_near: Coordinate::new(37.5, -8.4).ok(),
            algorithm: AlgorithmArg::Dijkstra,
            max_expansions: Some(50),
        }
    }

    #[test]
    fn request_carries_hints_algorithm_and_limit() {
        let request = args().to_request();
        assert_eq!(request.start, "MANIK");
        assert_eq!(request.goal, "ODEMI");
        assert!(request.start_hint.is_none());
        assert!(request.goal_hint.is_some());
        assert_eq!(request.algorithm, RouteAlgorithm::Dijkstra);
        assert_eq!(request.limits.max_expansions, Some(50));
    }

    #[test]
    fn unknown_waypoint_message_lists_suggestions() {
        assert_eq!(
            format_unknown_waypoint_message("MANIC", &["MANIK".to_string()]),
            "Unknown waypoint 'MANIC'. Did you mean 'MANIK'?"
        );
        assert_eq!(
            format_unknown_waypoint_message("XX", &["XA".to_string(), "XB".to_string()]),
            "Unknown waypoint 'XX'. Did you mean one of: 'XA', 'XB'?"
        );
        assert_eq!(format_unknown_waypoint_message("XX", &[]), "Unknown waypoint 'XX'");
    }

    #[test]
    fn ambiguous_goal_points_at_to_near() {
        let request = args().to_request();
        let err = handle_route_failure(
            &request,
            RouteError::AmbiguousWaypoint {
                name: "ODEMI".to_string(),
                candidates: vec![Coordinate::new(37.49751, -8.38401).unwrap()],
            },
        );
        let message = err.to_string();
        assert!(message.contains("--to-near"), "{message}");
        assert!(message.contains("37.49751,-8.38401"), "{message}");
    }
}
