use flowfinder_core::prelude::*;
use serde::Serialize;
use tracing::debug;

use crate::cli::{Command, RouteArgs};
use crate::error::CliError;

/// Runs one subcommand and renders its result for stdout
pub fn run(command: &Command, planner: &RoutePlanner<'_>) -> Result<String, CliError> {
    debug!(?command, "running command");
    match *command {
        Command::Route { from, to, output } => {
            let outcome = planner.plan_route(from, to, output.mode())?;
            render_outcome(&outcome, output, planner.snapshot())
        }
        Command::SpotRoute {
            origin,
            to_spot,
            output,
        } => {
            let spot_route = match (origin.from_node, origin.from_spot) {
                (Some(from_node), None) => planner.plan_to_spot(from_node, to_spot, output.mode())?,
                (None, Some(from_spot)) => {
                    planner.plan_between_spots(from_spot, to_spot, output.mode())?
                }
                _ => return Err(CliError::MissingOrigin),
            };
            if output.geojson {
                render_outcome(&spot_route.outcome, output, planner.snapshot())
            } else {
                to_json(&spot_route)
            }
        }
        Command::Links { node } => to_json(&planner.available_links(node)?),
        Command::Distance { from, to } => to_json(&planner.compare_distance(from, to)?),
        Command::Summary => to_json(&planner.graph_summary()?),
    }
}

fn render_outcome(
    outcome: &RouteOutcome,
    output: RouteArgs,
    snapshot: &VenueSnapshot,
) -> Result<String, CliError> {
    match outcome.route() {
        Some(route) if output.geojson => Ok(route.to_geojson_string(snapshot)?),
        _ => to_json(outcome),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::SpotOrigin;

    fn snapshot() -> VenueSnapshot {
        let nodes = vec![
            MapNode::new(1, "Gate", 0.0, 0.0),
            MapNode::new(2, "Carousel", 3.0, 4.0),
            MapNode::new(3, "Far lot", 90.0, 90.0),
        ];
        let links = vec![MapLink::new(1, 1, 2, 6.0)];
        let spots = vec![
            PointOfInterest::new(9, "Carousel", 3.0, 4.0, 20)
                .at_node(2)
                .with_occupancy(5),
        ];
        VenueSnapshot::new(nodes, links, spots).unwrap()
    }

    fn route_args(geojson: bool) -> RouteArgs {
        RouteArgs {
            avoid_congestion: false,
            geojson,
        }
    }

    fn json(text: &str) -> serde_json::Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn no_path_is_printed_not_failed() {
        let snapshot = snapshot();
        let planner = RoutePlanner::new(&snapshot, RoutingConfig::default()).unwrap();
        let command = Command::Route {
            from: 1,
            to: 3,
            output: route_args(true),
        };
        let out = json(&run(&command, &planner).unwrap());
        assert_eq!(out["status"], "no_path");
    }

    #[test]
    fn route_as_geojson() {
        let snapshot = snapshot();
        let planner = RoutePlanner::new(&snapshot, RoutingConfig::default()).unwrap();
        let command = Command::Route {
            from: 2,
            to: 1,
            output: route_args(true),
        };
        let out = json(&run(&command, &planner).unwrap());
        assert_eq!(out["type"], "FeatureCollection");
        assert_eq!(out["features"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn spot_route_reports_resolution() {
        let snapshot = snapshot();
        let planner = RoutePlanner::new(&snapshot, RoutingConfig::default()).unwrap();
        let command = Command::SpotRoute {
            origin: SpotOrigin {
                from_node: Some(1),
                from_spot: None,
            },
            to_spot: 9,
            output: route_args(false),
        };
        let out = json(&run(&command, &planner).unwrap());
        assert_eq!(out["destination"]["node"], 2);
        assert_eq!(out["destination"]["resolution"]["kind"], "associated");
        assert_eq!(out["congestion_level"], "somewhat_quiet");
        assert_eq!(out["outcome"]["status"], "found");
    }

    #[test]
    fn spot_route_without_single_origin_is_rejected() {
        let snapshot = snapshot();
        let planner = RoutePlanner::new(&snapshot, RoutingConfig::default()).unwrap();
        for (from_node, from_spot) in [(None, None), (Some(1), Some(9))] {
            let command = Command::SpotRoute {
                origin: SpotOrigin {
                    from_node,
                    from_spot,
                },
                to_spot: 9,
                output: route_args(false),
            };
            assert!(matches!(
                run(&command, &planner),
                Err(CliError::MissingOrigin)
            ));
        }
    }

    #[test]
    fn errors_surface_as_core_errors() {
        let snapshot = snapshot();
        let planner = RoutePlanner::new(&snapshot, RoutingConfig::default()).unwrap();
        let command = Command::Route {
            from: 1,
            to: 1,
            output: route_args(false),
        };
        assert!(matches!(
            run(&command, &planner),
            Err(CliError::Core(Error::SameEndpoints(1)))
        ));
    }

    #[test]
    fn distance_and_summary() {
        let snapshot = snapshot();
        let planner = RoutePlanner::new(&snapshot, RoutingConfig::default()).unwrap();

        let distance = json(&run(&Command::Distance { from: 1, to: 2 }, &planner).unwrap());
        assert_eq!(distance["straight_line"], 5.0);
        assert_eq!(distance["difference"], 1.0);

        let summary = json(&run(&Command::Summary, &planner).unwrap());
        assert_eq!(summary["passages"], 2);
        assert_eq!(summary["spots_on_nodes"], 1);
    }
}
