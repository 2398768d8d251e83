use geo::line_string;
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use super::{Route, RouteStep};
use crate::{Error, VenueSnapshot};

impl Route {
    /// Converts the route to a `GeoJSON` `FeatureCollection`, one line per step.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownNode`] if a step refers to a node missing from `snapshot`.
    pub fn to_geojson(&self, snapshot: &VenueSnapshot) -> Result<FeatureCollection, Error> {
        let features = self
            .steps
            .iter()
            .enumerate()
            .map(|(idx, step)| step_feature(snapshot, idx, step))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn to_geojson_string(&self, snapshot: &VenueSnapshot) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson(snapshot)?)
            .map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

fn step_feature(snapshot: &VenueSnapshot, idx: usize, step: &RouteStep) -> Result<Feature, Error> {
    let from = snapshot
        .node(step.from)
        .ok_or(Error::UnknownNode(step.from))?
        .position;
    let to = snapshot
        .node(step.to)
        .ok_or(Error::UnknownNode(step.to))?
        .position;

    let line = line_string![
        (x: from.x(), y: from.y()),
        (x: to.x(), y: to.y()),
    ];
    let geometry = Geometry::new(GeoJsonValue::from(&line));

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "step_index": idx,
            "from_node_id": step.from,
            "from_name": step.from_name,
            "to_node_id": step.to,
            "to_name": step.to_name,
            "link_id": step.link,
            "segment_cost": step.segment_cost,
            "distance": step.distance,
        }
    });

    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}
