//! Grid clustering of point features.
//!
//! Points are bucketed into square cells whose size matches an 80 pixel
//! radius on 256 pixel tiles at the given zoom, the same scale a marker
//! cluster group uses. Each non-empty cell becomes one cluster at the mean
//! of its points.

use crate::domain::LatLng;
use crate::ui::viewmodel::ClusterView;
use geojson::{FeatureCollection, Value};
use std::collections::BTreeMap;

const CLUSTER_RADIUS_PX: f64 = 80.0;
const TILE_SIZE_PX: f64 = 256.0;

/// Cell edge length in degrees at `zoom`.
#[must_use]
pub fn cell_size(zoom: u8) -> f64 {
    let pixels_per_degree = TILE_SIZE_PX * f64::from(2u32.pow(u32::from(zoom.min(24)))) / 360.0;
    CLUSTER_RADIUS_PX / pixels_per_degree
}

/// Positions of the point geometries in `data`, as `[lat, lng]`.
///
/// Multi-points contribute each of their points; other geometry kinds are
/// not clustered.
#[must_use]
pub fn feature_points(data: &FeatureCollection) -> Vec<LatLng> {
    let mut points = Vec::new();
    for geometry in data.features.iter().filter_map(|f| f.geometry.as_ref()) {
        match &geometry.value {
            Value::Point(p) if p.len() >= 2 => points.push([p[1], p[0]]),
            Value::MultiPoint(ps) => points.extend(ps.iter().filter(|p| p.len() >= 2).map(|p| [p[1], p[0]])),
            _ => {}
        }
    }
    points
}

/// Groups `points` into grid clusters at `zoom`, ordered by cell.
#[must_use]
pub fn cluster_points(points: &[LatLng], zoom: u8) -> Vec<ClusterView> {
    let size = cell_size(zoom);
    let mut cells: BTreeMap<(i64, i64), (f64, f64, usize)> = BTreeMap::new();

    for &[lat, lng] in points {
        #[allow(clippy::cast_possible_truncation)]
        let cell = ((lat / size).floor() as i64, (lng / size).floor() as i64);
        let entry = cells.entry(cell).or_insert((0.0, 0.0, 0));
        entry.0 += lat;
        entry.1 += lng;
        entry.2 += 1;
    }

    cells
        .into_values()
        .map(|(lat_sum, lng_sum, count)| {
            #[allow(clippy::cast_precision_loss)]
            let n = count as f64;
            ClusterView {
                center: [lat_sum / n, lng_sum / n],
                count,
            }
        })
        .collect()
}
