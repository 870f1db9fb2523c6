//! Navigation routes and the map mode they select.
//!
//! The current path decides which sub-view the map shows:
//!
//! - **Oral histories**: one marker per interview
//! - **Data layers**: the overlay toggle control
//!
//! Independently, the search box is shown only on the search route. Patterns
//! match by path segment prefix, so `/maps/covid-19` also matches
//! `/maps/covid-19/evictions` but not `/maps/covid-19-archive`.

use serde::Deserialize;

/// Map sub-view selected by the current route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapMode {
    /// Interview markers.
    OralHistories,
    /// Toggleable overlay layers.
    DataLayers,
}

/// Outcome of matching a path against the [`RouteTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteMatch {
    /// Sub-view to render, if the path selects one.
    pub mode: Option<MapMode>,
    /// Whether the search box is shown.
    pub search: bool,
}

/// The `[routes]` configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RouteTable {
    /// Path of the oral-histories view.
    pub oral_histories: String,
    /// Path of the data-layers view.
    pub data_layers: String,
    /// Path that shows the search box.
    pub search: String,
    /// Path the session starts on.
    pub default_path: String,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            oral_histories: "/maps/oral-histories".to_string(),
            data_layers: "/maps/covid-19".to_string(),
            search: "/covid-19".to_string(),
            default_path: "/maps/covid-19".to_string(),
        }
    }
}

impl RouteTable {
    /// Matches `path` against the table.
    ///
    /// The oral-histories pattern is tried before the data-layers pattern.
    #[must_use]
    pub fn resolve(&self, path: &str) -> RouteMatch {
        let mode = if path_matches(&self.oral_histories, path) {
            Some(MapMode::OralHistories)
        } else if path_matches(&self.data_layers, path) {
            Some(MapMode::DataLayers)
        } else {
            None
        };

        RouteMatch {
            mode,
            search: path_matches(&self.search, path),
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split(['?', '#'])
        .next()
        .unwrap_or_default()
        .split('/')
        .filter(|segment| !segment.is_empty())
}

/// Whether every segment of `pattern` is a leading segment of `path`.
///
/// Empty and repeated slashes are ignored, as are query strings and
/// fragments on `path`. The pattern `/` matches every path.
#[must_use]
pub fn path_matches(pattern: &str, path: &str) -> bool {
    let mut path_segments = segments(path);
    segments(pattern).all(|expected| path_segments.next() == Some(expected))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_by_segment_prefix() {
        assert!(path_matches("/maps/covid-19", "/maps/covid-19"));
        assert!(path_matches("/maps/covid-19", "/maps/covid-19/"));
        assert!(path_matches("/maps/covid-19", "/maps/covid-19/evictions"));
        assert!(path_matches("/maps/covid-19", "//maps//covid-19?lang=es"));
        assert!(!path_matches("/maps/covid-19", "/maps/covid-19-archive"));
        assert!(!path_matches("/maps/covid-19", "/maps"));
        assert!(path_matches("/", "/anything"));
    }

    #[test]
    fn resolves_default_table() {
        let routes = RouteTable::default();

        assert_eq!(
            routes.resolve("/maps/oral-histories/rec1"),
            RouteMatch {
                mode: Some(MapMode::OralHistories),
                search: false,
            }
        );
        assert_eq!(
            routes.resolve("/maps/covid-19"),
            RouteMatch {
                mode: Some(MapMode::DataLayers),
                search: false,
            }
        );
        assert_eq!(
            routes.resolve("/covid-19"),
            RouteMatch {
                mode: None,
                search: true,
            }
        );
        assert_eq!(routes.resolve(&routes.default_path).mode, Some(MapMode::DataLayers));
    }

    #[test]
    fn search_route_can_overlap_a_map_mode() {
        let routes = RouteTable {
            search: "/maps".to_string(),
            ..RouteTable::default()
        };

        let matched = routes.resolve("/maps/covid-19");

        assert_eq!(matched.mode, Some(MapMode::DataLayers));
        assert!(matched.search);
    }
}
