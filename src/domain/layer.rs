//! Overlay layer model.
//!
//! A [`Layer`] pairs a GeoJSON feature collection with the [`LayerConfig`]
//! describing how the map draws it and what a click on one of its features
//! reports. Layers are produced by a [`DataSource`](crate::data::DataSource)
//! and never mutated afterwards.

use geojson::{Feature, FeatureCollection};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Name of the one layer whose features are spatially clustered.
pub const CLUSTERED_LAYER_NAME: &str = "Housing Justice Actions";

/// Pane z-index every overlay pane is offset from, keeping overlays above
/// the base tile panes.
pub const PANE_BASE_Z_INDEX: i32 = 200;

/// Custom per-feature click hook supplied by the embedding application.
///
/// Invoked after the `ui:info-window:show` event for the clicked feature has
/// been dispatched.
pub type FeatureHook = Arc<dyn Fn(&Feature) + Send + Sync>;

/// Path styling passed through to the map renderer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerStyle {
    /// Stroke color.
    #[serde(default)]
    pub color: Option<String>,
    /// Stroke width in pixels.
    #[serde(default)]
    pub weight: Option<f64>,
    /// Stroke opacity.
    #[serde(default)]
    pub opacity: Option<f64>,
    /// Fill color.
    #[serde(default)]
    pub fill_color: Option<String>,
    /// Fill opacity.
    #[serde(default)]
    pub fill_opacity: Option<f64>,
}

/// How point features are turned into map symbols.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PointSymbol {
    /// A circle of fixed pixel radius.
    CircleMarker {
        /// Radius in pixels.
        radius: f64,
    },
    /// An image icon.
    Icon {
        /// Icon image URL.
        url: String,
        /// Icon size in pixels, `[width, height]`.
        size: [u32; 2],
    },
}

/// One property to copy into an [`InfoWindow`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropField {
    /// Feature property key.
    pub key: String,
    /// Label shown instead of the key.
    #[serde(default)]
    pub label: Option<String>,
}

/// Projection from a clicked feature to the info window payload.
///
/// With no `fields` listed, every feature property is copied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropsProjection {
    /// Property whose value becomes the info window title.
    #[serde(default)]
    pub title: Option<String>,
    /// Properties to copy, in display order.
    #[serde(default)]
    pub fields: Vec<PropField>,
}

/// Payload of the `ui:info-window:show` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoWindow {
    /// Key of the layer the clicked feature belongs to.
    pub layer: String,
    /// Title, if the projection names a title property present on the feature.
    pub title: Option<String>,
    /// `(label, value)` pairs in display order.
    pub properties: Vec<(String, Value)>,
}

impl PropsProjection {
    /// Projects a feature's properties into an [`InfoWindow`].
    #[must_use]
    pub fn project(&self, layer_key: &str, feature: &Feature) -> InfoWindow {
        let empty = serde_json::Map::new();
        let props = feature.properties.as_ref().unwrap_or(&empty);

        let title = self
            .title
            .as_ref()
            .and_then(|key| props.get(key))
            .map(|value| match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            });

        let properties = if self.fields.is_empty() {
            props.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
        } else {
            self.fields
                .iter()
                .filter_map(|field| {
                    props.get(&field.key).map(|value| {
                        let label = field.label.clone().unwrap_or_else(|| field.key.clone());
                        (label, value.clone())
                    })
                })
                .collect()
        };

        InfoWindow {
            layer: layer_key.to_string(),
            title,
            properties,
        }
    }
}

/// Display and interaction configuration of a layer.
#[derive(Clone, Default, Deserialize)]
pub struct LayerConfig {
    /// Canonical layer name.
    pub name: String,
    /// Translation key for the name shown in the layers control.
    #[serde(default)]
    pub name_i18n: String,
    /// Relative stacking order among overlays.
    #[serde(default)]
    pub z_index: i32,
    /// Path styling.
    #[serde(default)]
    pub style: LayerStyle,
    /// Point symbolizer; `None` leaves the renderer's default marker.
    #[serde(default)]
    pub point_to_layer: Option<PointSymbol>,
    /// Custom click hook, set programmatically.
    #[serde(skip)]
    pub on_each_feature: Option<FeatureHook>,
    /// Click projection.
    #[serde(default)]
    pub props: PropsProjection,
}

impl fmt::Debug for LayerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayerConfig")
            .field("name", &self.name)
            .field("name_i18n", &self.name_i18n)
            .field("z_index", &self.z_index)
            .field("style", &self.style)
            .field("point_to_layer", &self.point_to_layer)
            .field("on_each_feature", &self.on_each_feature.is_some())
            .field("props", &self.props)
            .finish()
    }
}

impl LayerConfig {
    /// Z-index of the pane this layer draws into.
    ///
    /// Saturates at the `i32` bounds for out-of-range manifest values.
    #[must_use]
    pub const fn pane_z_index(&self) -> i32 {
        PANE_BASE_Z_INDEX.saturating_add(self.z_index.saturating_mul(2))
    }

    /// Whether features of this layer are grouped into clusters.
    #[must_use]
    pub fn is_clustered(&self) -> bool {
        self.name == CLUSTERED_LAYER_NAME
    }

    /// Name shown in the layers control.
    ///
    /// Looks up `name_i18n` in the translation table and falls back to the
    /// canonical name.
    #[must_use]
    pub fn display_name(&self, translations: &BTreeMap<String, String>) -> String {
        translations
            .get(&self.name_i18n)
            .cloned()
            .unwrap_or_else(|| self.name.clone())
    }

    /// Attaches a click hook.
    #[must_use]
    pub fn with_feature_hook(mut self, hook: impl Fn(&Feature) + Send + Sync + 'static) -> Self {
        self.on_each_feature = Some(Arc::new(hook));
        self
    }
}

/// A resolved overlay layer.
#[derive(Debug, Clone)]
pub struct Layer {
    /// Unique key, also the pane name and the overlay-visibility key.
    pub key: String,
    /// Geometry.
    pub data: FeatureCollection,
    /// Display and interaction configuration.
    pub config: LayerConfig,
}

impl Layer {
    /// Returns the feature at `index`, if any.
    #[must_use]
    pub fn feature(&self, index: usize) -> Option<&Feature> {
        self.data.features.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feature(props: serde_json::Value) -> Feature {
        Feature {
            bbox: None,
            geometry: None,
            id: None,
            properties: props.as_object().cloned(),
            foreign_members: None,
        }
    }

    #[test]
    fn pane_z_index_is_offset_and_doubled() {
        let config = LayerConfig {
            name: "Evictions".to_string(),
            z_index: 3,
            ..LayerConfig::default()
        };

        assert_eq!(config.pane_z_index(), 206);
    }

    #[test]
    fn pane_z_index_saturates_on_extreme_values() {
        let high = LayerConfig {
            name: "Evictions".to_string(),
            z_index: i32::MAX,
            ..LayerConfig::default()
        };
        let low = LayerConfig {
            z_index: i32::MIN,
            ..high.clone()
        };

        assert_eq!(high.pane_z_index(), i32::MAX);
        assert_eq!(low.pane_z_index(), i32::MIN + PANE_BASE_Z_INDEX);
    }

    #[test]
    fn only_housing_justice_actions_cluster() {
        let clustered = LayerConfig {
            name: CLUSTERED_LAYER_NAME.to_string(),
            ..LayerConfig::default()
        };
        let plain = LayerConfig {
            name: "Tenant Unions".to_string(),
            ..LayerConfig::default()
        };

        assert!(clustered.is_clustered());
        assert!(!plain.is_clustered());
    }

    #[test]
    fn display_name_prefers_translation() {
        let config = LayerConfig {
            name: "Tenant Unions".to_string(),
            name_i18n: "layers.tenantUnions".to_string(),
            ..LayerConfig::default()
        };
        let mut translations = BTreeMap::new();

        assert_eq!(config.display_name(&translations), "Tenant Unions");

        translations.insert("layers.tenantUnions".to_string(), "Sindicatos".to_string());
        assert_eq!(config.display_name(&translations), "Sindicatos");
    }

    #[test]
    fn projection_copies_listed_fields_with_labels() {
        let projection = PropsProjection {
            title: Some("name".to_string()),
            fields: vec![
                PropField {
                    key: "units".to_string(),
                    label: Some("Units".to_string()),
                },
                PropField {
                    key: "missing".to_string(),
                    label: None,
                },
            ],
        };
        let clicked = feature(serde_json::json!({ "name": "Moms 4 Housing", "units": 1 }));

        let info = projection.project("actions", &clicked);

        assert_eq!(info.layer, "actions");
        assert_eq!(info.title.as_deref(), Some("Moms 4 Housing"));
        assert_eq!(info.properties, vec![("Units".to_string(), serde_json::json!(1))]);
    }

    #[test]
    fn projection_without_fields_copies_everything() {
        let clicked = feature(serde_json::json!({ "a": 1, "b": "two" }));

        let info = PropsProjection::default().project("layer", &clicked);

        assert_eq!(info.title, None);
        assert_eq!(info.properties.len(), 2);
    }
}
