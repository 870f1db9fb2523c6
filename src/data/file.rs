//! File-backed data source driven by a TOML manifest.
//!
//! ```toml
//! interviews = "interviews.json"
//!
//! [[layers]]
//! key = "actions"
//! data = "actions.geojson"
//! name = "Housing Justice Actions"
//! name_i18n = "layers.actions"
//! z_index = 2
//! point_to_layer = { kind = "circle_marker", radius = 6.0 }
//! props = { title = "name" }
//! ```
//!
//! Relative paths resolve against the manifest's directory.

use super::DataSource;
use crate::domain::{Interview, Layer, LayerConfig, MapError, Result};
use geojson::{FeatureCollection, GeoJson};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
struct ManifestLayer {
    key: String,
    data: PathBuf,
    #[serde(flatten)]
    config: LayerConfig,
}

#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    interviews: Option<PathBuf>,
    #[serde(default)]
    layers: Vec<ManifestLayer>,
}

/// Reads layers and interviews from files listed in a manifest.
#[derive(Debug, Clone)]
pub struct FileDataSource {
    layers: Vec<ManifestLayer>,
    interviews: Option<PathBuf>,
}

impl FileDataSource {
    /// Reads and validates the manifest at `path`.
    ///
    /// Only the manifest is read here; layer files are read on demand.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::Io`] if the manifest cannot be read and
    /// [`MapError::Config`] if it is malformed or repeats a layer key.
    pub fn open(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let manifest: Manifest = toml::from_str(&content)
            .map_err(|e| MapError::Config(format!("invalid layer manifest {}: {e}", path.display())))?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        let source = Self::from_manifest(manifest, base)?;

        tracing::debug!(
            manifest = %path.display(),
            layer_count = source.layers.len(),
            has_interviews = source.interviews.is_some(),
            "layer manifest loaded"
        );
        Ok(source)
    }

    fn from_manifest(manifest: Manifest, base: &Path) -> Result<Self> {
        let mut layers: Vec<ManifestLayer> = Vec::with_capacity(manifest.layers.len());
        for mut layer in manifest.layers {
            if layers.iter().any(|l| l.key == layer.key) {
                return Err(MapError::Config(format!("duplicate layer key '{}'", layer.key)));
            }
            layer.data = base.join(&layer.data);
            layers.push(layer);
        }

        Ok(Self {
            layers,
            interviews: manifest.interviews.map(|p| base.join(p)),
        })
    }

    /// Attaches a click hook to the layer with `key`.
    ///
    /// Unknown keys are ignored with a warning.
    #[must_use]
    pub fn with_feature_hook(
        mut self,
        key: &str,
        hook: impl Fn(&geojson::Feature) + Send + Sync + 'static,
    ) -> Self {
        match self.layers.iter_mut().find(|l| l.key == key) {
            Some(layer) => {
                layer.config = std::mem::take(&mut layer.config).with_feature_hook(hook);
            }
            None => tracing::warn!(layer_key = key, "feature hook for unknown layer ignored"),
        }
        self
    }

    /// Layer keys in slot order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.layers.iter().map(|l| l.key.as_str())
    }
}

impl DataSource for FileDataSource {
    fn layer_count(&self) -> usize {
        self.layers.len()
    }

    async fn load_layer(&self, index: usize) -> Result<Layer> {
        let entry = self
            .layers
            .get(index)
            .ok_or_else(|| MapError::Data(format!("no layer in slot {index}")))?;

        let text = tokio::fs::read_to_string(&entry.data).await?;
        let data = GeoJson::from_str(&text)
            .and_then(FeatureCollection::try_from)
            .map_err(|e| MapError::Data(format!("layer '{}' ({}): {e}", entry.key, entry.data.display())))?;

        tracing::debug!(
            layer_key = %entry.key,
            feature_count = data.features.len(),
            "layer geometry loaded"
        );

        Ok(Layer {
            key: entry.key.clone(),
            data,
            config: entry.config.clone(),
        })
    }

    async fn load_interviews(&self) -> Result<Vec<Interview>> {
        let Some(path) = &self.interviews else {
            return Ok(Vec::new());
        };

        let bytes = tokio::fs::read(path).await?;
        let interviews: Vec<Interview> = serde_json::from_slice(&bytes)?;

        tracing::debug!(interview_count = interviews.len(), "interviews loaded");
        Ok(interviews)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PointSymbol;
    use std::fs;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const MANIFEST: &str = r##"
interviews = "interviews.json"

[[layers]]
key = "actions"
data = "actions.geojson"
name = "Housing Justice Actions"
name_i18n = "layers.actions"
z_index = 2
point_to_layer = { kind = "circle_marker", radius = 6.0 }
props = { title = "name" }

[[layers]]
key = "evictions"
data = "evictions.geojson"
name = "Evictions"
style = { color = "#ff0000", fill_opacity = 0.4 }
"##;

    const ACTIONS: &str = r#"{
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [-122.27, 37.8] },
            "properties": { "name": "Moms 4 Housing" }
        }]
    }"#;

    fn write_fixture(dir: &Path) -> PathBuf {
        let manifest = dir.join("layers.toml");
        fs::write(&manifest, MANIFEST).unwrap();
        fs::write(dir.join("actions.geojson"), ACTIONS).unwrap();
        fs::write(
            dir.join("interviews.json"),
            r#"[{ "id": "rec1", "fields": { "Latitude": 37.8, "Longitude": -122.27 } }]"#,
        )
        .unwrap();
        manifest
    }

    #[tokio::test]
    async fn loads_layers_relative_to_manifest() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileDataSource::open(&write_fixture(dir.path())).unwrap();

        assert_eq!(source.layer_count(), 2);
        assert_eq!(source.keys().collect::<Vec<_>>(), vec!["actions", "evictions"]);

        let layer = source.load_layer(0).await.unwrap();
        assert_eq!(layer.key, "actions");
        assert_eq!(layer.data.features.len(), 1);
        assert_eq!(layer.config.z_index, 2);
        assert_eq!(layer.config.point_to_layer, Some(PointSymbol::CircleMarker { radius: 6.0 }));
        assert_eq!(layer.config.props.title.as_deref(), Some("name"));
        assert!(layer.config.is_clustered());
    }

    #[test]
    fn manifest_style_colors_are_read() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileDataSource::open(&write_fixture(dir.path())).unwrap();

        let style = &source.layers[1].config.style;
        assert_eq!(style.color.as_deref(), Some("#ff0000"));
        assert_eq!(style.fill_opacity, Some(0.4));
        assert_eq!(source.layers[1].config.name, "Evictions");
    }

    #[tokio::test]
    async fn missing_geometry_file_fails_only_that_slot() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileDataSource::open(&write_fixture(dir.path())).unwrap();

        assert!(matches!(source.load_layer(1).await, Err(MapError::Io(_))));
        assert!(source.load_layer(0).await.is_ok());
        assert!(matches!(source.load_layer(7).await, Err(MapError::Data(_))));
    }

    #[tokio::test]
    async fn loads_interviews() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileDataSource::open(&write_fixture(dir.path())).unwrap();

        let interviews = source.load_interviews().await.unwrap();

        assert_eq!(interviews.len(), 1);
        assert_eq!(interviews[0].position(), Some([37.8, -122.27]));
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join("layers.toml");
        fs::write(
            &manifest,
            "[[layers]]\nkey = \"a\"\ndata = \"a.geojson\"\nname = \"A\"\n\n\
             [[layers]]\nkey = \"a\"\ndata = \"b.geojson\"\nname = \"B\"\n",
        )
        .unwrap();

        assert!(matches!(FileDataSource::open(&manifest), Err(MapError::Config(_))));
    }

    #[tokio::test]
    async fn feature_hook_is_attached_by_key() {
        let dir = tempfile::tempdir().unwrap();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let source = FileDataSource::open(&write_fixture(dir.path()))
            .unwrap()
            .with_feature_hook("actions", move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            });

        let layer = source.load_layer(0).await.unwrap();
        let hook = layer.config.on_each_feature.clone().unwrap();
        hook(layer.feature(0).unwrap());

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
