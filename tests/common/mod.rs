//! Test doubles shared by the integration tests.

#![allow(dead_code)]

use aemap::data::DataSource;
use aemap::domain::{Interview, Layer, LayerConfig, MapError, Result};
use aemap::geocode::{AsyncHttpClient, GeocodeConfig, Geocoder};
use aemap::worker::MapWorker;
use aemap::{AppState, MapSession};
use geojson::FeatureCollection;
use reqwest::Url;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Geocoder transport answering from a script keyed by the `q` parameter.
///
/// Terms without a script entry fail with an HTTP error. Every requested
/// term is recorded.
#[derive(Clone, Default)]
pub struct ScriptedClient {
    pub terms: Arc<Mutex<Vec<String>>>,
    pub urls: Arc<Mutex<Vec<String>>>,
    script: Arc<HashMap<String, (Duration, String)>>,
}

impl ScriptedClient {
    pub fn new(script: impl IntoIterator<Item = (&'static str, Duration, Vec<(&'static str, [f64; 2])>)>) -> Self {
        let script = script
            .into_iter()
            .map(|(term, delay, places)| (term.to_string(), (delay, locations_body(&places))))
            .collect();
        Self {
            script: Arc::new(script),
            ..Self::default()
        }
    }

    pub fn requested_terms(&self) -> Vec<String> {
        self.terms.lock().unwrap().clone()
    }
}

impl AsyncHttpClient for ScriptedClient {
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        self.urls.lock().unwrap().push(url.to_string());
        let term = Url::parse(url)
            .ok()
            .and_then(|u| u.query_pairs().find(|(k, _)| k == "q").map(|(_, v)| v.into_owned()))
            .unwrap_or_default();
        self.terms.lock().unwrap().push(term.clone());

        let Some((delay, body)) = self.script.get(&term).cloned() else {
            return Err(MapError::Http("HTTP 401 Unauthorized".to_string()));
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        Ok(body.into_bytes())
    }
}

/// Locations API body listing `places` as `(name, [lat, lng])`.
pub fn locations_body(places: &[(&str, [f64; 2])]) -> String {
    let resources: Vec<serde_json::Value> = places
        .iter()
        .map(|(name, [lat, lng])| {
            serde_json::json!({
                "name": name,
                "bbox": [lat - 0.1, lng - 0.1, lat + 0.1, lng + 0.1],
                "point": { "type": "Point", "coordinates": [lat, lng] }
            })
        })
        .collect();
    serde_json::json!({ "resourceSets": [{ "estimatedTotal": places.len(), "resources": resources }] }).to_string()
}

/// Data source whose layers resolve after per-slot delays.
#[derive(Default)]
pub struct DelayedSource {
    layers: Vec<(Duration, Layer)>,
    interviews: Vec<Interview>,
    pub layer_loads: Arc<AtomicUsize>,
}

impl DelayedSource {
    pub fn new(layers: Vec<(Duration, Layer)>) -> Self {
        Self {
            layers,
            ..Self::default()
        }
    }

    pub fn with_interviews(mut self, interviews: Vec<Interview>) -> Self {
        self.interviews = interviews;
        self
    }
}

impl DataSource for DelayedSource {
    fn layer_count(&self) -> usize {
        self.layers.len()
    }

    async fn load_layer(&self, index: usize) -> Result<Layer> {
        self.layer_loads.fetch_add(1, Ordering::SeqCst);
        let (delay, layer) = self
            .layers
            .get(index)
            .cloned()
            .ok_or_else(|| MapError::Data(format!("no layer in slot {index}")))?;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        Ok(layer)
    }

    async fn load_interviews(&self) -> Result<Vec<Interview>> {
        Ok(self.interviews.clone())
    }
}

/// A layer with point features at `points` (`[lng, lat]`, GeoJSON order).
pub fn point_layer(key: &str, name: &str, z_index: i32, points: &[[f64; 2]]) -> Layer {
    let features: Vec<serde_json::Value> = points
        .iter()
        .enumerate()
        .map(|(i, [lng, lat])| {
            serde_json::json!({
                "type": "Feature",
                "properties": { "name": format!("{name} #{i}"), "tenants": 12 + i },
                "geometry": { "type": "Point", "coordinates": [lng, lat] }
            })
        })
        .collect();
    let data: FeatureCollection =
        serde_json::from_value(serde_json::json!({ "type": "FeatureCollection", "features": features })).unwrap();

    Layer {
        key: key.to_string(),
        data,
        config: LayerConfig {
            name: name.to_string(),
            z_index,
            ..LayerConfig::default()
        },
    }
}

pub fn geocode_config() -> GeocodeConfig {
    GeocodeConfig {
        api_key: "test-key".to_string(),
        locale: None,
        ..GeocodeConfig::default()
    }
}

pub fn session<D: DataSource + 'static>(
    state: AppState,
    client: ScriptedClient,
    data: D,
) -> MapSession<ScriptedClient, D> {
    let worker = MapWorker::new(Geocoder::new(client, geocode_config()), data);
    MapSession::new(state, worker, Duration::from_millis(200))
}

/// Handles events until nothing has happened for five (virtual) seconds.
pub async fn settle<D: DataSource + 'static>(session: &mut MapSession<ScriptedClient, D>) {
    while tokio::time::timeout(Duration::from_secs(5), session.pump()).await.is_ok() {}
}
