use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use galileo::control::{
    EventProcessor, EventPropagation, MapController, MouseButton, RawUserEvent, UserEvent,
};
use galileo::error::GalileoError;
use galileo::layer::FeatureLayer;
use galileo::layer::feature_layer::FeatureId;
use galileo::layer::raster_tile_layer::RasterTileLayerBuilder;
use galileo::symbol::CirclePointSymbol;
use galileo::{Color, Map as GalileoMap, MapBuilder, MapView, TileSchema};
use galileo_types::geo::impls::GeoPoint2d;
use galileo_types::geo::{Crs, NewGeoPoint};
use galileo_types::geometry_type::GeoSpace2d;
use galileo_types::latlon;
use geopick::location::SelectedLocation;
use geopick::viewport::{DEFAULT_CENTER, DEFAULT_ZOOM, MapTheme, RESET_ANIMATION_MS};
use parking_lot::RwLock;

pub mod egui_state;

const TILE_URL: &str = "https://api.maptiler.com/maps";

/// Marker color, a fixed blue.
const MARKER_COLOR: Color = Color::rgba(0x3b, 0x82, 0xf6, 0xff);
const MARKER_SIZE: f64 = 9.0;

type MarkerLayer = FeatureLayer<GeoPoint2d, GeoPoint2d, CirclePointSymbol, GeoSpace2d>;

/// The map engine instance owned by the location-selection workflow: the
/// galileo map with its tile layer, the single-marker feature layer, and the
/// click subscription. One instance per theme; a theme change disposes it and
/// a fresh one is built.
pub struct WorldMap {
    map: GalileoMap,
    event_processor: EventProcessor,
    marker_layer: Arc<RwLock<MarkerLayer>>,
    marker_id: Option<FeatureId>,
    clicks: Receiver<GeoPoint2d>,
}

impl WorldMap {
    pub fn new(token: &str, theme: MapTheme) -> Result<Self, GalileoError> {
        let style = theme.style_id();
        let key = token.to_string();
        let tile_layer = RasterTileLayerBuilder::new_rest(move |index| {
            format!(
                "{TILE_URL}/{style}/256/{}/{}/{}.jpg?key={key}",
                index.z, index.x, index.y
            )
        })
        .with_file_cache_checked(".tile_cache")
        .build()?;

        let marker_layer = Arc::new(RwLock::new(FeatureLayer::new(
            vec![],
            CirclePointSymbol::new(MARKER_COLOR, MARKER_SIZE),
            Crs::WGS84,
        )));

        let map = MapBuilder::default()
            .with_latlon(DEFAULT_CENTER.0, DEFAULT_CENTER.1)
            .with_z_level(DEFAULT_ZOOM)
            .with_layer(tile_layer)
            .with_layer(marker_layer.clone())
            .build();

        let (click_tx, clicks) = mpsc::channel();
        let mut event_processor = EventProcessor::default();
        event_processor.add_handler(move |ev: &UserEvent, map: &mut GalileoMap| {
            if let UserEvent::Click(MouseButton::Left, event) = ev {
                if let Some(position) = map.view().screen_to_map_geo(event.screen_pointer_position)
                {
                    let _ = click_tx.send(position);
                }
            }

            EventPropagation::Propagate
        });
        event_processor.add_handler(MapController::default());

        Ok(Self {
            map,
            event_processor,
            marker_layer,
            marker_id: None,
            clicks,
        })
    }

    /// Next unhandled left-click on the map, as geographic coordinates.
    pub fn poll_click(&mut self) -> Option<GeoPoint2d> {
        self.clicks.try_recv().ok()
    }

    /// Replaces the marker. The previous feature is removed first so exactly
    /// one marker exists at any time.
    pub fn set_marker(&mut self, location: SelectedLocation) {
        let mut layer = self.marker_layer.write();
        if let Some(id) = self.marker_id.take() {
            layer.features_mut().remove(id);
            layer.update_feature(id);
        }

        let id = layer
            .features_mut()
            .add(GeoPoint2d::latlon(location.lat, location.lon));
        layer.update_feature(id);
        self.marker_id = Some(id);
        drop(layer);

        log::debug!("Placed marker at {location}");
        self.map.redraw();
    }

    pub fn clear_marker(&mut self) {
        let Some(id) = self.marker_id.take() else {
            return;
        };

        let mut layer = self.marker_layer.write();
        layer.features_mut().remove(id);
        layer.update_feature(id);
        drop(layer);

        log::debug!("Removed marker");
        self.map.redraw();
    }

    /// Animates the viewport back to the default center and zoom.
    pub fn reset_view(&mut self) {
        let target = MapView::new(
            &latlon!(DEFAULT_CENTER.0, DEFAULT_CENTER.1),
            TileSchema::web(18)
                .lod_resolution(DEFAULT_ZOOM)
                .expect("valid default zoom"),
        );
        self.map
            .animate_to(target, Duration::from_millis(RESET_ANIMATION_MS));
    }

    pub fn handle_event(&mut self, event: RawUserEvent) {
        self.event_processor.handle(event, &mut self.map);
    }

    pub fn map(&self) -> &GalileoMap {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut GalileoMap {
        &mut self.map
    }

    #[cfg(test)]
    pub(crate) fn marker_count(&self) -> usize {
        self.marker_layer.read().features().iter().count()
    }
}
