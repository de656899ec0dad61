use egui::Frame;
use galileo::error::GalileoError;
use galileo_types::geo::GeoPoint;
use geopick::location::SelectedLocation;
use geopick::viewport::MapTheme;
use geopick::weather::WeatherLink;

use crate::map::WorldMap;
use crate::map::egui_state::EguiMapState;

/// The location-selection workflow: owns the viewport, the single active
/// marker, and the theme flag.
pub struct MapScreen {
    token: String,
    theme: MapTheme,
    /// Last theme a viewport was successfully built for.
    built_theme: Option<MapTheme>,
    selected: Option<SelectedLocation>,
    /// `None` between teardown and rebuild. The map engine cannot swap styles
    /// in place, so a theme change drops the whole instance and the next
    /// frame constructs a fresh one.
    map: Option<EguiMapState>,
}

pub enum MapScreenEvent {
    ResetToken,
}

impl MapScreen {
    pub fn new(token: String) -> Self {
        Self {
            token,
            theme: MapTheme::default(),
            built_theme: None,
            selected: None,
            map: None,
        }
    }

    pub fn show(
        &mut self,
        ctx: &egui::Context,
        render_state: &egui_wgpu::RenderState,
        weather: &WeatherLink,
    ) -> Option<MapScreenEvent> {
        if self.map.is_none() {
            self.rebuild_viewport(ctx, render_state);
        }

        egui::CentralPanel::default()
            .frame(Frame::new().inner_margin(0).outer_margin(0))
            .show(ctx, |ui| {
                if let Some(map) = self.map.as_mut() {
                    map.render(ui);
                }
            });

        let mut clicks = Vec::new();
        if let Some(map) = self.map.as_mut() {
            while let Some(position) = map.world_mut().poll_click() {
                clicks.push(position);
            }
        }
        for position in clicks {
            self.select_location(ctx, weather, position.lat(), position.lon());
        }

        let mut event = None;
        egui::Window::new("Controls").resizable(false).show(ctx, |ui| {
            let mut dark = self.theme.is_dark();
            if ui.checkbox(&mut dark, "Dark theme").changed() {
                self.set_theme(MapTheme::from_dark_flag(dark));
            }

            if ui.button("Reset view").clicked() {
                self.reset_view();
            }
            if ui.button("Reset token").clicked() {
                event = Some(MapScreenEvent::ResetToken);
            }

            ui.separator();
            match &self.selected {
                Some(location) => {
                    ui.label("Selected location:");
                    ui.label(format!("Lat: {:.6}° Lon: {:.6}°", location.lat, location.lon));
                    ui.label("Weather lookup opened in the browser.");
                }
                None => {
                    ui.label("Click anywhere on the map to open the weather app for that spot.");
                }
            }
        });

        event
    }

    fn rebuild_viewport(&mut self, ctx: &egui::Context, render_state: &egui_wgpu::RenderState) {
        match self.build_world() {
            Ok(world) => {
                log::info!("Built {:?} map viewport", self.theme);
                self.map = Some(EguiMapState::new(ctx.clone(), render_state.clone(), world));
                self.built_theme = Some(self.theme);
            }
            Err(err) => {
                log::error!("Failed to build {:?} map viewport: {err}", self.theme);
                self.revert_to_built_theme();
            }
        }
    }

    fn build_world(&self) -> Result<WorldMap, GalileoError> {
        let mut world = WorldMap::new(&self.token, self.theme)?;

        // the selection survives theme rebuilds; only the rendering object is new
        if let Some(location) = self.selected {
            world.set_marker(location);
        }

        Ok(world)
    }

    /// Keeps the app on the last theme that produced a working viewport when
    /// a rebuild fails. With nothing built yet the requested theme is simply
    /// retried on the next frame.
    fn revert_to_built_theme(&mut self) {
        if let Some(previous) = self.built_theme.filter(|theme| *theme != self.theme) {
            self.theme = previous;
        }
    }

    fn set_theme(&mut self, theme: MapTheme) {
        if self.theme == theme {
            return;
        }

        self.theme = theme;
        // drop the old instance first; the next frame rebuilds it
        self.map = None;
    }

    fn select_location(
        &mut self,
        ctx: &egui::Context,
        weather: &WeatherLink,
        lat: f64,
        lon: f64,
    ) {
        let url = self.apply_selection(weather, lat, lon);
        // fire-and-forget; a blocked popup is unobservable here
        ctx.open_url(egui::OpenUrl::new_tab(url));
    }

    fn apply_selection(&mut self, weather: &WeatherLink, lat: f64, lon: f64) -> String {
        let location = SelectedLocation::new(lat, lon);
        self.selected = Some(location);

        if let Some(map) = self.map.as_mut() {
            map.world_mut().set_marker(location);
        }

        let url = weather.url_for(&location);
        log::info!("Selected {location}; opening {url}");

        url
    }

    fn reset_view(&mut self) {
        self.selected = None;
        if let Some(map) = self.map.as_mut() {
            let world = map.world_mut();
            world.clear_marker();
            world.reset_view();
        }
    }
}

#[cfg(test)]
mod test {
    use geopick::location::SelectedLocation;
    use geopick::viewport::MapTheme;
    use geopick::weather::WeatherLink;

    use crate::screens::map_screen::MapScreen;

    #[test]
    fn selection_survives_theme_toggle() {
        let mut screen = MapScreen::new("test-key".to_string());
        let weather = WeatherLink::default();

        let url = screen.apply_selection(&weather, 37.7749288914, -122.4194161072);
        assert!(url.contains("lat=37.774929"));
        assert_eq!(
            screen.selected,
            Some(SelectedLocation::new(37.774929, -122.419416))
        );

        screen.set_theme(MapTheme::Dark);

        // the old instance is disposed, the selection is untouched
        assert!(screen.map.is_none());
        assert_eq!(
            screen.selected,
            Some(SelectedLocation::new(37.774929, -122.419416))
        );

        // the rebuilt viewport is seeded with a marker at the preserved selection
        let world = screen.build_world().expect("viewport builds");
        assert_eq!(world.marker_count(), 1);
    }

    #[test]
    fn reset_clears_selection() {
        let mut screen = MapScreen::new("test-key".to_string());
        screen.apply_selection(&WeatherLink::default(), 10.0, 20.0);

        screen.reset_view();

        assert_eq!(screen.selected, None);
        let world = screen.build_world().expect("viewport builds");
        assert_eq!(world.marker_count(), 0);
    }

    #[test]
    fn failed_rebuild_falls_back_to_last_built_theme() {
        let mut screen = MapScreen::new("test-key".to_string());
        screen.built_theme = Some(MapTheme::Light);
        screen.theme = MapTheme::Dark;

        screen.revert_to_built_theme();
        assert_eq!(screen.theme, MapTheme::Light);

        // nothing built yet: keep the requested theme and retry
        let mut fresh = MapScreen::new("test-key".to_string());
        fresh.theme = MapTheme::Dark;
        fresh.revert_to_built_theme();
        assert_eq!(fresh.theme, MapTheme::Dark);
    }
}
