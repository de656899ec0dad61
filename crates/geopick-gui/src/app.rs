use eframe::CreationContext;
use geopick::token::{self, TOKEN_STORAGE_KEY, TokenStore};
use geopick::weather::WeatherLink;

use crate::screens::map_screen::{MapScreen, MapScreenEvent};
use crate::screens::token_form::{TokenForm, TokenFormEvent};

pub struct AppOptions {
    pub token: Option<String>,
    pub weather: WeatherLink,
}

enum Screen {
    TokenGate(TokenForm),
    Map(MapScreen),
}

/// Root controller: shows the token form until a non-empty token is known,
/// then hands over to the location-selection workflow.
pub struct GeopickApp {
    screen: Screen,
    weather: WeatherLink,
    render_state: egui_wgpu::RenderState,
}

impl GeopickApp {
    pub fn new(cc: &CreationContext<'_>, options: AppOptions) -> Self {
        let render_state = cc
            .wgpu_render_state
            .clone()
            .expect("failed to get wgpu context");

        let token = options
            .token
            .as_deref()
            .and_then(token::normalize)
            .or_else(|| {
                cc.storage
                    .and_then(|storage| storage.get_string(TOKEN_STORAGE_KEY))
                    .as_deref()
                    .and_then(token::normalize)
            });

        let screen = match token {
            Some(token) => {
                log::info!("Access token available; skipping the token form");
                Screen::Map(MapScreen::new(token))
            }
            None => Screen::TokenGate(TokenForm::default()),
        };

        Self {
            screen,
            weather: options.weather,
            render_state,
        }
    }
}

impl eframe::App for GeopickApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        match &mut self.screen {
            Screen::TokenGate(form) => {
                if let Some(TokenFormEvent::Submitted(raw)) = form.show(ctx) {
                    let token = match frame.storage_mut() {
                        Some(storage) => token::submit(&mut StorageTokenStore(storage), &raw),
                        // persistence disabled; the token still unlocks this run
                        None => token::normalize(&raw),
                    };

                    if let Some(token) = token {
                        self.screen = Screen::Map(MapScreen::new(token));
                    }
                }
            }
            Screen::Map(screen) => {
                if let Some(MapScreenEvent::ResetToken) =
                    screen.show(ctx, &self.render_state, &self.weather)
                {
                    if let Some(storage) = frame.storage_mut() {
                        token::reset(&mut StorageTokenStore(storage));
                    }
                    self.screen = Screen::TokenGate(TokenForm::default());
                }
            }
        }
    }
}

/// [`TokenStore`] over eframe's persisted key-value storage. The storage has
/// no delete operation, so clearing stores an empty value, which the gate
/// reads back as absent.
struct StorageTokenStore<'a>(&'a mut (dyn eframe::Storage + 'static));

impl TokenStore for StorageTokenStore<'_> {
    fn load(&self) -> Option<String> {
        self.0.get_string(TOKEN_STORAGE_KEY)
    }

    fn save(&mut self, token: &str) {
        self.0.set_string(TOKEN_STORAGE_KEY, token.to_string());
        self.0.flush();
    }

    fn clear(&mut self) {
        self.0.set_string(TOKEN_STORAGE_KEY, String::new());
        self.0.flush();
    }
}
