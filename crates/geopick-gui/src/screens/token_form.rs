const TOKEN_HELP_URL: &str = "https://cloud.maptiler.com/account/keys/";

/// The access-token collection form. Emits the raw input on submission; the
/// root controller decides whether it passes the gate, so an empty submission
/// simply leaves the form open.
#[derive(Default)]
pub struct TokenForm {
    input: String,
    show_token: bool,
}

pub enum TokenFormEvent {
    Submitted(String),
}

impl TokenForm {
    pub fn show(&mut self, ctx: &egui::Context) -> Option<TokenFormEvent> {
        let mut event = None;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(80.0);
                ui.heading("Geopick");
                ui.label("Pick a point on the map, get the weather there.");
                ui.add_space(24.0);

                ui.label("Tile provider API key");
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.input)
                        .password(!self.show_token)
                        .hint_text("paste your key here")
                        .desired_width(320.0),
                );
                ui.checkbox(&mut self.show_token, "Show key");

                let submitted = ui.button("Start exploring").clicked()
                    || (response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)));
                if submitted {
                    log::debug!("Token form submitted");
                    event = Some(TokenFormEvent::Submitted(self.input.clone()));
                }

                ui.add_space(24.0);
                ui.label("The key is stored locally and never sent anywhere else.");
                ui.hyperlink_to("Get a free key", TOKEN_HELP_URL);
            });
        });

        event
    }
}
