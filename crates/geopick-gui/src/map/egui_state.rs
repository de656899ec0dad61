use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use galileo::Messenger;
use galileo::control::{MouseButton, RawUserEvent};
use galileo::render::WgpuRenderer;
use galileo_types::cartesian::{Point2, Size};

use crate::map::WorldMap;

/// Embeds a [`WorldMap`] in egui: the galileo renderer draws into a wgpu
/// texture registered with egui, and egui input events are translated into
/// raw map events while the pointer is over the map rect.
pub struct EguiMapState {
    map: WorldMap,
    renderer: WgpuRenderer,
    render_state: egui_wgpu::RenderState,
    texture_id: egui::TextureId,
    texture_view: wgpu::TextureView,
    requires_redraw: Arc<AtomicBool>,
}

impl EguiMapState {
    pub fn new(
        ctx: egui::Context,
        render_state: egui_wgpu::RenderState,
        mut map: WorldMap,
    ) -> Self {
        let requires_redraw = Arc::new(AtomicBool::new(true));
        let messenger = RepaintMessenger {
            context: ctx,
            requires_redraw: requires_redraw.clone(),
        };

        let size = Size::new(1, 1);
        {
            let galileo_map = map.map_mut();
            galileo_map.set_messenger(Some(messenger.clone()));
            galileo_map.set_size(size.cast());

            galileo_map
                .layers_mut()
                .iter_mut()
                .for_each(|layer| layer.set_messenger(Box::new(messenger.clone())));
        }

        let renderer = WgpuRenderer::new_with_device_and_texture(
            render_state.device.clone(),
            render_state.queue.clone(),
            size,
        );

        let texture_view = renderer
            .get_target_texture_view()
            .expect("failed to get map texture");
        let texture_id = render_state.renderer.write().register_native_texture(
            &render_state.device,
            &texture_view,
            wgpu::FilterMode::Nearest,
        );

        Self {
            map,
            renderer,
            render_state,
            texture_id,
            texture_view,
            requires_redraw,
        }
    }

    pub fn world(&self) -> &WorldMap {
        &self.map
    }

    pub fn world_mut(&mut self) -> &mut WorldMap {
        &mut self.map
    }

    pub fn render(&mut self, ui: &mut egui::Ui) -> egui::Response {
        let available_size = ui.max_rect().size();
        let map_size = self.renderer.size().cast::<f32>();

        let (rect, response) =
            ui.allocate_exact_size(available_size, egui::Sense::click_and_drag());

        if response.contains_pointer() {
            let events = ui.input(|input| input.events.clone());
            for event in &events {
                if let Some(raw) = convert_event(event, [-rect.left(), -rect.top()]) {
                    self.map.handle_event(raw);
                }
            }
        }

        self.map.map_mut().animate();

        if available_size[0] != map_size.width() || available_size[1] != map_size.height() {
            self.resize(available_size);
        }

        if self.requires_redraw.swap(false, Ordering::Relaxed) {
            self.draw();
        }

        egui::Image::new(egui::ImageSource::Texture(egui::load::SizedTexture::new(
            self.texture_id,
            egui::Vec2::new(map_size.width(), map_size.height()),
        )))
        .paint_at(ui, rect);

        response
    }

    fn resize(&mut self, size: egui::Vec2) {
        log::trace!("Resizing map to {size:?}");

        let size = Size::new(size.x as f64, size.y as f64);
        self.map.map_mut().set_size(size);

        let size = Size::new(size.width() as u32, size.height() as u32);
        self.renderer.resize(size);

        // Resizing the renderer creates a new target texture, so the texture
        // registered with egui must be replaced as well. The old binding is
        // freed first so resizes do not accumulate dead textures.
        let texture_view = self
            .renderer
            .get_target_texture_view()
            .expect("failed to get map texture");
        let mut egui_renderer = self.render_state.renderer.write();
        egui_renderer.free_texture(&self.texture_id);
        self.texture_id = egui_renderer.register_native_texture(
            &self.render_state.device,
            &texture_view,
            wgpu::FilterMode::Nearest,
        );
        drop(egui_renderer);
        self.texture_view = texture_view;

        self.map.map().redraw();
    }

    fn draw(&mut self) {
        log::trace!("Redrawing the map");
        self.map.map().load_layers();
        self.renderer
            .render_to_texture_view(self.map.map(), &self.texture_view);
    }
}

impl Drop for EguiMapState {
    fn drop(&mut self) {
        // a theme rebuild disposes the whole instance; release its binding in
        // egui's renderer along with it
        self.render_state
            .renderer
            .write()
            .free_texture(&self.texture_id);
    }
}

fn convert_event(event: &egui::Event, offset: [f32; 2]) -> Option<RawUserEvent> {
    match event {
        egui::Event::PointerButton {
            button, pressed, ..
        } => {
            let button = match button {
                egui::PointerButton::Primary => MouseButton::Left,
                egui::PointerButton::Secondary => MouseButton::Right,
                egui::PointerButton::Middle => MouseButton::Middle,
                _ => MouseButton::Other,
            };

            Some(match pressed {
                true => RawUserEvent::ButtonPressed(button),
                false => RawUserEvent::ButtonReleased(button),
            })
        }
        egui::Event::PointerMoved(position) => {
            let pointer_position =
                Point2::new((position.x + offset[0]) as f64, (position.y + offset[1]) as f64);
            Some(RawUserEvent::PointerMoved(pointer_position))
        }
        egui::Event::MouseWheel { delta, .. } => {
            let zoom = delta[1] as f64;
            if zoom.abs() < 0.0001 {
                return None;
            }

            Some(RawUserEvent::Scroll(zoom))
        }
        _ => None,
    }
}

/// Asks egui for a repaint whenever the map engine wants a redraw.
#[derive(Debug, Clone)]
struct RepaintMessenger {
    requires_redraw: Arc<AtomicBool>,
    context: egui::Context,
}

impl Messenger for RepaintMessenger {
    fn request_redraw(&self) {
        if !self.requires_redraw.swap(true, Ordering::Relaxed) {
            self.context.request_repaint();
        }
    }
}
