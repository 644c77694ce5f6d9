use std::sync::Arc;
use std::time::{Duration, Instant};

use egui::{Color32, CursorIcon};
use parking_lot::Mutex;

use crate::config::OverlayConfig;
use crate::event::{CanvasLook, CanvasLookHandler, InfoBox, InfoBoxHandler};
use crate::file_handler::FileHandler;
use crate::geometry::DrawBounds;
use crate::input::InputHandler;
use crate::panels::palette_window;
use crate::renderer::Renderer;
use crate::state::{EditorContext, IoJobs, StrokeStore};
use crate::tool::CursorKind;

/// Key under which the settings are persisted between runs
const CONFIG_KEY: &str = "ink_overlay_config";

/// The transparent always-on-top ink overlay
pub struct OverlayApp {
    editor: EditorContext,
    jobs: IoJobs,
    input: InputHandler,
    files: FileHandler,
    info: Arc<Mutex<InfoBox>>,
    look: Arc<Mutex<CanvasLook>>,
}

impl OverlayApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config: OverlayConfig = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, CONFIG_KEY))
            .unwrap_or_default();
        Self::with_config(config)
    }

    pub fn with_config(config: OverlayConfig) -> Self {
        let store = StrokeStore::new(config.save_dir.clone());
        let notice_duration = config.notice_duration;
        let editor = EditorContext::new(config);

        let info = Arc::new(Mutex::new(InfoBox::new(editor.status_label(), notice_duration)));
        editor
            .event_bus()
            .subscribe(Box::new(InfoBoxHandler::new(Arc::clone(&info))));
        let look = Arc::new(Mutex::new(CanvasLook::of(&editor.tool_state())));
        editor
            .event_bus()
            .subscribe(Box::new(CanvasLookHandler::new(Arc::clone(&look))));

        log::info!("Saving ink under {}", store.dir().display());
        Self {
            editor,
            jobs: IoJobs::new(store),
            input: InputHandler::new(),
            files: FileHandler::new(),
            info,
            look,
        }
    }

    pub fn editor(&self) -> &EditorContext {
        &self.editor
    }

    fn canvas(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::TRANSPARENT))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                self.editor.set_bounds(DrawBounds::from_rect(rect));

                let drawing_enabled = self.editor.tool_state().drawing_enabled();
                let sense = if drawing_enabled {
                    egui::Sense::click_and_drag()
                } else {
                    egui::Sense::hover()
                };
                let (response, painter) = ui.allocate_painter(rect.size(), sense);
                if drawing_enabled {
                    // A fully transparent surface lets the pointer fall through on some platforms
                    painter.rect_filled(rect, 0.0, Color32::from_black_alpha(1));
                }

                for event in self.input.process_input(ctx, &response, rect.min) {
                    self.editor.handle_input(&event);
                }

                let renderer = Renderer::new(rect.min);
                renderer.draw_strokes(&painter, self.editor.document().strokes());
                if let Some(points) = self.editor.session().live_ink() {
                    renderer.draw_points(&painter, points, &self.editor.brush().style());
                }

                if response.hovered() {
                    let look = *self.look.lock();
                    match look.cursor {
                        CursorKind::Crosshair => ctx.set_cursor_icon(CursorIcon::Crosshair),
                        CursorKind::Default => {}
                    }
                    if look.is_erasing() {
                        if let Some(pos) = response.hover_pos() {
                            renderer.draw_eraser_cursor(&painter, pos, self.editor.brush().eraser_radius());
                        }
                    }
                }
            });
    }
}

impl eframe::App for OverlayApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, CONFIG_KEY, self.editor.config());
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.jobs.poll(&mut self.editor);

        for path in self.files.take_dropped_ink_files(ctx) {
            self.jobs.load_file(&path);
        }
        self.files.preview_files_being_dropped(ctx);

        let info_text = self.info.lock().text(Instant::now()).to_owned();
        palette_window(ctx, &mut self.editor, &mut self.jobs, &info_text);
        self.canvas(ctx);

        // Keep polling while work is in flight or a notice is waiting to expire
        if self.jobs.is_busy() || self.info.lock().has_notice() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.jobs.save_on_exit(&mut self.editor);
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0, 0.0, 0.0, 0.0]
    }
}
