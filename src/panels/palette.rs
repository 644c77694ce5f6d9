use egui::Context;

use crate::components::{ToolButton, swatch};
use crate::state::{EditorContext, IoJobs};
use crate::tool::{EraserKind, PenMode, ToolAction};

/// The floating palette: history, modes, brush, colors and file actions.
pub fn palette_window(ctx: &Context, editor: &mut EditorContext, jobs: &mut IoJobs, info_text: &str) {
    egui::Window::new("Ink")
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-16.0, 16.0))
        .resizable(false)
        .collapsible(true)
        .show(ctx, |ui| {
            ui.label(info_text);
            ui.separator();

            ui.horizontal(|ui| {
                if ui.add_enabled(editor.can_undo(), egui::Button::new("Undo")).clicked() {
                    editor.undo();
                }
                if ui.add_enabled(editor.can_redo(), egui::Button::new("Redo")).clicked() {
                    editor.redo();
                }
            });

            ui.separator();

            let tool = editor.tool_state();
            ui.horizontal(|ui| {
                let drawing = tool.mode() == PenMode::Freehand && !tool.eraser_active();
                if ToolButton::new("✏", "Draw (B)", drawing).show(ui).clicked() {
                    editor.set_eraser_active(false);
                    editor.set_mode(PenMode::Freehand);
                }
                if ToolButton::new("╱", "Line (L)", tool.mode() == PenMode::Line).show(ui).clicked() {
                    editor.set_mode(PenMode::Line);
                }
                let parabola_icon = if tool.curve_reversed() { "⌣" } else { "⌒" };
                if ToolButton::new(parabola_icon, "Parabola", tool.mode() == PenMode::Parabola)
                    .show(ui)
                    .clicked()
                {
                    editor.toggle_parabola_reversal();
                }
                let (eraser_icon, eraser_tip) = match tool.eraser() {
                    Some(EraserKind::Point) => ("✂", "Point eraser (E)"),
                    _ => ("⌫", "Eraser (E)"),
                };
                if ToolButton::new(eraser_icon, eraser_tip, tool.eraser_active())
                    .show(ui)
                    .clicked()
                {
                    editor.apply(ToolAction::CycleEraser);
                }
                if ToolButton::new("🔒", "Lock drawing (R)", !tool.drawing_enabled())
                    .show(ui)
                    .clicked()
                {
                    editor.apply(ToolAction::ToggleDrawing);
                }
            });

            if tool.mode() == PenMode::Parabola {
                ui.label(format!("Curve factor: {:.1}", editor.parabola_factor()));
            }

            ui.horizontal(|ui| {
                if ui.small_button("−").clicked() {
                    editor.cycle_brush(-1);
                }
                ui.label(format!("Brush {:.0}px", editor.brush().size()));
                if ui.small_button("+").clicked() {
                    editor.cycle_brush(1);
                }
            });

            ui.horizontal_wrapped(|ui| {
                let current = editor.brush().color;
                let swatches = editor.config().swatches.clone();
                for color in swatches {
                    if swatch(ui, color, color == current).clicked() {
                        editor.set_color(color);
                    }
                }
            });

            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("Save").clicked() {
                    jobs.quick_save(editor);
                }
                if ui.button("Load").on_hover_text("Load the newest save").clicked() {
                    jobs.load_latest();
                }
                if ui.button("Export").clicked() {
                    jobs.export(editor);
                }
                if ui.button("Clear").clicked() {
                    editor.clear();
                }
            });

            if jobs.is_busy() {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Working…");
                });
            }
        });
}
