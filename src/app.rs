use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use tracing::{error, info};

use crate::ui::viewdata::{DataSources, ViewFrame};
use crate::view::ViewOption;

pub struct App {
    sources: DataSources,
    selected: ViewOption,
    frame: Result<ViewFrame, String>,
    exiting: Arc<AtomicBool>,
}

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        sources: DataSources,
        initial: ViewOption,
        pixels_per_point: f32,
        stop_flag: Arc<AtomicBool>,
    ) -> Self {
        cc.egui_ctx.set_pixels_per_point(pixels_per_point);
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let frame = load_frame(initial, &sources);
        Self {
            sources,
            selected: initial,
            frame,
            exiting: stop_flag,
        }
    }
}

/// Reloads both datasets and rebuilds the view.
fn load_frame(view: ViewOption, sources: &DataSources) -> Result<ViewFrame, String> {
    info!("rendering view: {}", view.label());
    ViewFrame::load(view, sources).map_err(|err| {
        error!("failed to build view {}: {err:#}", view.slug());
        format!("Could not load data: {err:#}")
    })
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.exiting.load(Ordering::SeqCst) {
            info!("SIGINT received: closing window.");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            return;
        }

        let shown = self.frame.as_ref().map_err(String::as_str);
        let changed = crate::ui::windows::main_window(ctx, &mut self.selected, shown);
        if changed {
            self.frame = load_frame(self.selected, &self.sources);
            ctx.request_repaint();
        }
        ctx.request_repaint_after(std::time::Duration::from_millis(250));
    }
}
