//! Envelope Editor.
//!
//! Demo-Anwendung: ein Hüllkurven-Widget mit Anzeige der aktuellen Punkte
//! und des Pegels unter dem Zeiger.

use eframe::egui;
use envelope_editor::{EnvelopeEvent, EnvelopeOptions, EnvelopePoint, EnvelopeWidget};

fn main() -> Result<(), eframe::Error> {
    AppRunner::run()
}

struct AppRunner;

impl AppRunner {
    fn run() -> Result<(), eframe::Error> {
        // Logger initialisieren
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .init();

        log::info!("Envelope Editor v{} startet...", env!("CARGO_PKG_VERSION"));

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([480.0, 360.0])
                .with_title("Envelope Editor"),
            renderer: eframe::Renderer::Glow,
            ..Default::default()
        };

        eframe::run_native(
            "Envelope Editor",
            options,
            Box::new(|_cc| Ok(Box::new(EditorApp::new()))),
        )
    }
}

/// Haupt-Anwendungsstruktur
struct EditorApp {
    widget: EnvelopeWidget,
    points: Vec<EnvelopePoint>,
    level: Option<f32>,
}

impl EditorApp {
    fn new() -> Self {
        // Optionen aus TOML laden (oder Standardwerte)
        let config_path = EnvelopeOptions::config_path();
        let options = EnvelopeOptions::load_from_file(&config_path);

        let widget = EnvelopeWidget::new(&options);
        let points = widget.envelope().points().to_vec();

        Self {
            widget,
            points,
            level: None,
        }
    }

    fn process_events(&mut self, events: Vec<EnvelopeEvent>) {
        for event in events {
            match event {
                EnvelopeEvent::Changed(points) => {
                    log::debug!("Hüllkurve geändert: {} Punkte", points.len());
                    self.points = points;
                }
                EnvelopeEvent::Scanned(level) => self.level = Some(level),
            }
        }
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Hüllkurve");
            ui.label("Doppelklick: Punkt einfügen · Klick: Punkt löschen · Segment ziehen: Krümmung");
            ui.add_space(8.0);

            let events = self.widget.show(ui);
            self.process_events(events);

            ui.add_space(8.0);
            match self.level {
                Some(level) => ui.monospace(format!("Pegel: {:.3}", level)),
                None => ui.monospace("Pegel: -"),
            };

            ui.separator();
            for (i, point) in self.points.iter().enumerate() {
                ui.monospace(format!(
                    "{:>2}: x = {:.3}  y = {:.3}  p = {:.3}",
                    i, point.x, point.y, point.p
                ));
            }
        });
    }
}
