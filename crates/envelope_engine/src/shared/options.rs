//! Zentrale Konfiguration einer Hüllkurve.
//!
//! `EnvelopeOptions` enthält alle Konstruktions-Optionen.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use crate::core::{EnvelopePoint, HitTolerance};
use serde::{Deserialize, Serialize};

// ── Geometrie ───────────────────────────────────────────────────────

/// Standard-Größe des Widgets in Pixeln [Breite, Höhe].
pub const DEFAULT_SIZE: [f32; 2] = [300.0, 150.0];
/// Abtast-Schrittweite des Kurvenzugs in Pixeln.
pub const PATH_RESOLUTION_PX: f32 = 5.0;

// ── Breakpoints ─────────────────────────────────────────────────────

/// Maximale Anzahl Breakpoints.
pub const DEFAULT_MAX_POINTS: usize = 20;
/// Y-Wert, auf den ein Doppelklick einen Breakpoint zurücksetzt.
pub const RESET_LEVEL: f32 = 0.5;

// ── Hit-Test ────────────────────────────────────────────────────────

/// Trefferradius für Breakpoints (normalisiert).
pub const NODE_HIT_RADIUS: f32 = 0.05;
/// Maximaler vertikaler Abstand zur Kurve für Segment-Treffer (normalisiert).
pub const SEGMENT_HIT_DISTANCE: f32 = 0.1;
/// Empfindlichkeit des Krümmungs-Handles beim Segment-Drag.
pub const CURVE_HANDLE_SENSITIVITY: f32 = 1.0;

// ── Farben ──────────────────────────────────────────────────────────

/// Akzentfarbe: Kurve, Fläche, Breakpoints (RGBA).
pub const COLOR_ACCENT: [f32; 4] = [0.17, 0.69, 0.83, 1.0];
/// Hintergrundfarbe (RGBA).
pub const COLOR_FILL: [f32; 4] = [0.93, 0.93, 0.93, 1.0];
/// Achsen- und Anzeige-Kontur (RGBA).
pub const COLOR_AXIS: [f32; 4] = [0.4, 0.4, 0.4, 1.0];
/// Füllung des Anzeige-Markers (RGBA: Schwarz).
pub const COLOR_DISPLAY: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Startpunkte einer neuen Hüllkurve.
pub fn default_points() -> Vec<EnvelopePoint> {
    vec![
        EnvelopePoint::new(0.1, 0.4),
        EnvelopePoint::new(0.35, 0.6),
        EnvelopePoint::new(0.65, 0.2),
        EnvelopePoint::new(0.9, 0.4),
    ]
}

/// Alle Konstruktions-Optionen einer Hüllkurve.
/// Wird als `envelope_editor.toml` neben der Binary gelesen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnvelopeOptions {
    /// Widget-Größe in Pixeln [Breite, Höhe]
    pub size: [f32; 2],
    /// Maximale Anzahl Breakpoints
    pub max_points: usize,
    /// Einfügen neuer Breakpoints sperren
    pub no_new_points: bool,
    /// Gestrichelte Mittellinie zeichnen
    pub show_axis: bool,
    /// Startpunkte (`p` optional)
    pub points: Vec<EnvelopePoint>,
    /// Abtast-Schrittweite des Kurvenzugs in Pixeln
    pub path_resolution_px: f32,
    /// Trefferradius für Breakpoints (normalisiert)
    pub node_hit_radius: f32,
    /// Vertikaler Trefferabstand für Segmente (normalisiert)
    pub segment_hit_distance: f32,
    /// Empfindlichkeit des Krümmungs-Handles
    pub curve_handle_sensitivity: f32,
    /// Akzentfarbe
    pub color_accent: [f32; 4],
    /// Hintergrundfarbe
    pub color_fill: [f32; 4],
    /// Achsenfarbe
    pub color_axis: [f32; 4],
    /// Füllung des Anzeige-Markers
    pub color_display: [f32; 4],
}

impl Default for EnvelopeOptions {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            max_points: DEFAULT_MAX_POINTS,
            no_new_points: false,
            show_axis: false,
            points: default_points(),
            path_resolution_px: PATH_RESOLUTION_PX,
            node_hit_radius: NODE_HIT_RADIUS,
            segment_hit_distance: SEGMENT_HIT_DISTANCE,
            curve_handle_sensitivity: CURVE_HANDLE_SENSITIVITY,
            color_accent: COLOR_ACCENT,
            color_fill: COLOR_FILL,
            color_axis: COLOR_AXIS,
            color_display: COLOR_DISPLAY,
        }
    }
}

impl EnvelopeOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("envelope_editor"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("envelope_editor.toml")
    }

    /// Trefferschwellen für den Hit-Test.
    pub fn hit_tolerance(&self) -> HitTolerance {
        HitTolerance {
            node_radius: self.node_hit_radius,
            segment_distance: self.segment_hit_distance,
        }
    }
}
