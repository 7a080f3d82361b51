use super::*;
use crate::core::{EMPTY_LEVEL, P_MAX, P_MIN};
use crate::render::RetainedScene;
use approx::assert_abs_diff_eq;

fn default_envelope() -> Envelope<RetainedScene> {
    Envelope::new(&EnvelopeOptions::default(), RetainedScene::new())
}

fn envelope_with(options: EnvelopeOptions) -> Envelope<RetainedScene> {
    Envelope::new(&options, RetainedScene::new())
}

fn assert_invariants(envelope: &Envelope<RetainedScene>) {
    let nodes = envelope.nodes();
    for pair in nodes.windows(2) {
        assert!(pair[0].x() <= pair[1].x(), "Reihenfolge verletzt: {:?}", nodes);
    }
    for node in nodes {
        assert!((0.0..=1.0).contains(&node.x()));
        assert!((0.0..=1.0).contains(&node.y()));
        assert!((P_MIN..=P_MAX).contains(&node.curvature()));
    }
    assert_eq!(envelope.points().len(), nodes.len());
}

fn changed_payloads(envelope: &mut Envelope<RetainedScene>) -> Vec<Vec<EnvelopePoint>> {
    envelope
        .take_events()
        .into_iter()
        .filter_map(|e| match e {
            EnvelopeEvent::Changed(points) => Some(points),
            EnvelopeEvent::Scanned(_) => None,
        })
        .collect()
}

#[test]
fn test_default_envelope_creation() {
    let mut envelope = default_envelope();

    assert_eq!(envelope.len(), 4);
    assert_eq!(envelope.points()[1], EnvelopePoint::new(0.35, 0.6));
    // 4 Breakpoints + Anzeige-Marker
    assert_eq!(envelope.surface().marker_count(), 5);
    assert!(envelope.take_events().is_empty());
    assert_invariants(&envelope);
}

#[test]
fn test_scan_at_breakpoints_and_emits_scanned() {
    let mut envelope = default_envelope();

    assert_abs_diff_eq!(envelope.scan(0.1), 0.4, epsilon = 1e-6);
    assert_abs_diff_eq!(envelope.scan(0.35), 0.6, epsilon = 1e-6);

    let events = envelope.take_events();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], EnvelopeEvent::Scanned(v) if (v - 0.4).abs() < 1e-6));
}

#[test]
fn test_level_at_does_not_emit() {
    let mut envelope = default_envelope();
    let _ = envelope.level_at(0.5);
    let _ = envelope.find_nearest_element(Vec2::new(150.0, 75.0));
    assert!(envelope.take_events().is_empty());
}

#[test]
fn test_add_point_between_existing_nodes() {
    let mut envelope = default_envelope();

    let index = envelope.add_point(0.5, 0.5);

    assert_eq!(index, Some(2));
    assert_eq!(envelope.len(), 5);
    let changes = changed_payloads(&mut envelope);
    assert_eq!(changes.len(), 1);
    let xs: Vec<f32> = changes[0].iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![0.1, 0.35, 0.5, 0.65, 0.9]);
    assert_eq!(envelope.surface().marker_count(), 6);
    assert_invariants(&envelope);
}

#[test]
fn test_add_point_rejected_at_capacity() {
    let mut envelope = envelope_with(EnvelopeOptions {
        max_points: 4,
        ..EnvelopeOptions::default()
    });

    assert_eq!(envelope.add_point(0.5, 0.5), None);
    assert_eq!(envelope.len(), 4);
    assert!(envelope.take_events().is_empty());
    assert_eq!(
        envelope.try_add_point(0.5, 0.5),
        Err(EnvelopeError::CapacityReached { max_points: 4 })
    );
}

#[test]
fn test_add_point_rejected_when_insertion_disabled() {
    let mut envelope = envelope_with(EnvelopeOptions {
        no_new_points: true,
        ..EnvelopeOptions::default()
    });

    // Startpunkte werden trotz Sperre übernommen
    assert_eq!(envelope.len(), 4);
    assert_eq!(
        envelope.try_add_point(0.5, 0.5),
        Err(EnvelopeError::InsertionDisabled)
    );
    assert_eq!(envelope.len(), 4);
}

#[test]
fn test_add_point_rejects_nan() {
    let mut envelope = default_envelope();
    assert!(matches!(
        envelope.try_add_point(f32::NAN, 0.5),
        Err(EnvelopeError::InvalidPosition { .. })
    ));
    assert_eq!(envelope.len(), 4);
}

#[test]
fn test_move_point_is_clamped_between_neighbors() {
    let mut envelope = default_envelope();

    envelope.move_point(1, 0.9, 1.3).expect("gültiger Index");

    assert_eq!(envelope.nodes()[1].x(), 0.65);
    assert_eq!(envelope.nodes()[1].y(), 1.0);
    assert_invariants(&envelope);

    envelope.move_point(0, -0.5, 0.2).expect("gültiger Index");
    assert_eq!(envelope.nodes()[0].x(), 0.0);
}

#[test]
fn test_adjust_point_moves_relative() {
    let mut envelope = default_envelope();

    envelope.adjust_point(2, 0.05, -0.1).expect("gültiger Index");

    assert_abs_diff_eq!(envelope.nodes()[2].x(), 0.7, epsilon = 1e-6);
    assert_abs_diff_eq!(envelope.nodes()[2].y(), 0.1, epsilon = 1e-6);
    assert_eq!(changed_payloads(&mut envelope).len(), 1);
}

#[test]
fn test_index_out_of_range_is_reported_without_event() {
    let mut envelope = default_envelope();

    let expected = Err(EnvelopeError::IndexOutOfRange { index: 7, len: 4 });
    assert_eq!(envelope.move_point(7, 0.5, 0.5), expected);
    assert_eq!(envelope.adjust_point(7, 0.1, 0.1), expected);
    assert_eq!(envelope.set_curve(7, 2.0), expected);
    assert_eq!(envelope.reset_point(7), expected);
    assert!(envelope.destroy_point(7).is_err());
    assert!(envelope.take_events().is_empty());
}

#[test]
fn test_destroy_point_releases_marker() {
    let mut envelope = default_envelope();
    let marker = envelope.nodes()[1].marker();

    let removed = envelope.destroy_point(1).expect("gültiger Index");

    assert_eq!(removed, EnvelopePoint::new(0.35, 0.6));
    assert_eq!(envelope.len(), 3);
    assert!(envelope.surface().marker(marker).is_none());
    assert_eq!(changed_payloads(&mut envelope)[0].len(), 3);
}

#[test]
fn test_set_curve_ignores_first_node_and_clips() {
    let mut envelope = default_envelope();

    envelope.set_curve(0, 5.0).expect("gültiger Index");
    assert_eq!(envelope.nodes()[0].curvature(), 1.0);

    envelope.set_curve(2, 50.0).expect("gültiger Index");
    assert_eq!(envelope.nodes()[2].curvature(), P_MAX);

    envelope.adjust_curve(2, -100.0).expect("gültiger Index");
    assert_eq!(envelope.nodes()[2].curvature(), P_MIN);
}

#[test]
fn test_reset_point_keeps_x() {
    let mut envelope = default_envelope();
    envelope.set_curve(2, 4.0).expect("gültiger Index");

    envelope.reset_point(2).expect("gültiger Index");

    let node = &envelope.nodes()[2];
    assert_eq!(node.x(), 0.65);
    assert_eq!(node.y(), 0.5);
    assert_eq!(node.curvature(), 1.0);
}

#[test]
fn test_set_points_respects_capacity_and_emits_once() {
    let mut envelope = envelope_with(EnvelopeOptions {
        max_points: 3,
        ..EnvelopeOptions::default()
    });
    envelope.take_events();

    envelope.set_points(&[
        EnvelopePoint::new(0.8, 0.1),
        EnvelopePoint::with_curvature(0.2, 0.9, 3.0),
        EnvelopePoint::with_curvature(0.5, 0.5, 2.0),
        EnvelopePoint::new(0.6, 0.6),
    ]);

    assert_eq!(envelope.len(), 3);
    let xs: Vec<f32> = envelope.points().iter().map(|p| p.x).collect();
    assert_eq!(xs, vec![0.2, 0.5, 0.8]);
    assert_eq!(envelope.nodes()[1].curvature(), 2.0);
    // 3 Breakpoints + Anzeige-Marker, alte Marker freigegeben
    assert_eq!(envelope.surface().marker_count(), 4);
    assert_eq!(changed_payloads(&mut envelope).len(), 1);
    assert_invariants(&envelope);
}

#[test]
fn test_initial_points_are_sorted_and_clamped() {
    let envelope = envelope_with(EnvelopeOptions {
        points: vec![
            EnvelopePoint::new(1.4, 0.5),
            EnvelopePoint::with_curvature(0.3, -0.2, 40.0),
            EnvelopePoint::new(f32::NAN, 0.5),
        ],
        ..EnvelopeOptions::default()
    });

    assert_eq!(envelope.len(), 2);
    assert_eq!(envelope.nodes()[0].position(), Vec2::new(0.3, 0.0));
    assert_eq!(envelope.nodes()[1].x(), 1.0);
    assert_invariants(&envelope);
}

#[test]
fn test_empty_envelope_is_evaluable() {
    let mut envelope = default_envelope();
    while !envelope.is_empty() {
        envelope.destroy_point(0).expect("gültiger Index");
    }

    assert_eq!(envelope.scan(0.5), EMPTY_LEVEL);
    assert_eq!(envelope.find_nearest_element(Vec2::new(150.0, 75.0)), None);
    let curve = envelope.surface().polyline(PolylineLayer::Curve);
    assert!(curve.iter().all(|p| p.y == 150.0));

    assert_eq!(envelope.add_point(0.5, 0.5), Some(0));
}

#[test]
fn test_hit_test_uses_pixel_coordinates() {
    let envelope = default_envelope();

    // Node 1 liegt bei (105, 60) Pixel
    assert_eq!(
        envelope.find_nearest_element(Vec2::new(106.0, 61.0)),
        Some(HitTarget::Node(1))
    );
    // Kurve bei x = 0.5 liegt bei 0.4 → 90 Pixel
    assert_eq!(
        envelope.find_nearest_element(Vec2::new(150.0, 85.0)),
        Some(HitTarget::Segment(2))
    );
}

#[test]
fn test_resize_replaces_markers_and_path() {
    let mut envelope = default_envelope();
    assert_eq!(envelope.marker_radius(), 5.0);

    envelope.resize(600.0, 300.0);

    assert_eq!(envelope.marker_radius(), 8.0);
    let marker = envelope.nodes()[0].marker();
    let shape = envelope.surface().marker(marker).expect("Marker erwartet");
    assert_abs_diff_eq!(shape.center.x, 60.0, epsilon = 1e-3);
    assert_abs_diff_eq!(shape.center.y, 180.0, epsilon = 1e-3);
    assert_eq!(shape.radius, 8.0);
    let curve = envelope.surface().polyline(PolylineLayer::Curve);
    assert_eq!(curve.last().map(|p| p.x), Some(600.0));
}

#[test]
fn test_axis_only_rendered_when_enabled() {
    let hidden = default_envelope();
    assert!(hidden.surface().polyline(PolylineLayer::Axis).is_empty());

    let shown = envelope_with(EnvelopeOptions {
        show_axis: true,
        ..EnvelopeOptions::default()
    });
    assert_eq!(shown.surface().polyline(PolylineLayer::Axis).len(), 2);
}

#[test]
fn test_set_display_keeps_omitted_axis() {
    let mut envelope = default_envelope();

    envelope.set_display(Some(0.5), Some(0.25));
    envelope.set_display(None, Some(0.75));

    assert_eq!(envelope.display().position(), Vec2::new(0.5, 0.75));
    let shape = envelope
        .surface()
        .marker(envelope.display().marker())
        .expect("Anzeige-Marker erwartet");
    assert_abs_diff_eq!(shape.center.x, 150.0, epsilon = 1e-3);
    assert!(envelope.take_events().is_empty());
}

#[test]
fn test_invariants_hold_for_mixed_operation_sequence() {
    let mut envelope = default_envelope();
    // Deterministischer Pseudo-Zufall (LCG)
    let mut seed: u32 = 0x2545_f491;
    let mut next = || {
        seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (seed >> 8) as f32 / (1u32 << 24) as f32
    };

    for _ in 0..500 {
        let op = next();
        let len = envelope.len();
        if op < 0.3 {
            let _ = envelope.add_point(next() * 1.4 - 0.2, next() * 1.4 - 0.2);
        } else if op < 0.6 && len > 0 {
            let index = (next() * len as f32) as usize % len;
            envelope
                .move_point(index, next() * 1.4 - 0.2, next() * 1.4 - 0.2)
                .expect("gültiger Index");
        } else if op < 0.8 && len > 0 {
            let index = (next() * len as f32) as usize % len;
            envelope
                .adjust_curve(index, next() * 20.0 - 10.0)
                .expect("gültiger Index");
        } else if len > 0 {
            let index = (next() * len as f32) as usize % len;
            envelope.destroy_point(index).expect("gültiger Index");
        }
        assert_invariants(&envelope);
    }
}

#[test]
fn test_coincident_nodes_beyond_leaf_capacity() {
    let mut envelope = envelope_with(EnvelopeOptions {
        max_points: 64,
        points: Vec::new(),
        ..EnvelopeOptions::default()
    });

    for _ in 0..40 {
        assert!(envelope.add_point(1.0, 1.0).is_some());
    }

    assert_eq!(envelope.len(), 40);
    assert_invariants(&envelope);
    assert_eq!(
        envelope.find_nearest_element(Vec2::new(299.0, 1.0)),
        Some(HitTarget::Node(0))
    );
    assert_abs_diff_eq!(envelope.scan(0.5), 1.0, epsilon = 1e-6);
}

#[test]
fn test_nodes_pinned_by_clamping_stack_on_one_position() {
    let mut envelope = envelope_with(EnvelopeOptions {
        max_points: 64,
        points: Vec::new(),
        ..EnvelopeOptions::default()
    });

    // Punkte außerhalb der Fläche landen alle bei (1, 0).
    for i in 0..50 {
        envelope.add_point(1.5 + i as f32, -2.0);
    }
    let snapshot = envelope.points().to_vec();
    envelope.set_points(&snapshot);

    assert_eq!(envelope.len(), 50);
    assert!(envelope.nodes().iter().all(|n| n.position() == Vec2::new(1.0, 0.0)));
    assert_invariants(&envelope);

    // Jeder gestapelte Punkt lässt sich löschen, der Index bleibt konsistent.
    while !envelope.is_empty() {
        envelope.destroy_point(0).expect("gültiger Index");
        assert_invariants(&envelope);
    }
}

#[test]
fn test_invariants_hold_with_large_capacity() {
    let mut envelope = envelope_with(EnvelopeOptions {
        max_points: 200,
        ..EnvelopeOptions::default()
    });
    let mut seed: u32 = 0x9e37_79b9;
    let mut next = || {
        seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (seed >> 8) as f32 / (1u32 << 24) as f32
    };

    for _ in 0..600 {
        let op = next();
        let len = envelope.len();
        if op < 0.6 {
            // Grobe Quantisierung erzeugt viele zusammenfallende Punkte.
            let x = (next() * 3.0).floor() / 2.0;
            let y = (next() * 3.0).floor() / 2.0;
            let _ = envelope.add_point(x, y);
        } else if op < 0.8 && len > 0 {
            let index = (next() * len as f32) as usize % len;
            envelope
                .adjust_curve(index, next() * 40.0 - 20.0)
                .expect("gültiger Index");
        } else if len > 0 {
            let index = (next() * len as f32) as usize % len;
            envelope.destroy_point(index).expect("gültiger Index");
        }
        assert_invariants(&envelope);
        let _ = envelope.find_nearest_element(Vec2::new(next() * 300.0, next() * 150.0));
    }
}

#[test]
fn test_scan_matches_breakpoints_after_edits() {
    let mut envelope = default_envelope();
    envelope.set_curve(1, 3.0).expect("gültiger Index");
    envelope.set_curve(2, 0.3).expect("gültiger Index");
    envelope.add_point(0.5, 0.9);

    let positions: Vec<Vec2> = envelope.nodes().iter().map(Breakpoint::position).collect();
    for pos in positions {
        assert_abs_diff_eq!(envelope.scan(pos.x), pos.y, epsilon = 1e-6);
    }
}
