#![no_main]

use envelope_editor::{
    Envelope, EnvelopeController, EnvelopeOptions, P_MAX, P_MIN, PointerIntent, RetainedScene,
};
use glam::Vec2;
use libfuzzer_sys::fuzz_target;

// Je 5 Bytes: Operation, X (u16), Y (u16). Koordinaten reichen über die
// Zeichenfläche hinaus.
fn decode(chunk: &[u8]) -> PointerIntent {
    let x = f32::from(u16::from_le_bytes([chunk[1], chunk[2]])) / 100.0 - 50.0;
    let y = f32::from(u16::from_le_bytes([chunk[3], chunk[4]])) / 200.0 - 50.0;
    let pos = Vec2::new(x, y);

    match chunk[0] % 6 {
        0 => PointerIntent::Pressed { pos },
        1 | 2 => PointerIntent::Moved { pos },
        3 => PointerIntent::Released,
        4 => PointerIntent::DoubleClicked { pos },
        _ => PointerIntent::Resized {
            size: [x.abs() + 1.0, y.abs() + 1.0],
        },
    }
}

fuzz_target!(|data: &[u8]| {
    // Erstes Byte: Kapazität
    let Some((&capacity, data)) = data.split_first() else {
        return;
    };
    let max_points = 1 + usize::from(capacity % 64);
    let options = EnvelopeOptions {
        max_points,
        ..EnvelopeOptions::default()
    };
    let mut envelope = Envelope::new(&options, RetainedScene::new());
    let mut controller = EnvelopeController::new(&options);

    for chunk in data.chunks_exact(5) {
        let _ = controller.handle_intent(&mut envelope, decode(chunk));

        let nodes = envelope.nodes();
        assert!(nodes.len() <= max_points);
        for pair in nodes.windows(2) {
            assert!(pair[0].x() <= pair[1].x());
        }
        for node in nodes {
            assert!((0.0..=1.0).contains(&node.x()));
            assert!((0.0..=1.0).contains(&node.y()));
            assert!((P_MIN..=P_MAX).contains(&node.curvature()));
        }
        assert_eq!(envelope.points().len(), nodes.len());
        assert!(envelope.level_at(0.5).is_finite());
    }
});
