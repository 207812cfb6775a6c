use anyhow::Result;
use flip_motion::engine::animation::{FlipTransform, GeometryRecord, PlayingFlag};
use flip_motion::engine::testing::FakeHost;
use flip_motion::engine::TransformWrite;
use flip_motion::ScaleCompensator;

#[test]
fn idle_compensator_never_schedules_a_frame() -> Result<()> {
    let mut host = FakeHost::new();
    let card = host.add_container(GeometryRecord::new(0.0, 0.0, 100.0, 100.0));
    host.add_child(card, Some("label"), GeometryRecord::new(0.0, 0.0, 100.0, 20.0));

    let mut compensator = ScaleCompensator::new(card, PlayingFlag::new(false));
    assert!(compensator.capture_reference(&host));
    assert!(!compensator.start(&host));

    for _ in 0..3 {
        compensator.frame(&mut host);
    }
    assert_eq!(compensator.frame_requests(), 0);
    assert!(host.writes().is_empty());
    Ok(())
}

#[test]
fn children_keep_their_size_while_the_card_grows() -> Result<()> {
    let mut host = FakeHost::new();
    let card = host.add_container(GeometryRecord::new(0.0, 0.0, 100.0, 100.0));
    let label = host.add_child(card, Some("label"), GeometryRecord::new(0.0, 0.0, 100.0, 20.0));

    let playing = PlayingFlag::new(true);
    let mut compensator = ScaleCompensator::new(card, playing.clone());
    compensator.capture_reference(&host);
    assert!(compensator.start(&host));

    for (step, width) in [125.0, 150.0, 200.0].into_iter().enumerate() {
        host.set_geometry(card, GeometryRecord::new(0.0, 0.0, width, 100.0));
        compensator.frame(&mut host);

        let Some(TransformWrite::Scale(scale)) = host.last_write(label).and_then(|w| w.transform)
        else {
            panic!("no scale written at step {step}");
        };
        assert!((scale.scale_x * width / 100.0 - 1.0).abs() < 1e-9);
        assert_eq!(scale.scale_y, 1.0);
    }

    playing.set(false);
    let writes = host.writes().len();
    compensator.frame(&mut host);
    assert_eq!(host.writes().len(), writes);
    assert!(!compensator.has_pending_frame());

    // Static mode after the gesture settles on a 2x scale.
    compensator.set_captured_scale(Some(FlipTransform::scale(2.0, 1.0)));
    assert_eq!(compensator.apply_static(&mut host), 1);
    assert_eq!(
        host.last_write(label).and_then(|w| w.transform),
        Some(TransformWrite::Scale(FlipTransform::scale(0.5, 1.0)))
    );
    Ok(())
}
