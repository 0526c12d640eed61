use super::*;
use crate::rig::{
    landmark::{LANDMARK_COUNT, Landmark},
    model::Anchor,
    part::PartSource,
};

const CANVAS: Canvas = Canvas {
    width: 1000,
    height: 700,
};

fn part(w: u32, h: u32, anchor: Anchor) -> RigPart {
    RigPart {
        id: PartId::Body,
        anchor,
        image: image::RgbaImage::from_pixel(w, h, image::Rgba([0, 0, 255, 255])),
        source: PartSource::Placeholder,
    }
}

fn pose(points: &[(Landmark, f64, f64)]) -> Vec<Keypoint> {
    let mut kps = vec![Keypoint::new(0.5, 0.5); LANDMARK_COUNT];
    for (lm, x, y) in points {
        kps[lm.index()] = Keypoint::new(*x, *y);
    }
    kps
}

fn shoulders() -> PartBinding {
    PartBinding::oriented(Landmark::LeftShoulder, Landmark::RightShoulder)
}

#[test]
fn denormalize_stays_within_surface() {
    for v in [0.0f64, 0.25, 0.5, 0.999, 1.0] {
        let (x, y) = denormalize(&Keypoint::new(v, v), CANVAS);
        assert!((0..=1000).contains(&x));
        assert!((0..=700).contains(&y));
    }
    assert_eq!(denormalize(&Keypoint::new(1.0, 1.0), CANVAS), (1000, 700));
    assert_eq!(denormalize(&Keypoint::new(0.5, 0.465), CANVAS), (500, 325));
}

#[test]
fn normalized_pixels_match_double_precision_reference() {
    let normalizer = crate::solve::normalize::Normalizer::default();
    for i in 0..=1000 {
        let v = f64::from(i) / 1000.0;
        let got = denormalize(&normalizer.apply(Keypoint::new(v, v)), CANVAS);
        let want = (
            ((v * 0.7 + 0.15) * 1000.0) as i32,
            ((v * 0.7 + 0.15) * 700.0) as i32,
        );
        assert_eq!(got, want, "raw coordinate {v}");
    }
    assert_eq!(
        denormalize(&normalizer.apply(Keypoint::new(0.09, 0.09)), CANVAS),
        (213, 149)
    );
}

#[test]
fn rotation_cardinal_directions() {
    assert_eq!(rotation_degrees((10, 10), (50, 10)), 0.0);
    assert_eq!(rotation_degrees((10, 10), (-30, 10)), 180.0);
    assert_eq!(rotation_degrees((10, 10), (10, -20)), 90.0);
    assert_eq!(rotation_degrees((10, 10), (10, 40)), -90.0);
}

#[test]
fn rotation_of_zero_length_vector_is_zero() {
    assert_eq!(rotation_degrees((7, 7), (7, 7)), 0.0);
}

#[test]
fn rotation_is_translation_invariant() {
    let a = rotation_degrees((10, 20), (40, 5));
    let b = rotation_degrees((110, 220), (140, 205));
    assert_eq!(a, b);
}

#[test]
fn horizontal_shoulders_center_unrotated_box_on_start() {
    let kps = pose(&[
        (Landmark::LeftShoulder, 0.43, 0.465),
        (Landmark::RightShoulder, 0.57, 0.465),
    ]);
    let p = solve_part(
        &part(40, 20, Anchor::CENTER),
        &shoulders(),
        &kps,
        CANVAS,
        &SolveOptions::default(),
    )
    .unwrap();

    assert_eq!(p.angle_deg, 0.0);
    assert_eq!(p.image.dimensions(), (40, 20));
    assert_eq!(p.top_left, (430 - 20, 325 - 10));
}

#[test]
fn end_beyond_sequence_is_treated_as_unoriented() {
    // Only 12 keypoints: LeftShoulder (11) exists, RightShoulder (12) does not.
    let mut kps = vec![Keypoint::new(0.5, 0.5); 12];
    kps[Landmark::LeftShoulder.index()] = Keypoint::new(0.2, 0.2);
    let p = solve_part(
        &part(10, 10, Anchor::CENTER),
        &shoulders(),
        &kps,
        CANVAS,
        &SolveOptions::default(),
    )
    .unwrap();
    assert_eq!(p.angle_deg, 0.0);
    assert_eq!(p.top_left, (200 - 5, 140 - 5));
}

#[test]
fn start_beyond_sequence_yields_no_placement() {
    let kps = vec![Keypoint::new(0.5, 0.5); 5];
    let out = solve_part(
        &part(10, 10, Anchor::CENTER),
        &shoulders(),
        &kps,
        CANVAS,
        &SolveOptions::default(),
    );
    assert!(out.is_none());
}

#[test]
fn unbound_end_draws_unrotated() {
    let kps = pose(&[(Landmark::Nose, 0.5, 0.36)]);
    let p = solve_part(
        &part(30, 30, Anchor::CENTER),
        &PartBinding::fixed(Landmark::Nose),
        &kps,
        CANVAS,
        &SolveOptions::default(),
    )
    .unwrap();
    assert_eq!(p.angle_deg, 0.0);
    assert_eq!(p.top_left, (500 - 15, 252 - 15));
}

#[test]
fn vertical_limb_rotates_and_recenters_box() {
    let kps = pose(&[
        (Landmark::LeftElbow, 0.5, 0.5),
        (Landmark::LeftWrist, 0.5, 0.2),
    ]);
    let binding = PartBinding::oriented(Landmark::LeftElbow, Landmark::LeftWrist);
    let p = solve_part(
        &part(40, 10, Anchor::CENTER),
        &binding,
        &kps,
        CANVAS,
        &SolveOptions::default(),
    )
    .unwrap();

    assert_eq!(p.angle_deg, 90.0);
    assert_eq!(p.image.dimensions(), (10, 40));
    assert_eq!(p.top_left, (500 - 5, 350 - 20));
}

#[test]
fn scale_factor_resizes_before_rotation() {
    let kps = pose(&[(Landmark::Nose, 0.5, 0.5)]);
    let opts = SolveOptions {
        scale: 0.5,
        ..SolveOptions::default()
    };
    let p = solve_part(
        &part(40, 20, Anchor::CENTER),
        &PartBinding::fixed(Landmark::Nose),
        &kps,
        CANVAS,
        &opts,
    )
    .unwrap();
    assert_eq!(p.image.dimensions(), (20, 10));
    assert_eq!(p.top_left, (500 - 10, 350 - 5));
}

#[test]
fn solver_is_idempotent() {
    let kps = pose(&[
        (Landmark::LeftShoulder, 0.31, 0.42),
        (Landmark::RightShoulder, 0.66, 0.58),
    ]);
    let part = part(33, 17, Anchor::new(0.2, 0.7));
    let opts = SolveOptions::default();
    let a = solve_part(&part, &shoulders(), &kps, CANVAS, &opts).unwrap();
    let b = solve_part(&part, &shoulders(), &kps, CANVAS, &opts).unwrap();
    assert_eq!(a, b);
}

#[test]
fn low_visibility_start_is_skipped_when_gated() {
    let mut kps = pose(&[]);
    kps[Landmark::Nose.index()] = Keypoint::with_visibility(0.5, 0.5, 0.2);
    let binding = PartBinding::fixed(Landmark::Nose);
    let part = part(10, 10, Anchor::CENTER);

    assert!(solve_part(&part, &binding, &kps, CANVAS, &SolveOptions::default()).is_some());

    let gated = SolveOptions {
        min_visibility: 0.3,
        ..SolveOptions::default()
    };
    assert!(solve_part(&part, &binding, &kps, CANVAS, &gated).is_none());
}

#[test]
fn pivot_mode_puts_anchor_on_start_keypoint() {
    let kps = pose(&[(Landmark::Nose, 0.5, 0.5)]);
    let opts = SolveOptions {
        anchor_mode: AnchorMode::Pivot,
        ..SolveOptions::default()
    };
    let p = solve_part(
        &part(10, 4, Anchor::new(0.0, 0.5)),
        &PartBinding::fixed(Landmark::Nose),
        &kps,
        CANVAS,
        &opts,
    )
    .unwrap();
    assert_eq!(p.top_left, (500, 350 - 2));
}

#[test]
fn pivot_mode_follows_rotation() {
    let kps = pose(&[
        (Landmark::LeftElbow, 0.5, 0.5),
        (Landmark::LeftWrist, 0.5, 0.2),
    ]);
    let binding = PartBinding::oriented(Landmark::LeftElbow, Landmark::LeftWrist);
    let opts = SolveOptions {
        anchor_mode: AnchorMode::Pivot,
        ..SolveOptions::default()
    };
    // Rotated a quarter turn clockwise, the left-middle anchor ends up top-middle.
    let p = solve_part(&part(10, 4, Anchor::new(0.0, 0.5)), &binding, &kps, CANVAS, &opts)
        .unwrap();
    assert_eq!(p.image.dimensions(), (4, 10));
    assert_eq!(p.top_left, (500 - 2, 350));
}

#[test]
fn options_validation() {
    SolveOptions::default().validate().unwrap();
    for bad in [
        SolveOptions {
            scale: 0.0,
            ..SolveOptions::default()
        },
        SolveOptions {
            scale: f32::INFINITY,
            ..SolveOptions::default()
        },
        SolveOptions {
            scale: 1e9,
            ..SolveOptions::default()
        },
        SolveOptions {
            scale: MAX_PART_SCALE * 1.5,
            ..SolveOptions::default()
        },
        SolveOptions {
            min_visibility: 1.5,
            ..SolveOptions::default()
        },
    ] {
        assert!(bad.validate().is_err());
    }
}

#[test]
fn largest_accepted_scale_passes_validation() {
    let opts = SolveOptions {
        scale: MAX_PART_SCALE,
        ..SolveOptions::default()
    };
    opts.validate().unwrap();
}

#[test]
fn placement_set_keys_by_part() {
    let kps = pose(&[]);
    let a = solve_part(
        &part(2, 2, Anchor::CENTER),
        &PartBinding::fixed(Landmark::Nose),
        &kps,
        CANVAS,
        &SolveOptions::default(),
    )
    .unwrap();
    let set: PlacementSet = [a.clone(), a].into_iter().collect();
    assert_eq!(set.len(), 1);
    assert!(set.get(PartId::Body).is_some());
    assert!(set.get(PartId::Head).is_none());
}
