// Tests for session event handling: charging, placing, resetting and resizing.

use glam::Vec2;
use lens_core::*;

fn session() -> Session {
    Session::new(
        RaySetConfig::default(),
        ChargeConfig::default(),
        DrawableSize::new(800, 600),
    )
}

fn straight_rays() -> Vec<RayPath> {
    compute_rays(&RaySetConfig::default(), &Lens::default())
}

#[test]
fn two_second_hold_gives_expected_radius() {
    let cfg = ChargeConfig::new(0.03, 0.25, 0.09).unwrap();
    assert!((cfg.radius_for_hold(2.0) - 0.21).abs() < 1e-6);
}

#[test]
fn hold_radius_is_clamped() {
    let cfg = ChargeConfig::default();
    assert_eq!(cfg.radius_for_hold(0.0), RS_MIN);
    assert_eq!(cfg.radius_for_hold(-3.0), RS_MIN);
    assert_eq!(cfg.radius_for_hold(100.0), RS_MAX);
}

#[test]
fn charge_config_rejects_bad_input() {
    assert!(matches!(
        ChargeConfig::new(0.0, 0.25, 0.09),
        Err(ConfigError::BadRadiusRange { .. })
    ));
    assert!(matches!(
        ChargeConfig::new(0.3, 0.25, 0.09),
        Err(ConfigError::BadRadiusRange { .. })
    ));
    assert_eq!(
        ChargeConfig::new(0.03, 0.25, -1.0),
        Err(ConfigError::NegativeGrowth(-1.0))
    );
    assert!(matches!(
        ChargeConfig::new(0.03, f32::INFINITY, 0.09),
        Err(ConfigError::NonFinite { field: "rs_max" })
    ));
}

#[test]
fn starts_inactive_with_straight_rays() {
    let s = session();
    assert!(!s.lens.active);
    assert!(!s.is_charging());
    assert_eq!(s.revision(), 0);
    assert_eq!(s.rays(), straight_rays().as_slice());
    assert!(s.lens_circle().is_none());
    assert!(s.preview_circle(0.0).is_none());
}

#[test]
fn press_then_release_places_lens_and_recomputes() {
    let s = session()
        .handle(InputEvent::PointerPressed {
            x: 400.0,
            y: 300.0,
            time: 10.0,
        })
        .handle(InputEvent::PointerReleased { time: 12.0 });

    assert!(s.lens.active);
    assert_eq!(s.lens.position, Vec2::ZERO);
    assert!((s.lens.schwarzschild_radius - 0.21).abs() < 1e-5);
    assert!(!s.is_charging());
    assert_eq!(s.revision(), 1);
    assert_eq!(s.rays().len(), RAY_COUNT);
    assert_ne!(s.rays(), straight_rays().as_slice());
    assert_eq!(
        s.lens_circle(),
        Some(Circle {
            center: Vec2::ZERO,
            radius: s.lens.schwarzschild_radius
        })
    );
}

#[test]
fn preview_grows_while_charging() {
    let s = session().handle(InputEvent::PointerPressed {
        x: 0.0,
        y: 0.0,
        time: 1.0,
    });
    assert!(s.is_charging());
    // Pressing alone does not touch the rays.
    assert_eq!(s.revision(), 0);

    let early = s.preview_circle(1.0).unwrap();
    let later = s.preview_circle(2.0).unwrap();
    let much_later = s.preview_circle(60.0).unwrap();
    assert_eq!(early.center, Vec2::new(-1.0, 1.0));
    assert_eq!(early.radius, RS_MIN);
    assert!((later.radius - (RS_MIN + RS_PER_SECOND)).abs() < 1e-6);
    assert_eq!(much_later.radius, RS_MAX);
}

#[test]
fn release_without_press_is_ignored() {
    let s = session().handle(InputEvent::PointerReleased { time: 5.0 });
    assert!(!s.lens.active);
    assert_eq!(s.revision(), 0);
}

#[test]
fn new_lens_replaces_old_one() {
    let s = session()
        .handle(InputEvent::PointerPressed {
            x: 200.0,
            y: 300.0,
            time: 0.0,
        })
        .handle(InputEvent::PointerReleased { time: 0.5 })
        .handle(InputEvent::PointerPressed {
            x: 600.0,
            y: 150.0,
            time: 1.0,
        })
        .handle(InputEvent::PointerReleased { time: 1.0 });

    assert_eq!(s.lens.position, Vec2::new(0.5, 0.5));
    assert_eq!(s.lens.schwarzschild_radius, RS_MIN);
    assert_eq!(s.revision(), 2);
    assert_eq!(
        s.rays(),
        compute_rays(&RaySetConfig::default(), &s.lens).as_slice()
    );
}

#[test]
fn reset_clears_lens_and_restores_straight_rays() {
    let s = session()
        .handle(InputEvent::PointerPressed {
            x: 400.0,
            y: 300.0,
            time: 0.0,
        })
        .handle(InputEvent::PointerReleased { time: 1.0 })
        .handle(InputEvent::Reset);

    assert!(!s.lens.active);
    assert_eq!(s.revision(), 2);
    assert_eq!(s.rays(), straight_rays().as_slice());
    assert!(s.lens_circle().is_none());
}

#[test]
fn reset_cancels_pending_charge() {
    let s = session()
        .handle(InputEvent::PointerPressed {
            x: 400.0,
            y: 300.0,
            time: 0.0,
        })
        .handle(InputEvent::Reset)
        .handle(InputEvent::PointerReleased { time: 1.0 });

    assert!(!s.lens.active);
    assert!(s.preview_circle(1.0).is_none());
    assert_eq!(s.revision(), 1);
}

#[test]
fn resize_updates_normalizer_without_recompute() {
    let s = session().handle(InputEvent::Resized {
        width: 1600,
        height: 1200,
    });
    assert_eq!(s.drawable, DrawableSize::new(1600, 1200));
    assert_eq!(s.revision(), 0);

    let s = s.handle(InputEvent::PointerPressed {
        x: 1600.0,
        y: 0.0,
        time: 0.0,
    });
    assert_eq!(s.charge.anchor, Vec2::new(1.0, 1.0));
}

#[test]
fn zero_area_resize_is_ignored() {
    let s = session().handle(InputEvent::Resized {
        width: 0,
        height: 0,
    });
    assert_eq!(s.drawable, DrawableSize::new(800, 600));
}

#[test]
fn circle_outline_is_closed() {
    let c = Circle {
        center: Vec2::new(0.5, -0.5),
        radius: 0.1,
    };
    let pts = c.default_outline();
    assert_eq!(pts.len(), CIRCLE_SEGMENTS + 1);
    assert_eq!(pts.first(), pts.last());
    for p in &pts {
        assert!(((*p - c.center).length() - 0.1).abs() < 1e-5);
    }
}

#[test]
fn charging_flag_follows_press_release_and_reset() {
    let s = session();
    assert!(!s.charge.charging);

    let s = s.handle(InputEvent::PointerPressed {
        x: 100.0,
        y: 100.0,
        time: 3.0,
    });
    assert!(s.charge.charging);
    assert_eq!(s.charge.start_time, 3.0);

    let s = s.handle(InputEvent::PointerReleased { time: 4.0 });
    assert!(!s.charge.charging);
    assert!(s.preview_circle(4.0).is_none());

    // A second release after the charge ended must not move or resize the lens.
    let placed = s.lens;
    let s = s.handle(InputEvent::PointerReleased { time: 9.0 });
    assert_eq!(s.lens, placed);
    assert_eq!(s.revision(), 1);

    let s = s
        .handle(InputEvent::PointerPressed {
            x: 100.0,
            y: 100.0,
            time: 10.0,
        })
        .handle(InputEvent::Reset);
    assert!(!s.charge.charging);
    assert!(!s.is_charging());
}

#[test]
fn apply_in_place_matches_handle_by_value() {
    let events = [
        InputEvent::Resized {
            width: 1024,
            height: 768,
        },
        InputEvent::PointerPressed {
            x: 512.0,
            y: 200.0,
            time: 0.25,
        },
        InputEvent::PointerReleased { time: 1.75 },
        InputEvent::Reset,
        InputEvent::PointerPressed {
            x: 300.0,
            y: 600.0,
            time: 2.0,
        },
        InputEvent::PointerReleased { time: 2.5 },
    ];

    let by_value = events.iter().fold(session(), |s, ev| s.handle(*ev));
    let mut in_place = session();
    for ev in events {
        in_place.apply(ev);
    }

    assert_eq!(in_place.lens, by_value.lens);
    assert_eq!(in_place.charge, by_value.charge);
    assert_eq!(in_place.drawable, by_value.drawable);
    assert_eq!(in_place.revision(), by_value.revision());
    assert_eq!(in_place.revision(), 3);
    assert_eq!(in_place.rays(), by_value.rays());
}
