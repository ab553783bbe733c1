// Integration tests for the background engine: population, activation and
// the transition blend.

mod common;

use common::{Op, RecordingSurface};
use drift_core::effects::EffectKind;
use drift_core::connections::for_each_link;
use drift_core::{ActivationChange, AppGate, Background, BackgroundConfig, Corner, Viewport};
use glam::Vec2;
use rand::{Rng, SeedableRng};

const NOW: f64 = 1_700_000_000_000.0;

fn make_engine(w: f32, h: f32) -> Background {
    Background::new(BackgroundConfig::with_seed(42), Viewport::new(w, h)).unwrap()
}

fn idle() -> AppGate {
    AppGate::default()
}

fn run(bg: &mut Background, surface: &mut RecordingSurface, frames: usize) {
    for i in 0..frames {
        surface.take();
        bg.frame(surface, NOW + i as f64 * 16.0);
    }
}

const TOP_LEFT: Vec2 = Vec2::new(10.0, 10.0);
const TOP_RIGHT: Vec2 = Vec2::new(790.0, 10.0);
const BOTTOM_RIGHT: Vec2 = Vec2::new(790.0, 590.0);

#[test]
fn invalid_config_is_rejected() {
    let cfg = BackgroundConfig {
        mouse_radius: -1.0,
        ..BackgroundConfig::default()
    };
    assert!(Background::new(cfg, Viewport::new(100.0, 100.0)).is_err());
}

#[test]
fn population_follows_area_and_resize_rebuilds_it() {
    let mut bg = make_engine(1000.0, 1000.0);
    assert_eq!(bg.particles().len(), 166);

    bg.resize(Viewport::new(500.0, 500.0));
    assert_eq!(bg.baseline_count(), 41);
    assert_eq!(bg.particles().len(), 41);
    // every node is fresh and placed inside the new bounds
    for n in bg.particles() {
        assert!(n.history.is_empty());
        assert!(n.pos.x <= 500.0 && n.pos.y <= 500.0);
    }
}

#[test]
fn frame_clears_first_and_draws_nodes_last() {
    let mut bg = make_engine(400.0, 300.0);
    let mut s = RecordingSurface::default();
    bg.frame(&mut s, NOW);
    assert_eq!(s.ops.first(), Some(&Op::Clear(400.0, 300.0)));
    assert!(matches!(s.ops.last(), Some(Op::FillRect(..))));
    assert_eq!(
        s.count(|op| matches!(op, Op::FillRect(..))),
        bg.particles().len()
    );
}

#[test]
fn effect_overlay_precedes_links_which_precede_nodes() {
    let mut bg = make_engine(800.0, 600.0);
    let mut s = RecordingSurface::default();
    bg.pointer_moved(TOP_RIGHT, idle());
    bg.pointer_moved(Vec2::new(400.0, 300.0), idle());
    let mut frames = 0;
    while bg.transition() < 0.35 {
        run(&mut bg, &mut s, 1);
        frames += 1;
        assert!(frames < 100);
    }

    s.take();
    bg.frame(&mut s, NOW);
    assert_eq!(s.ops.first(), Some(&Op::Clear(800.0, 600.0)));

    let first_dash = s
        .ops
        .iter()
        .position(|op| matches!(op, Op::LineDash(d) if !d.is_empty()))
        .expect("dashed links drawn");
    let last_dash = s
        .ops
        .iter()
        .rposition(|op| matches!(op, Op::LineDash(d) if d.is_empty()))
        .unwrap();
    // ring and pixel blocks come from the per-frame hook
    let first_arc = s.ops.iter().position(|op| matches!(op, Op::Arc { .. })).unwrap();
    let first_rotate = s.ops.iter().position(|op| matches!(op, Op::Rotate(_))).unwrap();
    assert!(first_arc < first_dash);
    assert!(first_rotate < first_dash);
    assert!(!s.ops[first_dash..].iter().any(|op| matches!(op, Op::Arc { .. })));

    // every node is drawn (rotated into place) after the last link
    let node_rotations = s.ops[last_dash..]
        .iter()
        .filter(|op| matches!(op, Op::Rotate(_)))
        .count();
    assert_eq!(node_rotations, bg.particles().len());
}

#[test]
fn surplus_is_trimmed_before_links_are_drawn() {
    let mut bg = make_engine(400.0, 300.0);
    let twin = bg.particles()[0].clone();
    bg.particles_mut().push(twin);
    let before = bg.particles().to_vec();
    let n = before.len();

    let mut s = RecordingSurface::default();
    bg.frame(&mut s, NOW);
    assert_eq!(bg.particles().len(), n - 1);

    let count = |nodes: &[drift_core::SignalNode]| {
        let mut c = 0;
        for_each_link(nodes, bg.transition(), |_| c += 1);
        c
    };
    // the twin overlaps node 0, so it would have added a link
    assert!(count(&before) > count(&before[..n - 1]));
    // fresh nodes have no trail yet: every stroke is a link
    assert_eq!(s.strokes(), count(&before[..n - 1]));
}

#[test]
fn corners_can_be_reassigned() {
    let mut bg = make_engine(800.0, 600.0);
    assert!(bg.corners_mut().set(Corner::BottomLeft, Some(EffectKind::Chromatic)));
    assert!(!bg.corners_mut().set(Corner::TopLeft, Some(EffectKind::Chromatic)));
    assert_eq!(
        bg.pointer_moved(Vec2::new(10.0, 590.0), idle()),
        Some(ActivationChange::Activated(EffectKind::Chromatic))
    );
    // the exit corner still exits
    assert_eq!(
        bg.pointer_moved(TOP_LEFT, idle()),
        Some(ActivationChange::Deactivated(EffectKind::Chromatic))
    );
}

#[test]
fn corners_activate_and_exit() {
    let mut bg = make_engine(800.0, 600.0);
    assert_eq!(
        bg.pointer_moved(TOP_RIGHT, idle()),
        Some(ActivationChange::Activated(EffectKind::Corruption))
    );
    assert_eq!(bg.active_effect(), Some(EffectKind::Corruption));
    // staying in the corner changes nothing
    assert_eq!(bg.pointer_moved(TOP_RIGHT, idle()), None);

    assert_eq!(
        bg.pointer_moved(TOP_LEFT, idle()),
        Some(ActivationChange::Deactivated(EffectKind::Corruption))
    );
    assert_eq!(bg.active_effect(), None);
    assert_eq!(bg.pointer_moved(TOP_LEFT, idle()), None);
}

#[test]
fn activation_corners_are_locked_while_active() {
    let mut bg = make_engine(800.0, 600.0);
    bg.pointer_moved(TOP_RIGHT, idle());
    assert_eq!(bg.pointer_moved(BOTTOM_RIGHT, idle()), None);
    assert_eq!(bg.active_effect(), Some(EffectKind::Corruption));
}

#[test]
fn escape_is_idempotent() {
    let mut bg = make_engine(800.0, 600.0);
    assert_eq!(bg.escape(), None);
    bg.pointer_moved(BOTTOM_RIGHT, idle());
    assert_eq!(
        bg.escape(),
        Some(ActivationChange::Deactivated(EffectKind::Chromatic))
    );
    assert_eq!(bg.escape(), None);
    assert_eq!(bg.active_effect(), None);
}

#[test]
fn engaged_app_suppresses_effects_and_pointer() {
    let mut bg = make_engine(800.0, 600.0);
    bg.pointer_moved(BOTTOM_RIGHT, idle());
    assert!(bg.pointer().is_some());

    let engaged = AppGate {
        has_started: true,
        is_demo_loaded: false,
    };
    assert_eq!(
        bg.pointer_moved(Vec2::new(400.0, 300.0), engaged),
        Some(ActivationChange::Deactivated(EffectKind::Chromatic))
    );
    assert!(bg.pointer().is_none());

    // corners do nothing while engaged
    let demo = AppGate {
        has_started: false,
        is_demo_loaded: true,
    };
    assert_eq!(bg.pointer_moved(TOP_RIGHT, demo), None);
    assert_eq!(bg.active_effect(), None);
}

#[test]
fn pointer_leaving_disables_interaction() {
    let mut bg = make_engine(800.0, 600.0);
    bg.pointer_moved(Vec2::new(400.0, 300.0), idle());
    assert_eq!(bg.pointer(), Some(Vec2::new(400.0, 300.0)));
    bg.pointer_left();
    assert_eq!(bg.pointer(), None);
}

#[test]
fn at_most_one_effect_under_random_pointer_traffic() {
    let mut bg = make_engine(800.0, 600.0);
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    let spots = [TOP_LEFT, TOP_RIGHT, BOTTOM_RIGHT, Vec2::new(10.0, 590.0), Vec2::new(400.0, 300.0)];
    for _ in 0..2000 {
        let before = bg.active_effect();
        let pos = spots[rng.gen_range(0..spots.len())];
        let change = bg.pointer_moved(pos, idle());
        let after = bg.active_effect();
        match change {
            Some(ActivationChange::Activated(k)) => {
                assert_eq!(before, None, "switched without exiting first");
                assert_eq!(after, Some(k));
            }
            Some(ActivationChange::Deactivated(k)) => {
                assert_eq!(before, Some(k));
                assert_eq!(after, None);
            }
            None => assert_eq!(before, after),
        }
        if pos == TOP_LEFT {
            assert_eq!(after, None);
        }
    }
}

#[test]
fn transition_approaches_its_target_monotonically() {
    let mut bg = make_engine(300.0, 300.0);
    let mut s = RecordingSurface::default();

    bg.activate(EffectKind::Chromatic);
    let mut prev = bg.transition();
    for _ in 0..200 {
        s.take();
        bg.frame(&mut s, NOW);
        let t = bg.transition();
        assert!((0.0..=1.0).contains(&t));
        assert!(t >= prev);
        assert!((1.0 - t) <= (1.0 - prev));
        prev = t;
    }
    assert!(prev > 0.99);

    bg.deactivate();
    for _ in 0..200 {
        s.take();
        bg.frame(&mut s, NOW);
        let t = bg.transition();
        assert!((0.0..=1.0).contains(&t));
        assert!(t <= prev);
        prev = t;
    }
    assert!(prev < 0.01);
}

#[test]
fn effect_spawns_respect_the_population_cap() {
    let cfg = BackgroundConfig {
        max_particles: 80,
        ..BackgroundConfig::with_seed(3)
    };
    let mut bg = Background::new(cfg, Viewport::new(600.0, 600.0)).unwrap();
    assert_eq!(bg.particles().len(), 60);
    let mut s = RecordingSurface::default();

    bg.activate(EffectKind::Chromatic);
    for _ in 0..600 {
        s.take();
        bg.frame(&mut s, NOW);
        assert!(bg.particles().len() <= 80);
    }
    assert_eq!(bg.particles().len(), 80);

    // once deactivated the surplus drains one node per frame
    bg.escape();
    s.take();
    bg.frame(&mut s, NOW);
    assert_eq!(bg.particles().len(), 79);
    run(&mut bg, &mut s, 40);
    assert_eq!(bg.particles().len(), 60);
}

#[test]
fn same_seed_same_field() {
    let mut a = make_engine(640.0, 480.0);
    let mut b = make_engine(640.0, 480.0);
    let mut s = RecordingSurface::default();
    run(&mut a, &mut s, 30);
    run(&mut b, &mut s, 30);
    let pa: Vec<_> = a.particles().iter().map(|n| n.draw).collect();
    let pb: Vec<_> = b.particles().iter().map(|n| n.draw).collect();
    assert_eq!(pa, pb);
}
