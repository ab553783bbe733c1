// Integration tests for pair enumeration and connection styling.

mod common;

use common::{fx, rng, Op, RecordingSurface};
use drift_core::connections::{draw_connection_default, for_each_link, max_link_distance};
use drift_core::effects::{
    CorruptionEffect, CorruptionNodeState, Effect, EffectState, Link, NodeShape,
};
use drift_core::{Rgb, SignalNode, Viewport};
use glam::Vec2;

fn node_at(x: f32, y: f32, z: f32) -> SignalNode {
    let mut r = rng(11);
    let mut n = SignalNode::spawn(&Viewport::new(400.0, 400.0), &mut r);
    n.pos = Vec2::new(x, y);
    n.screen = n.pos;
    n.draw = n.pos;
    n.z = z;
    n
}

fn links(nodes: &[SignalNode], t: f32) -> Vec<(f32, f32)> {
    let mut out = Vec::new();
    for_each_link(nodes, t, |l| out.push((l.distance, l.opacity)));
    out
}

fn with_depth(mut n: SignalNode, depth: f32) -> SignalNode {
    n.effect_state = Some(EffectState::Corruption(CorruptionNodeState {
        photo_color: Rgb::new(255, 87, 51),
        noise: 0.0,
        depth,
        rotation: 0.0,
        shape: NodeShape::Rect,
        block: Vec2::splat(2.0),
    }));
    n
}

#[test]
fn reach_grows_with_transition() {
    assert_eq!(max_link_distance(0.0), 90.0);
    assert_eq!(max_link_distance(1.0), 240.0);

    let nodes = [node_at(0.0, 0.0, 0.8), node_at(100.0, 0.0, 0.8)];
    assert!(links(&nodes, 0.0).is_empty());
    assert_eq!(links(&nodes, 1.0).len(), 1);
}

#[test]
fn opacity_falls_off_linearly() {
    let nodes = [node_at(0.0, 0.0, 0.8), node_at(45.0, 0.0, 0.8)];
    let l = links(&nodes, 0.0);
    assert_eq!(l.len(), 1);
    let (d, o) = l[0];
    assert_eq!(d, 45.0);
    assert!((o - 0.5 * 0.18).abs() < 1e-6);
}

#[test]
fn default_depth_gate() {
    let far_apart = [node_at(0.0, 0.0, 0.2), node_at(10.0, 0.0, 1.2)];
    assert!(links(&far_apart, 1.0).is_empty());
    let close = [node_at(0.0, 0.0, 0.25), node_at(10.0, 0.0, 1.2)];
    assert_eq!(links(&close, 1.0).len(), 1);
}

#[test]
fn every_unordered_pair_once() {
    let nodes: Vec<_> = (0..6).map(|i| node_at(i as f32 * 5.0, 0.0, 0.8)).collect();
    assert_eq!(links(&nodes, 0.0).len(), 15);
}

#[test]
fn non_finite_pairs_are_skipped() {
    let mut bad = node_at(0.0, 0.0, 0.8);
    bad.draw = Vec2::new(f32::NAN, 0.0);
    let nodes = [bad, node_at(10.0, 0.0, 0.8), node_at(20.0, 0.0, 0.8)];
    assert_eq!(links(&nodes, 0.0).len(), 1);
}

#[test]
fn default_styles() {
    let mut r = rng(12);
    let a = node_at(0.0, 0.0, 0.8);
    let mut b = node_at(30.0, 0.0, 0.8);
    let mut s = RecordingSurface::default();

    for_each_link(&[a.clone(), b.clone()], 0.0, |l| {
        draw_connection_default(&mut s, &l, 0.0, &mut r)
    });
    assert_eq!(s.count(|op| matches!(op, Op::LineTo(..))), 1);

    s.take();
    b.freaking_out = true;
    for_each_link(&[a, b], 0.0, |l| {
        draw_connection_default(&mut s, &l, 0.0, &mut r)
    });
    // jagged: two segments through a jittered midpoint
    assert_eq!(s.count(|op| matches!(op, Op::LineTo(..))), 2);
    assert!(s.ops.contains(&Op::LineWidth(2.0)));
}

#[test]
fn corruption_gate_suppresses_distant_depths() {
    let mut r = rng(13);
    let mut ctx = fx(1.0, &mut r);
    let mut effect = CorruptionEffect::default();
    let mut s = RecordingSurface::default();

    let a = with_depth(node_at(0.0, 0.0, 0.8), 0.3);
    let b = with_depth(node_at(20.0, 0.0, 0.8), 0.7);
    let link = Link {
        a: &a,
        b: &b,
        distance: 20.0,
        max_dist: 240.0,
        opacity: 0.3,
        freaking: false,
    };
    assert!(effect.draw_connection(&mut s, &link, &mut ctx));
    assert!(s.ops.is_empty(), "suppressed links draw nothing");

    let c = with_depth(node_at(20.0, 0.0, 0.8), 0.6);
    let link = Link { b: &c, ..link };
    assert!(effect.draw_connection(&mut s, &link, &mut ctx));
    assert_eq!(s.strokes(), 1);
    // dashed wire, reset to solid afterwards
    assert!(s.ops.iter().any(|op| matches!(op, Op::LineDash(d) if d.len() == 2)));
    assert_eq!(
        s.ops.iter().rev().find(|op| matches!(op, Op::LineDash(_))),
        Some(&Op::LineDash(Vec::new()))
    );
}

#[test]
fn corruption_freaking_link_is_a_stepped_bus() {
    let mut r = rng(14);
    let mut ctx = fx(1.0, &mut r);
    let mut effect = CorruptionEffect::default();
    let mut s = RecordingSurface::default();

    let a = with_depth(node_at(0.0, 0.0, 0.8), 0.5);
    let b = with_depth(node_at(60.0, 60.0, 0.8), 0.5);
    let link = Link {
        a: &a,
        b: &b,
        distance: 84.0,
        max_dist: 240.0,
        opacity: 0.3,
        freaking: true,
    };
    assert!(effect.draw_connection(&mut s, &link, &mut ctx));
    // zero noise: three segments
    assert_eq!(s.count(|op| matches!(op, Op::LineTo(..))), 3);
}
