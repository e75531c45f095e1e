//! Setup-time validation and ordering of pass sets.

use prism::prelude::*;
use prism::PrismError;

fn depth_pass() -> PassDesc {
    PassDesc::new("depth", TargetKind::OffscreenDepth)
        .with_layers(LayerMask::DEPTH_PREPASS)
        .writes(keys::DEPTH)
}

fn shadow_pass() -> PassDesc {
    PassDesc::new("shadow", TargetKind::OffscreenShadow)
        .with_camera(PassCamera::Light)
        .with_layers(LayerMask::SHADOW_CASTERS)
        .writes(keys::SHADOW_MAP)
        .writes(keys::LIGHT_VIEW_PROJECTION)
}

fn main_pass() -> PassDesc {
    PassDesc::new("main", TargetKind::Screen)
        .reads(keys::DEPTH)
        .reads(keys::SHADOW_MAP)
        .reads(keys::LIGHT_VIEW_PROJECTION)
}

fn names(plan: &FramePlan) -> Vec<&str> {
    plan.passes().iter().map(PassDesc::name).collect()
}

#[test]
fn producers_run_before_consumers() {
    // Declared consumer-first on purpose.
    let plan = FramePlan::new(vec![main_pass(), shadow_pass(), depth_pass()])
        .expect("valid pass set");
    assert_eq!(names(&plan), ["shadow", "depth", "main"]);
}

#[test]
fn already_ordered_sets_are_untouched() {
    let plan = FramePlan::new(vec![depth_pass(), shadow_pass(), main_pass()])
        .expect("valid pass set");
    assert_eq!(names(&plan), ["depth", "shadow", "main"]);
}

#[test]
fn independent_passes_keep_declaration_order() {
    let plan = FramePlan::new(vec![
        PassDesc::new("a", TargetKind::Screen),
        PassDesc::new("b", TargetKind::Screen),
        PassDesc::new("c", TargetKind::Screen),
    ])
    .expect("valid pass set");
    assert_eq!(names(&plan), ["a", "b", "c"]);
}

#[test]
fn ordering_is_deterministic() {
    let build = || {
        FramePlan::new(vec![main_pass(), depth_pass(), shadow_pass()]).expect("valid pass set")
    };
    assert_eq!(names(&build()), names(&build()));
}

#[test]
fn cycle_fails_at_setup() {
    let result = FramePlan::new(vec![
        PassDesc::new("a", TargetKind::Screen).reads("y").writes("x"),
        PassDesc::new("b", TargetKind::Screen).reads("x").writes("y"),
    ]);
    match result {
        Err(PrismError::CyclicDependency { passes }) => {
            assert_eq!(passes, ["a", "b"]);
        }
        other => panic!("expected CyclicDependency, got {other:?}"),
    }
}

#[test]
fn self_dependency_is_a_cycle() {
    let result = FramePlan::new(vec![
        PassDesc::new("feedback", TargetKind::Screen)
            .reads("color")
            .writes("color"),
    ]);
    match result {
        Err(PrismError::CyclicDependency { passes }) => {
            assert_eq!(passes, ["feedback"]);
        }
        other => panic!("expected CyclicDependency, got {other:?}"),
    }
}

#[test]
fn input_without_producer_fails_at_setup() {
    let result = FramePlan::new(vec![
        PassDesc::new("main", TargetKind::Screen).reads("ambient_occlusion"),
    ]);
    match result {
        Err(PrismError::MissingProducer { pass, key }) => {
            assert_eq!(pass, "main");
            assert_eq!(key, "ambient_occlusion");
        }
        other => panic!("expected MissingProducer, got {other:?}"),
    }
}

#[test]
fn two_producers_of_one_key_fail_at_setup() {
    let result = FramePlan::new(vec![
        PassDesc::new("depth_a", TargetKind::OffscreenDepth).writes(keys::DEPTH),
        PassDesc::new("depth_b", TargetKind::OffscreenDepth).writes(keys::DEPTH),
    ]);
    match result {
        Err(PrismError::DuplicateProducer { key, first, second }) => {
            assert_eq!(key, keys::DEPTH);
            assert_eq!(first, "depth_a");
            assert_eq!(second, "depth_b");
        }
        other => panic!("expected DuplicateProducer, got {other:?}"),
    }
}

#[test]
fn empty_pass_set_is_valid() {
    let plan = FramePlan::new(Vec::new()).expect("empty set is valid");
    assert!(plan.is_empty());
}

#[test]
fn diamond_dependencies_order_correctly() {
    // d consumes both branches; the branches consume the shared root.
    let plan = FramePlan::new(vec![
        PassDesc::new("d", TargetKind::Screen).reads("left").reads("right"),
        PassDesc::new("right", TargetKind::Screen).reads("root").writes("right"),
        PassDesc::new("left", TargetKind::Screen).reads("root").writes("left"),
        PassDesc::new("root", TargetKind::OffscreenDepth).writes("root"),
    ])
    .expect("valid pass set");

    let order = names(&plan);
    let pos = |n: &str| order.iter().position(|p| *p == n).unwrap();
    assert!(pos("root") < pos("left"));
    assert!(pos("root") < pos("right"));
    assert!(pos("left") < pos("d"));
    assert!(pos("right") < pos("d"));
    // Independent siblings keep declaration order.
    assert!(pos("right") < pos("left"));
}
