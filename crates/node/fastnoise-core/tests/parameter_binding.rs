use std::sync::Arc;

use fastnoise_core::{
    MemberKind, MemberValue, Node, NoiseError, Registry, Spacing, UniformGrid, ValueShape,
};
use fastnoise_test_fixtures::MockEngine;

fn setup() -> (Arc<MockEngine>, Arc<Registry>) {
    let engine = Arc::new(MockEngine::new());
    let registry = Registry::load(engine.clone());
    (engine, registry)
}

fn sample(node: &Node) -> Vec<f32> {
    let grid = UniformGrid::new([8, 8], Spacing::uniform_step([0.25, -1.5], 0.37));
    let mut out = vec![0.0; 64];
    node.gen_uniform_grid_2d(&mut out, &grid, 42)
        .expect("grid generation");
    out
}

#[test]
fn rejected_set_leaves_output_unchanged() {
    let (_, registry) = setup();
    let mut simplex = Node::new(&registry, "Simplex").expect("simplex");
    simplex.set("Feature Scale", 2.5_f32).expect("valid scale");
    let before = sample(&simplex);

    let err = simplex
        .set("Feature Scale", "Euclidean")
        .expect_err("enum name on a float member");
    assert_eq!(
        err,
        NoiseError::TypeMismatch {
            member: "Feature Scale".into(),
            expected: MemberKind::Float,
            found: ValueShape::EnumName,
        }
    );
    assert_eq!(sample(&simplex), before);
}

#[test]
fn engine_rejection_leaves_output_unchanged() {
    let (_, registry) = setup();
    let mut simplex = Node::new(&registry, "Simplex").expect("simplex");
    let before = sample(&simplex);

    // The engine enforces a positive feature scale.
    let err = simplex.set("Feature Scale", -1.0_f32).expect_err("below engine minimum");
    assert!(matches!(err, NoiseError::EngineRejected { .. }));
    assert_eq!(sample(&simplex), before);
}

#[test]
fn unknown_enum_names_are_reported_for_every_enum_member() {
    let (_, registry) = setup();
    let mut cellular = Node::new(&registry, "Cellular Distance").expect("cellular");
    for member in ["Distance Function", "Return Type"] {
        match cellular.set(member, "Definitely Not A Value") {
            Err(NoiseError::UnknownEnumValue { member: m, value }) => {
                assert_eq!(m, member);
                assert_eq!(value, "Definitely Not A Value");
            }
            other => panic!("expected UnknownEnumValue for {member}, got {other:?}"),
        }
    }
}

#[test]
fn enum_names_change_the_output() {
    let (_, registry) = setup();
    let mut cellular = Node::new(&registry, "Cellular Distance").expect("cellular");
    let euclidean = sample(&cellular);
    cellular
        .set("distance function", "MANHATTAN")
        .expect("normalized enum name");
    assert_ne!(sample(&cellular), euclidean);
}

#[test]
fn hybrid_accepts_float_then_node_last_write_wins() {
    let (_, registry) = setup();
    let mut lhs = Node::new(&registry, "Constant").expect("lhs");
    lhs.set("Value", 1.0_f32).expect("lhs value");
    let mut rhs = Node::new(&registry, "Constant").expect("rhs");
    rhs.set("Value", 10.0_f32).expect("rhs value");

    let mut add = Node::new(&registry, "Add").expect("add");
    add.set("LHS", &lhs).expect("lookup");

    add.set("RHS", 2.0_f32).expect("hybrid float");
    assert_eq!(add.gen_single_2d(0.0, 0.0, 0), 3.0);

    add.set("RHS", &rhs).expect("hybrid node");
    assert_eq!(add.gen_single_2d(0.0, 0.0, 0), 11.0);

    add.set("RHS", 0.5_f32).expect("hybrid float again");
    assert_eq!(add.gen_single_2d(0.0, 0.0, 0), 1.5);
}

#[test]
fn dimension_suffixed_members_address_their_own_hybrid() {
    let (_, registry) = setup();
    let mut source = Node::new(&registry, "Simplex").expect("source");
    source.set("Feature Scale", 1.0_f32).expect("scale");

    let mut offset = Node::new(&registry, "Domain Offset").expect("offset");
    offset.set("Source", &source).expect("source");
    offset.set("Offset y", 4.0_f32).expect("y offset");

    let shifted = offset.gen_single_2d(1.0, 1.0, 9);
    let direct = source.gen_single_2d(1.0, 5.0, 9);
    assert_eq!(shifted, direct);
}

#[test]
fn integers_only_bind_to_int_members() {
    let (engine, registry) = setup();
    let mut fbm = Node::new(&registry, "Fractal FBm").expect("fbm");
    fbm.set("Octaves", 5).expect("int member");

    for member in ["Lacunarity", "Gain", "Source"] {
        let err = fbm.set(member, MemberValue::Int(2)).expect_err("int on non-int");
        assert!(
            matches!(err, NoiseError::TypeMismatch { found: ValueShape::Int, .. }),
            "{member}: {err}"
        );
    }
    assert_eq!(engine.calls().setter_calls(), 1);
}

#[test]
fn input_nodes_may_be_dropped_after_wiring() {
    let (engine, registry) = setup();
    let mut scale = Node::new(&registry, "Domain Scale").expect("scale");
    {
        let leaf = Node::new(&registry, "Constant").expect("leaf");
        scale.set("Source", &leaf).expect("wire leaf");
    }
    assert_eq!(engine.calls().releases(), 1);
    assert_eq!(scale.gen_single_3d(1.0, 2.0, 3.0, 0), 1.0);
}
