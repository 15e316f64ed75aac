use std::sync::Arc;
use std::thread;

use fastnoise_core::{Node, Registry, Spacing, UniformGrid};
use fastnoise_test_fixtures::{MockEngine, ENCODED_PREFIX};

fn setup() -> (Arc<MockEngine>, Arc<Registry>) {
    let engine = Arc::new(MockEngine::new());
    let registry = Registry::load(engine.clone());
    (engine, registry)
}

#[test]
fn encoded_tree_round_trips_to_the_same_kind() {
    let (engine, registry) = setup();
    let simplex = Node::new(&registry, "Simplex").expect("simplex");
    let mut fbm = Node::new(&registry, "Fractal FBm").expect("fbm");
    fbm.set("Source", &simplex).expect("source");
    fbm.set("Octaves", 5).expect("octaves");
    fbm.set("Gain", 0.3_f32).expect("gain");

    let encoded = engine.encode(fbm.as_raw());
    assert!(encoded.starts_with(ENCODED_PREFIX));

    let decoded = Node::from_encoded_node_tree(&registry, &encoded).expect("decodes");
    assert_eq!(decoded.descriptor_id(), fbm.descriptor_id());
    assert_eq!(decoded.metadata().display_name, "Fractal FBm");
    assert_eq!(
        decoded.gen_single_2d(0.4, -0.2, 99),
        fbm.gen_single_2d(0.4, -0.2, 99)
    );
}

#[test]
fn decoded_root_kind_is_read_back_from_the_engine() {
    let (engine, registry) = setup();
    let leaf = Node::new(&registry, "Cellular Distance").expect("leaf");
    let encoded = engine.encode(leaf.as_raw());
    let decoded = Node::from_encoded_node_tree(&registry, &encoded).expect("decodes");
    assert_eq!(decoded.metadata().name, "cellulardistance");
}

#[test]
fn malformed_encodings_produce_no_node() {
    let (engine, registry) = setup();
    for encoded in [
        "",
        "garbage",
        ENCODED_PREFIX,
        "mock1:{\"kind\":\"Nope\",\"variables\":[],\"lookups\":[],\"hybrids\":[]}",
        "mock1:{\"kind\":\"Simplex\",\"variables\":[],\"lookups\":[],\"hybrids\":[]}",
    ] {
        assert!(
            Node::from_encoded_node_tree(&registry, encoded).is_none(),
            "{encoded:?} should not decode"
        );
    }
    assert_eq!(engine.calls().allocations(), 0);
}

#[test]
fn each_node_is_released_exactly_once() {
    let (engine, registry) = setup();
    {
        let simplex = Node::new(&registry, "Simplex").expect("simplex");
        let mut fbm = Node::new(&registry, "Fractal FBm").expect("fbm");
        fbm.set("Source", &simplex).expect("source");
        let moved = fbm;
        let _kept = vec![moved];
        assert_eq!(engine.calls().releases(), 0);
    }
    assert_eq!(engine.calls().allocations(), 2);
    assert_eq!(engine.calls().releases(), 2);
    assert_eq!(engine.calls().live_handles(), 0);
}

#[test]
fn node_reports_the_requested_simd_level() {
    let engine = Arc::new(MockEngine::new());
    let registry = Registry::load_with(engine.clone(), 3);
    let node = Node::new(&registry, "White").expect("white");
    assert_eq!(node.simd_level(), 3);

    let encoded = engine.encode(node.as_raw());
    let decoded = Node::from_encoded_node_tree(&registry, &encoded).expect("decodes");
    assert_eq!(decoded.simd_level(), 3);
}

#[test]
fn one_tree_can_feed_concurrent_generation() {
    let (_, registry) = setup();
    let simplex = Node::new(&registry, "Simplex").expect("simplex");
    let mut fbm = Node::new(&registry, "Fractal FBm").expect("fbm");
    fbm.set("Source", &simplex).expect("source");
    let fbm = Arc::new(fbm);

    let grid = UniformGrid::new([16, 16], Spacing::uniform_step([0.0; 2], 0.05));
    let mut reference = vec![0.0; 256];
    fbm.gen_uniform_grid_2d(&mut reference, &grid, 4)
        .expect("reference");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let fbm = Arc::clone(&fbm);
            thread::spawn(move || {
                let mut out = vec![0.0; 256];
                fbm.gen_uniform_grid_2d(&mut out, &grid, 4).expect("threaded");
                out
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().expect("thread"), reference);
    }
}

#[test]
fn nodes_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Node>();
    assert_send_sync::<Registry>();
}
