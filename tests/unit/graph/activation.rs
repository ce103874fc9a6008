use super::*;

fn chain() -> GraphActivationScheduler {
    GraphActivationScheduler::from_json_str(
        r#"{
            "edge_delay_secs": 0.25,
            "nodes": [
                { "id": "input", "connections": ["hidden"] },
                { "id": "hidden", "connections": ["output"] },
                { "id": "output" }
            ]
        }"#,
    )
    .unwrap()
}

#[test]
fn activation_propagates_along_edges() {
    let mut g = chain();
    let input = g.node("input").unwrap();
    assert!(g.activate(input, 0.0));
    assert!(g.advance(0.2).is_empty());
    assert_eq!(g.advance(0.25), [1]);
    assert_eq!(g.advance(0.4), Vec::<usize>::new());
    assert_eq!(g.advance(0.5), [2]);
    assert!(g.is_idle());
    assert_eq!(g.active_nodes().collect::<Vec<_>>(), [0, 1, 2]);
}

#[test]
fn coarse_polling_keeps_the_original_schedule() {
    let mut g = chain();
    g.activate(0, 0.0);
    assert_eq!(g.advance(10.0), [1, 2]);
}

#[test]
fn cycles_terminate() {
    let mut g = GraphActivationScheduler::new(0.0).unwrap();
    let a = g.add_node("a");
    let b = g.add_node("b");
    g.connect(a, b).unwrap();
    g.connect(b, a).unwrap();
    g.activate(a, 0.0);
    assert_eq!(g.advance(0.0), [b]);
    assert!(g.is_idle());
    assert!(!g.activate(a, 1.0));
}

#[test]
fn simultaneous_activations_release_in_node_order() {
    let mut g = GraphActivationScheduler::new(0.1).unwrap();
    let hub = g.add_node("hub");
    let x = g.add_node("x");
    let y = g.add_node("y");
    g.connect(hub, y).unwrap();
    g.connect(hub, x).unwrap();
    g.activate(hub, 0.0);
    assert_eq!(g.advance(1.0), [x, y]);
}

#[test]
fn pattern_staggers_seeds_and_resets_previous_wave() {
    let mut g = chain();
    g.activate(0, 0.0);
    g.advance(1.0);

    g.activate_pattern(&[2, 0], 5.0, 0.2);
    assert_eq!(g.active_nodes().count(), 0);
    assert_eq!(g.next_due(), Some(5.0));
    assert_eq!(g.advance(5.0), [2]);
    assert_eq!(g.advance(5.25), [0]);
    assert!(g.is_active(0));
    assert!(!g.is_active(1));
}

#[test]
fn reset_clears_state() {
    let mut g = chain();
    g.activate(0, 0.0);
    g.reset();
    assert!(g.is_idle());
    assert!(!g.is_active(0));
    assert!(g.advance(10.0).is_empty());
}

#[test]
fn unknown_connections_are_rejected() {
    let err = GraphActivationScheduler::from_json_str(
        r#"{ "nodes": [ { "id": "a", "connections": ["missing"] } ] }"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("unknown node 'missing'"));
}

#[test]
fn invalid_graphs_are_rejected() {
    assert!(GraphActivationScheduler::new(-1.0).is_err());
    let dup = r#"{ "nodes": [ { "id": "a" }, { "id": "a" } ] }"#;
    assert!(GraphActivationScheduler::from_json_str(dup).is_err());
    let mut g = GraphActivationScheduler::new(0.1).unwrap();
    g.add_node("only");
    assert!(g.connect(0, 3).is_err());
}

#[test]
fn default_delay_applies() {
    let g = GraphActivationScheduler::from_json_str(r#"{ "nodes": [] }"#).unwrap();
    assert!(g.is_empty());
    let mut g = GraphActivationScheduler::from_json_str(
        r#"{ "nodes": [ { "id": "a", "connections": ["b"] }, { "id": "b" } ] }"#,
    )
    .unwrap();
    g.activate(0, 1.0);
    assert_eq!(g.next_due(), Some(1.0 + DEFAULT_EDGE_DELAY_SECS));
    assert_eq!(g.label(1), Some("b"));
}
