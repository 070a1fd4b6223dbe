use super::*;

fn edge(v: usize, w: usize, cap: f64) -> FlowEdge {
    FlowEdge::new(VertexId(v), VertexId(w), cap)
}

fn triangle() -> CapacitatedDigraph {
    CapacitatedDigraph::with_edges(
        3,
        [edge(0, 1, 10.0), edge(1, 2, 5.0), edge(2, 0, 1.0), edge(0, 2, 2.0)],
    )
}

#[test]
fn incoming_and_outgoing_follow_insertion_order() {
    let g = triangle();
    let out0: Vec<_> = g.outgoing(VertexId(0)).map(|e| e.to()).collect();
    assert_eq!(out0, vec![VertexId(1), VertexId(2)]);
    let in2: Vec<_> = g.incoming_ids(VertexId(2)).collect();
    assert_eq!(in2, vec![EdgeId(1), EdgeId(3)]);
    // restartable: a second pass yields the same sequence
    assert_eq!(g.incoming(VertexId(2)).count(), 2);
    assert_eq!(g.incoming(VertexId(2)).count(), 2);
    assert_eq!(g.adj(VertexId(0)).count(), 3);
}

#[test]
fn self_loops_counted_but_not_listed() {
    let mut g = triangle();
    g.add_edge(edge(1, 1, 4.0));
    assert_eq!(g.num_edges(), 5);
    assert_eq!(g.edges().count(), 4);
    assert!(!g.to_string().contains("1->1"));
    // a self-loop is both incoming and outgoing at its vertex
    assert_eq!(g.outgoing(VertexId(1)).count(), 2);
    assert_eq!(g.incoming(VertexId(1)).count(), 2);
    // flow on the self-loop still counts towards the network total
    g.edge_mut(EdgeId(4)).set_flow(3.0);
    g.edge_mut(EdgeId(0)).set_flow(2.0);
    assert_eq!(g.total_flow(), 5.0);
}

#[test]
fn throughput_is_whole_units_of_capacity() {
    assert_eq!(edge(0, 1, 2.99).throughput(), 2.0);
    assert_eq!(edge(0, 1, 0.4).throughput(), 0.0);
    assert_eq!(edge(0, 1, 6.0).throughput(), 6.0);
}

#[test]
fn parallel_edges_are_kept() {
    let g = CapacitatedDigraph::with_edges(2, [edge(0, 1, 1.0), edge(0, 1, 3.0)]);
    assert_eq!(g.outgoing(VertexId(0)).count(), 2);
    assert_eq!(g.incoming(VertexId(1)).count(), 2);
}

#[test]
fn snapshot_preserves_structure_and_zeroes_flow() {
    let mut g = triangle();
    g.edge_mut(EdgeId(0)).set_flow(7.0);
    g.edge_mut(EdgeId(2)).add_flow(3.0);
    let s = g.snapshot_zero_flow();
    assert_eq!(s.num_vertices(), g.num_vertices());
    assert_eq!(s.num_edges(), g.num_edges());
    for ((ia, a), (ib, b)) in g.edges_with_ids().zip(s.edges_with_ids()) {
        assert_eq!(ia, ib);
        assert_eq!((a.from(), a.to(), a.capacity()), (b.from(), b.to(), b.capacity()));
        assert_eq!(b.flow(), 0.0);
    }
    assert_eq!(s.total_flow(), 0.0);
    // source untouched
    assert_eq!(g.total_flow(), 10.0);
}

#[test]
fn over_capacity_is_a_state_not_an_error() {
    let mut g = triangle();
    g.edge_mut(EdgeId(1)).set_flow(8.0);
    let e = g.edge(EdgeId(1));
    assert!(e.is_over_capacity());
    assert_eq!(e.excess(), 3.0);
    assert_eq!(e.residual_capacity_to(e.to()), -3.0);
    assert_eq!(e.residual_capacity_to(e.from()), 8.0);
    let sat: Vec<_> = g.saturated().map(|(id, _)| id).collect();
    assert_eq!(sat, vec![EdgeId(1)]);
}

#[test]
fn display_lists_outgoing_edges_per_vertex() {
    let mut g = CapacitatedDigraph::with_edges(2, [edge(0, 1, 4.0)]);
    g.edge_mut(EdgeId(0)).set_flow(1.5);
    assert_eq!(g.to_string(), "2 1\n0:  0->1 1.5/4  \n1:  \n");
}

#[test]
#[should_panic(expected = "out of range")]
fn out_of_range_vertex_panics() {
    let mut g = CapacitatedDigraph::new(2);
    g.add_edge(edge(0, 2, 1.0));
}
