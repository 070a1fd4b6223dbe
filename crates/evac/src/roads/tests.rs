use super::special::grid_city;
use super::*;
use crate::geometry::Point;
use crate::network::VertexId;

const MAP: &str = "\
# alert detX detY
0.5 0 0
true 0 0 1 0 2 1
false 1 0 1 1 1 1

true 1 1 0 1 1 1
";

#[test]
fn parses_header_and_roads() {
    let map = parse_roadmap(MAP).unwrap();
    assert_eq!(map.alert, 0.5);
    assert_eq!(map.detonation, Point::new(0.0, 0.0));
    assert_eq!(map.roads.len(), 3);
    let r = map.roads[0];
    assert_eq!(r.orientation, Orientation::Horizontal);
    assert_eq!((r.from, r.to), (Point::new(0.0, 0.0), Point::new(1.0, 0.0)));
    assert_eq!(r.capacity(10.0), 20.0);
    assert_eq!(map.roads[1].orientation, Orientation::Vertical);
}

#[test]
fn parse_errors_carry_line_numbers() {
    let err = parse_roadmap("0 0 0\ntrue 0 0 1 0 1\n").unwrap_err();
    assert_eq!(err.line, 2);
    assert!(err.reason.contains("expected 7 fields"));

    let err = parse_roadmap("0 0 0\n\nmaybe 0 0 1 0 1 1\n").unwrap_err();
    assert_eq!(err.line, 3);
    assert!(err.to_string().contains("orientation"));

    let mixed = parse_roadmap("0 0 0\nTRUE 0 0 1 0 1 1\nFalse 0 0 0 1 1 1\n").unwrap();
    assert_eq!(mixed.roads[0].orientation, Orientation::Horizontal);
    assert_eq!(mixed.roads[1].orientation, Orientation::Vertical);

    let err = parse_roadmap("0 0 0\ntrue 0 0 1 0 -1 1\n").unwrap_err();
    assert!(err.reason.contains("nonnegative"));

    let err = parse_roadmap("0 x 0\n").unwrap_err();
    assert!(err.reason.contains("detX"));

    assert_eq!(parse_roadmap("# only a comment\n").unwrap_err().line, 1);
}

#[test]
fn ids_follow_first_sight_order() {
    let map = parse_roadmap(MAP).unwrap();
    let net = RoadNetwork::from_roads(&map.roads, 1.0);
    assert_eq!(net.num_intersections(), 4);
    assert_eq!(net.num_roads(), 3);
    assert_eq!(net.id_of(&Point::new(0.0, 0.0)), Some(VertexId(0)));
    assert_eq!(net.id_of(&Point::new(1.0, 0.0)), Some(VertexId(1)));
    assert_eq!(net.id_of(&Point::new(1.0, 1.0)), Some(VertexId(2)));
    assert_eq!(net.id_of(&Point::new(0.0, 1.0)), Some(VertexId(3)));
    assert_eq!(net.point(VertexId(2)), Point::new(1.0, 1.0));
    // intersections iterate in (y, x) order, independent of ids
    let order: Vec<_> = net.intersections().map(|n| n.id).collect();
    assert_eq!(order, vec![VertexId(0), VertexId(1), VertexId(3), VertexId(2)]);
}

#[test]
fn neighbor_links_respect_orientation() {
    let map = parse_roadmap(MAP).unwrap();
    let net = RoadNetwork::from_roads(&map.roads, 1.0);
    let a = net.intersection(&Point::new(0.0, 0.0)).unwrap();
    let b = net.intersection(&Point::new(1.0, 0.0)).unwrap();
    let c = net.intersection(&Point::new(1.0, 1.0)).unwrap();
    let d = net.intersection(&Point::new(0.0, 1.0)).unwrap();
    assert_eq!(a.east, Some(b.id));
    assert_eq!(b.west, Some(a.id));
    assert_eq!(b.north, Some(c.id));
    assert_eq!(c.south, Some(b.id));
    assert_eq!(c.west, Some(d.id));
    assert_eq!(d.east, Some(c.id));
    assert_eq!(a.north, None);
    assert_eq!(b.degree(), 2);
    assert_eq!((a.out_edges.len(), a.in_edges.len()), (1, 0));
}

#[test]
fn vertical_flag_never_links_east_west() {
    // diagonal road flagged vertical: only the north/south pair is set
    let road = RoadRecord {
        orientation: Orientation::Vertical,
        from: Point::new(0.0, 0.0),
        to: Point::new(2.0, 3.0),
        width: 1.0,
        length: 1.0,
    };
    let net = RoadNetwork::from_roads([&road], 1.0);
    let a = net.intersection(&road.from).unwrap();
    assert_eq!(a.north, Some(VertexId(1)));
    assert_eq!((a.east, a.west), (None, None));
}

#[test]
fn digraph_holds_each_road_once() {
    let map = grid_city(1, 1.0, 2.0);
    assert_eq!(map.roads.len(), 24);
    let net = RoadNetwork::from_roads(&map.roads, 3.0);
    assert_eq!(net.num_intersections(), 9);
    let g = net.to_digraph();
    assert_eq!(g.num_vertices(), 9);
    assert_eq!(g.num_edges(), 24);
    assert!(g.edges().all(|e| e.capacity() == 6.0 && e.flow() == 0.0));
    let center = net.id_of(&Point::new(0.0, 0.0)).unwrap();
    assert_eq!(g.outgoing(center).count(), 4);
    assert_eq!(g.incoming(center).count(), 4);
    // intersection lists are left intact after conversion
    assert_eq!(net.to_digraph().num_edges(), 24);
}
