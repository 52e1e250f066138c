use super::*;
use std::io::Cursor;

#[test]
fn node_table_skips_header_and_derives_keys() {
    let csv = "school,x,y\nA & B, 10, 20\n\"Univ, C\",30.5,40\n";
    let nodes = read_node_table(Cursor::new(csv)).unwrap();
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].name, "A & B");
    assert_eq!(nodes[0].key.as_str(), "AB");
    assert_eq!(nodes[0].position, Point::new(10.0, 20.0));
    assert_eq!(nodes[1].key.as_str(), "UnivC");
    assert_eq!(nodes[1].position, Point::new(30.5, 40.0));
}

#[test]
fn node_table_reports_bad_numbers_with_line() {
    let csv = "school,x,y\nA,1,2\nB,oops,2\n";
    let err = read_node_table(Cursor::new(csv)).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("data error"));
    assert!(msg.contains("line 3"), "{msg}");
    assert!(msg.contains("'x'"), "{msg}");
}

#[test]
fn edge_table_parses_flags_and_optional_names() {
    let csv = "x1,y1,x2,y2,mst,source,target\n\
               0,0,3,4,1,Alpha U,Beta U\n\
               1,1,2,2,0,Beta U,\n\
               1,1,2,2,1.0,Gamma,Alpha U\n";
    let edges = read_edge_table(Cursor::new(csv)).unwrap();
    assert_eq!(edges.len(), 3);

    assert!(edges[0].spanning);
    assert_eq!(edges[0].from, Point::new(0.0, 0.0));
    assert_eq!(edges[0].to, Point::new(3.0, 4.0));
    assert_eq!(edges[0].source_key().as_str(), "AlphaU");
    assert_eq!(edges[0].target_key().as_str(), "BetaU");

    assert!(!edges[1].spanning);
    assert_eq!(edges[1].target, None);
    assert!(edges[1].target_key().is_empty());

    assert!(edges[2].spanning);
    assert_eq!(edges[2].key(), EdgeKey::from_names(Some("Alpha U"), Some("Gamma")));
}

#[test]
fn edge_table_requires_coordinates() {
    let csv = "x1,y1,x2,y2,mst,source,target\n0,0,3\n";
    assert!(read_edge_table(Cursor::new(csv)).is_err());
}
