//! Integration tests for the grid-map reader and writer

use img2map::{parse, parse_with_options, serialize, Coord, FormatError, ParseOptions};
use pretty_assertions::assert_eq;

const DOORS_MAP: &str = "\
type octile
height 4
width 5
key 1 2 3 0 4 3
key 0 0
map
@@@.@
@...@
@.T..
@@@@.
";

#[test]
fn test_round_trip() {
    let doc = parse(DOORS_MAP).expect("Should parse");
    let text = serialize(&doc);
    assert_eq!(text, DOORS_MAP);
    assert_eq!(parse(&text).expect("Should parse"), doc);
}

#[test]
fn test_round_trip_normalizes_header() {
    let input = "width 3\nkey 2 0 0 0\nfoo bar\ntype custom\nheight 2\nmap\n...\n.T.\n";
    let doc = parse(input).expect("Should parse");
    let reparsed = parse(&serialize(&doc)).expect("Should parse");
    assert_eq!(reparsed, doc);
    assert_eq!(
        serialize(&doc),
        "type custom\nheight 2\nwidth 3\nkey 2 0 0 0\nmap\n...\n.T.\n"
    );
}

#[test]
fn test_type_preserved_verbatim() {
    let doc = parse("type Octile-8\nmap\n.\n").expect("Should parse");
    assert_eq!(doc.map_type, "Octile-8");
    assert!(serialize(&doc).starts_with("type Octile-8\n"));
}

#[test]
fn test_numeric_type_preserved_verbatim() {
    let doc = parse("type 007\nmap\n.\n").expect("Should parse");
    assert_eq!(doc.map_type, "007");
    assert_eq!(parse(&serialize(&doc)).unwrap().map_type, "007");
    assert!(serialize(&doc).starts_with("type 007\n"));
}

#[test]
fn test_key_line_pairs() {
    let doc = parse("key 1 2 3 4 5 6\nmap\n.......\n.......\n.......\n").expect("Should parse");
    assert!(doc.is_key(Coord::new(1, 2)));
    assert!(doc.is_door(Coord::new(3, 4)));
    assert!(doc.is_door(Coord::new(5, 6)));
    assert_eq!(doc.find_key(Coord::new(5, 6)), Some(Coord::new(1, 2)));
    assert_eq!(doc.find_key(Coord::new(1, 2)), None);
}

#[test]
fn test_queries_on_parsed_map() {
    let doc = parse(DOORS_MAP).expect("Should parse");

    // (col, row) against matrix[row][col]
    assert_eq!(doc.symbol_at(Coord::new(3, 0)), Some('.'));
    assert!(doc.is_door(Coord::new(3, 0)));
    assert!(!doc.is_free(Coord::new(3, 0)), "doors are not free");
    assert!(!doc.is_free(Coord::new(0, 1)), "walls are not free");
    assert!(doc.is_free(Coord::new(1, 2)), "a key on open ground is free");
    assert!(doc.is_free(Coord::new(2, 2)), "trees are free");
    assert!(!doc.is_free(Coord::new(0, 0)), "a key on a wall is not free");
}

#[test]
fn test_all_free_order() {
    let doc = parse(DOORS_MAP).expect("Should parse");
    assert_eq!(
        doc.all_free(),
        vec![
            Coord::new(1, 1),
            Coord::new(1, 2),
            Coord::new(2, 1),
            Coord::new(2, 2),
            Coord::new(3, 1),
            Coord::new(3, 2),
            Coord::new(4, 2),
        ]
    );
}

#[test]
fn test_all_free_two_by_two() {
    let doc = parse("map\n..\n..\n").expect("Should parse");
    assert_eq!(
        doc.all_free(),
        vec![
            Coord::new(0, 0),
            Coord::new(0, 1),
            Coord::new(1, 0),
            Coord::new(1, 1),
        ]
    );
}

#[test]
fn test_height_last_wins() {
    let doc = parse("height 2\nheight 5\nmap\n.\n.\n.\n.\n.\n").expect("Should parse");
    assert_eq!(doc.height, 5);
}

#[test]
fn test_malformed_inputs() {
    assert!(matches!(
        parse("key 1 2 3\nmap\n....\n"),
        Err(FormatError::OddCoordinateCount { count: 3, .. })
    ));
    assert!(matches!(
        parse("width 4\nmap\n....\n...\n"),
        Err(FormatError::RowLength { row: 1, .. })
    ));
    assert!(matches!(
        parse("type octile\nheight 1\n"),
        Err(FormatError::MissingSeparator { .. })
    ));
    assert!(matches!(
        parse("width four\nmap\n....\n"),
        Err(FormatError::InvalidInteger { .. })
    ));
}

#[test]
fn test_error_report_points_at_line() {
    let source = "type octile\nkey 1 2 3\nmap\n....\n";
    let err = parse(source).unwrap_err();
    assert_eq!(err.span(), &(12..21));
    assert_eq!(&source[err.span().clone()], "key 1 2 3");

    let report = err.format(source, "broken.map");
    assert!(report.contains("broken.map"));
}

#[test]
fn test_strict_mode_is_opt_in() {
    let input = "key 0 0 1 0\nkey 1 0 2 0\nmap\n...\n";
    assert!(parse(input).is_ok());
    assert!(matches!(
        parse_with_options(input, ParseOptions::new().with_strict(true)),
        Err(FormatError::KeyIsDoor { .. })
    ));
}
