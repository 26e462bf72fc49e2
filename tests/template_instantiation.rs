//! Integration tests for filling template maps

use img2map::template::count_placeholders;
use img2map::{
    instantiate, parse, parse_with_options, Coord, InstantiateOptions, ParseOptions,
    PlaceholderTemplate, TemplateError,
};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

const TEMPLATE: &str = "\
type octile
height 3
width 4
key $key$ 3 0
key $key$ 0 2 1 2
map
@@@.
@..@
..@@
";

fn key_of(line: &str) -> Coord {
    let values: Vec<usize> = line
        .split_whitespace()
        .skip(1)
        .take(2)
        .map(|v| v.parse().expect("integer"))
        .collect();
    Coord::new(values[0], values[1])
}

#[test]
fn test_two_placeholders_two_free_cells() {
    let doc = parse("map\n@.@\n@.@\n").expect("Should parse");
    let free = doc.all_free();
    assert_eq!(free, vec![Coord::new(1, 0), Coord::new(1, 1)]);

    let mut rng = StdRng::seed_from_u64(2024);
    let out = instantiate("key $key$ 0 0\nkey $key$ 0 0\n", &doc, &mut rng).unwrap();

    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in lines {
        assert!(line.starts_with("key "));
        assert!(line.ends_with(" 0 0"));
        assert!(free.contains(&key_of(line)), "{} not drawn from free cells", line);
    }
}

#[test]
fn test_instantiated_template_parses_with_keys() {
    let template = PlaceholderTemplate::new(TEMPLATE);
    assert_eq!(template.placeholder_count(), 2);

    let doc = template.document(ParseOptions::default()).expect("Should parse");
    assert!(doc.doors.is_empty(), "placeholder keys are not registered");

    let mut rng = StdRng::seed_from_u64(17);
    let options = InstantiateOptions::new().with_distinct_keys(true);
    let out = template
        .instantiate(&doc, &mut rng, options)
        .expect("Should instantiate");
    assert_eq!(count_placeholders(&out), 0);

    let concrete = parse(&out).expect("Should parse");
    assert_eq!(concrete.doors.len(), 2);
    assert_eq!(concrete.matrix, doc.matrix);
    for (key, doors) in concrete.doors.iter() {
        assert!(doc.is_free(key), "key {} not on a free cell", key);
        assert!(!doors.is_empty());
    }
    assert!(concrete.find_key(Coord::new(3, 0)).is_some());
    assert!(concrete.find_key(Coord::new(1, 2)).is_some());
}

#[test]
fn test_template_text_outside_placeholders_untouched() {
    let doc = parse(TEMPLATE).expect("Should parse");
    let mut rng = StdRng::seed_from_u64(5);
    let out = instantiate(TEMPLATE, &doc, &mut rng).unwrap();

    let before: Vec<&str> = TEMPLATE.lines().filter(|l| !l.starts_with("key")).collect();
    let after: Vec<&str> = out.lines().filter(|l| !l.starts_with("key")).collect();
    assert_eq!(before, after);

    let keys: Vec<&str> = out.lines().filter(|l| l.starts_with("key")).collect();
    assert!(keys[0].ends_with(" 3 0"));
    assert!(keys[1].ends_with(" 0 2 1 2"));
}

#[test]
fn test_same_seed_same_map() {
    let doc = parse(TEMPLATE).expect("Should parse");
    let a = instantiate(TEMPLATE, &doc, &mut StdRng::seed_from_u64(8)).unwrap();
    let b = instantiate(TEMPLATE, &doc, &mut StdRng::seed_from_u64(8)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_distinct_keys_option() {
    let doc = parse(TEMPLATE).expect("Should parse");
    let options = InstantiateOptions::new().with_distinct_keys(true);

    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let out = img2map::template::instantiate_with_options(TEMPLATE, &doc, &mut rng, options)
            .unwrap();
        let concrete = parse_with_options(&out, ParseOptions::default()).unwrap();
        let keys: Vec<Coord> = concrete.doors.keys().collect();
        assert_eq!(keys.len(), 2, "seed {}", seed);
        assert_ne!(keys[0], keys[1]);
    }
}

#[test]
fn test_no_free_cell() {
    let doc = parse("map\n@@\n@@\n").expect("Should parse");
    let mut rng = StdRng::seed_from_u64(0);
    assert_eq!(
        instantiate("key $key$\n", &doc, &mut rng),
        Err(TemplateError::NoFreeCell)
    );
}
