//! Grid-map text writer

use crate::grid::{Coord, GridDocument};
use crate::parser::lexer::PLACEHOLDER;
use crate::parser::MAP_SEPARATOR;

/// Serialize a document to grid-map text.
///
/// Keys are written in registry order, each followed by its doors.
pub fn serialize(doc: &GridDocument) -> String {
    serialize_with_placeholders(doc, &[])
}

/// Serialize a document and append one `key $key$ <doors...>` line per
/// entry of `placeholder_doors`, producing a template for instantiation.
pub fn serialize_with_placeholders(doc: &GridDocument, placeholder_doors: &[Vec<Coord>]) -> String {
    let mut out = String::with_capacity(64 + doc.height * (doc.width + 1));

    out.push_str(&format!("type {}\n", doc.map_type));
    out.push_str(&format!("height {}\n", doc.height));
    out.push_str(&format!("width {}\n", doc.width));

    for (key, doors) in doc.doors.iter() {
        out.push_str("key ");
        out.push_str(&key.to_pair());
        push_coords(&mut out, doors);
        out.push('\n');
    }
    for doors in placeholder_doors {
        out.push_str("key ");
        out.push_str(PLACEHOLDER);
        push_coords(&mut out, doors);
        out.push('\n');
    }

    out.push_str(MAP_SEPARATOR);
    out.push('\n');
    for row in doc.matrix.iter().take(doc.height) {
        out.extend(row.iter());
        out.push('\n');
    }
    out
}

fn push_coords(out: &mut String, coords: &[Coord]) {
    for coord in coords {
        out.push(' ');
        out.push_str(&coord.to_pair());
    }
}
