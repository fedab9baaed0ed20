use super::*;

#[test]
fn line_text_strips_line_breaks() {
    let doc = DocumentSnapshot::new("fn main() {\r\n    let x\n}", "rust");

    assert_eq!(doc.line_count(), 3);
    assert_eq!(doc.line_text(0).as_deref(), Some("fn main() {"));
    assert_eq!(doc.line_text(1).as_deref(), Some("    let x"));
    assert_eq!(doc.line_text(2).as_deref(), Some("}"));
    assert_eq!(doc.line_text(3), None);
    assert_eq!(doc.line_len(1), 9);
    assert_eq!(doc.line_len(9), 0);
}

#[test]
fn clamp_keeps_positions_inside_the_text() {
    let doc = DocumentSnapshot::new("ab\nc", "text");

    assert_eq!(doc.clamp(Position::new(0, 1)), Position::new(0, 1));
    assert_eq!(doc.clamp(Position::new(0, 10)), Position::new(0, 2));
    assert_eq!(doc.clamp(Position::new(7, 3)), Position::new(1, 1));
}

#[test]
fn snapshot_carries_language_and_version() {
    let doc = DocumentSnapshot::new("", "python").with_version(4);

    assert_eq!(doc.language_id(), "python");
    assert_eq!(doc.version(), 4);
    assert_eq!(doc.line_count(), 1);
}
