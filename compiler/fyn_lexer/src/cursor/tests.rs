use super::*;

#[test]
fn bump_walks_characters_not_bytes() {
    let mut cursor = Cursor::new("aé!");
    assert_eq!(cursor.bump(), Some('a'));
    assert_eq!(cursor.bump(), Some('é'));
    assert_eq!(cursor.pos(), 3);
    assert_eq!(cursor.loc(), Position::new(1, 3));
    assert_eq!(cursor.current(), Some('!'));
    assert_eq!(cursor.peek(), None);
}

#[test]
fn eof_after_last_character() {
    let mut cursor = Cursor::new("x");
    assert!(!cursor.is_eof());
    cursor.bump();
    assert!(cursor.is_eof());
    assert_eq!(cursor.bump(), None);
}

#[test]
fn eat_while_stops_at_predicate_failure() {
    let mut cursor = Cursor::new("..:x");
    cursor.eat_while(|c| c == '.' || c == ':');
    assert_eq!(cursor.slice_from(0), "..:");
    assert_eq!(cursor.current(), Some('x'));
}

#[test]
fn advance_to_without_newline_moves_column() {
    let mut cursor = Cursor::new("\"héllo\" d");
    cursor.advance_to(8);
    assert_eq!(cursor.loc(), Position::new(1, 8));
    assert_eq!(cursor.current(), Some(' '));
}

#[test]
fn advance_to_across_newlines_resets_column() {
    let mut cursor = Cursor::new("\"a\nbc\nde\" x");
    cursor.advance_to(10);
    assert_eq!(cursor.loc(), Position::new(3, 4));
}

#[test]
fn advance_to_matches_bumping() {
    let src = "ab\ncd\n\nefg";
    let mut bulk = Cursor::new(src);
    bulk.advance_to(src.len());
    let mut single = Cursor::new(src);
    while single.bump().is_some() {}
    assert_eq!(bulk.loc(), single.loc());
}
