use super::*;

#[test]
fn new_column_has_no_capabilities() {
    let col = ColumnDescriptor::new("name", "Name", ColumnType::Text);
    assert!(!col.sortable);
    assert!(!col.searchable);
    assert!(!col.filterable);
}

#[test]
fn chained_setters_enable_capabilities() {
    let col = ColumnDescriptor::new("age", "Age", ColumnType::Number)
        .sortable()
        .searchable()
        .filterable();
    assert!(col.sortable);
    assert!(col.searchable);
    assert!(col.filterable);
}

#[test]
fn default_column_type_is_text() {
    assert_eq!(ColumnType::default(), ColumnType::Text);
}

#[test]
fn find_locates_declared_column() {
    let cols = vec![
        ColumnDescriptor::new("a", "A", ColumnType::Text),
        ColumnDescriptor::new("b", "B", ColumnType::Number),
    ];
    assert_eq!(find(&cols, "b").map(|c| c.column_type), Some(ColumnType::Number));
}

#[test]
fn find_returns_none_for_unknown_key() {
    let cols = vec![ColumnDescriptor::new("a", "A", ColumnType::Text)];
    assert!(find(&cols, "missing").is_none());
}
