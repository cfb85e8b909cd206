use super::*;

fn columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("name", "Name", ColumnType::Text).sortable().searchable().filterable(),
        ColumnDescriptor::new("price", "Price", ColumnType::Number).sortable().filterable(),
        ColumnDescriptor::new("created", "Created", ColumnType::Date).filterable(),
        ColumnDescriptor::new("notes", "Notes", ColumnType::Text),
    ]
}

fn state() -> QueryState {
    QueryState::new(&columns(), 10)
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn default_state_starts_on_page_one() {
    let s = state();
    assert_eq!(s.page, 1);
    assert_eq!(s.page_size, 10);
}

#[test]
fn default_state_has_no_sort_search_or_filters() {
    let s = state();
    assert!(s.sort_column.is_none());
    assert!(s.search.is_empty());
    assert!(s.filters.is_empty());
}

#[test]
fn default_state_shows_every_declared_column() {
    let cols = columns();
    let s = QueryState::new(&cols, 10);
    assert!(s.all_columns_visible(&cols));
    assert_eq!(s.visible_columns, vec!["name", "price", "created", "notes"]);
}

#[test]
fn zero_page_size_is_bumped_to_one() {
    let s = QueryState::new(&columns(), 0);
    assert_eq!(s.page_size, 1);
}

// =============================================================
// Page resets: every result-set transition except set_page
// =============================================================

#[test]
fn set_page_moves_without_reset() {
    let mut s = state();
    assert_eq!(s.set_page(5), StateChange::Query);
    assert_eq!(s.page, 5);
}

#[test]
fn set_page_zero_clamps_to_one() {
    let mut s = state();
    s.set_page(0);
    assert_eq!(s.page, 1);
}

#[test]
fn set_search_resets_page() {
    let mut s = state();
    s.set_page(5);
    assert_eq!(s.set_search("widgets"), StateChange::Query);
    assert_eq!(s.page, 1);
    assert_eq!(s.search, "widgets");
}

#[test]
fn set_sort_resets_page() {
    let mut s = state();
    s.set_page(5);
    s.set_sort(Some("name".to_owned()), SortDirection::Desc);
    assert_eq!(s.page, 1);
}

#[test]
fn set_filter_resets_page() {
    let mut s = state();
    let cols = columns();
    s.set_page(5);
    s.set_filter(&cols, "name", Some(FilterValue::Text("x".repeat(3))));
    assert_eq!(s.page, 1);
}

#[test]
fn set_page_size_resets_page() {
    let mut s = state();
    s.set_page(5);
    assert_eq!(s.set_page_size(25), StateChange::Query);
    assert_eq!(s.page, 1);
    assert_eq!(s.page_size, 25);
}

#[test]
fn toggle_column_visibility_keeps_page() {
    let mut s = state();
    let cols = columns();
    s.set_page(5);
    assert_eq!(s.toggle_column_visibility(&cols, "notes"), StateChange::View);
    assert_eq!(s.page, 5);
}

// =============================================================
// Sorting
// =============================================================

#[test]
fn toggle_sort_starts_ascending() {
    let mut s = state();
    let cols = columns();
    s.toggle_sort(&cols, "name");
    assert_eq!(s.sort_column.as_deref(), Some("name"));
    assert_eq!(s.sort_direction, SortDirection::Asc);
}

#[test]
fn toggle_sort_same_column_flips_direction() {
    let mut s = state();
    let cols = columns();
    s.toggle_sort(&cols, "name");
    s.toggle_sort(&cols, "name");
    assert_eq!(s.sort_direction, SortDirection::Desc);
}

#[test]
fn toggle_sort_new_column_restarts_ascending() {
    let mut s = state();
    let cols = columns();
    s.toggle_sort(&cols, "name");
    s.toggle_sort(&cols, "name");
    s.toggle_sort(&cols, "price");
    assert_eq!(s.sort_column.as_deref(), Some("price"));
    assert_eq!(s.sort_direction, SortDirection::Asc);
}

#[test]
fn toggle_sort_non_sortable_column_is_noop() {
    let mut s = state();
    let cols = columns();
    assert_eq!(s.toggle_sort(&cols, "created"), StateChange::None);
    assert!(s.sort_column.is_none());
}

#[test]
fn sort_direction_parse_is_lenient() {
    assert_eq!(SortDirection::parse("DESC"), SortDirection::Desc);
    assert_eq!(SortDirection::parse("sideways"), SortDirection::Asc);
}

// =============================================================
// Filters
// =============================================================

#[test]
fn filter_for_undeclared_column_is_noop() {
    let mut s = state();
    let cols = columns();
    let change = s.set_filter(&cols, "ghost", Some(FilterValue::Text("x".repeat(3))));
    assert_eq!(change, StateChange::None);
    assert!(s.filters.is_empty());
}

#[test]
fn filter_for_non_filterable_column_is_noop() {
    let mut s = state();
    let cols = columns();
    let change = s.set_filter(&cols, "notes", Some(FilterValue::Text("abc".to_owned())));
    assert_eq!(change, StateChange::None);
}

#[test]
fn filter_shape_must_match_declared_type() {
    let mut s = state();
    let cols = columns();
    // Text filter against the Number column is rejected.
    let change = s.set_filter(&cols, "price", Some(FilterValue::Text("cheap".to_owned())));
    assert_eq!(change, StateChange::None);
    assert!(s.filters.is_empty());
}

#[test]
fn matching_filter_shape_is_stored() {
    let mut s = state();
    let cols = columns();
    let change = s.set_filter(&cols, "price", Some(FilterValue::number_range(1.0, 5.0)));
    assert_eq!(change, StateChange::Query);
    assert!(s.filters.contains_key("price"));
}

#[test]
fn clearing_an_active_filter_resets_page() {
    let mut s = state();
    let cols = columns();
    s.set_filter(&cols, "name", Some(FilterValue::Text("abc".to_owned())));
    s.set_page(3);
    assert_eq!(s.set_filter(&cols, "name", None), StateChange::Query);
    assert!(s.filters.is_empty());
    assert_eq!(s.page, 1);
}

#[test]
fn clearing_an_absent_filter_is_noop() {
    let mut s = state();
    let cols = columns();
    assert_eq!(s.set_filter(&cols, "name", None), StateChange::None);
}

#[test]
fn inert_filter_value_clears_like_none() {
    let mut s = state();
    let cols = columns();
    s.set_filter(&cols, "name", Some(FilterValue::Text("abc".to_owned())));
    let change = s.set_filter(&cols, "name", Some(FilterValue::Text(String::new())));
    assert_eq!(change, StateChange::Query);
    assert!(s.filters.is_empty());
}

// =============================================================
// Column visibility
// =============================================================

#[test]
fn hiding_and_reshowing_preserves_declared_order() {
    let mut s = state();
    let cols = columns();
    s.toggle_column_visibility(&cols, "name");
    assert_eq!(s.visible_columns, vec!["price", "created", "notes"]);
    s.toggle_column_visibility(&cols, "name");
    assert_eq!(s.visible_columns, vec!["name", "price", "created", "notes"]);
}

#[test]
fn toggling_undeclared_column_is_noop() {
    let mut s = state();
    let cols = columns();
    assert_eq!(s.toggle_column_visibility(&cols, "ghost"), StateChange::None);
}

#[test]
fn is_visible_tracks_toggles() {
    let mut s = state();
    let cols = columns();
    assert!(s.is_visible("price"));
    s.toggle_column_visibility(&cols, "price");
    assert!(!s.is_visible("price"));
}
