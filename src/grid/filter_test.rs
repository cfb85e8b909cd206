use super::*;

fn text_col() -> ColumnDescriptor {
    ColumnDescriptor::new("name", "Name", ColumnType::Text).filterable()
}

fn number_col() -> ColumnDescriptor {
    ColumnDescriptor::new("price", "Price", ColumnType::Number).filterable()
}

fn date_col() -> ColumnDescriptor {
    ColumnDescriptor::new("created", "Created", ColumnType::Date).filterable()
}

// --- is_active ---

#[test]
fn empty_text_is_inert() {
    assert!(!FilterValue::Text(String::new()).is_active());
}

#[test]
fn populated_text_is_active() {
    assert!(FilterValue::Text("widget".to_owned()).is_active());
}

#[test]
fn fully_open_date_range_is_inert() {
    assert!(!FilterValue::DateRange { start: None, end: None }.is_active());
}

#[test]
fn single_ended_date_range_is_active() {
    let start = parse_date("2024-05-01");
    assert!(FilterValue::DateRange { start, end: None }.is_active());
}

#[test]
fn number_range_is_always_active() {
    assert!(FilterValue::number_range(1.0, 2.0).is_active());
}

// --- from_input ---

#[test]
fn text_input_becomes_text_filter() {
    let v = FilterValue::from_input(&text_col(), "  widget ");
    assert_eq!(v, Some(FilterValue::Text("widget".to_owned())));
}

#[test]
fn empty_input_clears() {
    assert_eq!(FilterValue::from_input(&text_col(), "   "), None);
}

#[test]
fn numeric_input_becomes_point_range() {
    let v = FilterValue::from_input(&number_col(), "42.5");
    assert_eq!(v, Some(FilterValue::NumberRange { min: 42.5, max: 42.5 }));
}

#[test]
fn non_numeric_input_on_number_column_clears() {
    assert_eq!(FilterValue::from_input(&number_col(), "abc"), None);
}

#[test]
fn date_input_becomes_point_range() {
    let v = FilterValue::from_input(&date_col(), "2024-05-01").unwrap();
    match v {
        FilterValue::DateRange { start, end } => {
            assert!(start.is_some());
            assert_eq!(start, end);
        }
        other => panic!("expected date range, got {other:?}"),
    }
}

// --- date parsing ---

#[test]
fn parse_date_accepts_rfc3339() {
    let d = parse_date("2024-05-01T12:30:00+02:00").unwrap();
    assert_eq!(d.to_rfc3339(), "2024-05-01T12:30:00+02:00");
}

#[test]
fn parse_date_accepts_bare_date_as_utc_midnight() {
    let d = parse_date("2024-05-01").unwrap();
    assert_eq!(d.to_rfc3339(), "2024-05-01T00:00:00+00:00");
}

#[test]
fn parse_date_rejects_garbage() {
    assert!(parse_date("yesterday").is_none());
}

// --- date_range / number_range constructors ---

#[test]
fn date_range_with_both_ends_unparseable_is_none() {
    assert_eq!(FilterValue::date_range("nope", ""), None);
}

#[test]
fn date_range_keeps_parseable_end_open_other() {
    let v = FilterValue::date_range("", "2024-06-30").unwrap();
    match v {
        FilterValue::DateRange { start, end } => {
            assert!(start.is_none());
            assert!(end.is_some());
        }
        other => panic!("expected date range, got {other:?}"),
    }
}

#[test]
fn number_range_normalizes_reversed_pair() {
    assert_eq!(
        FilterValue::number_range(9.0, 3.0),
        FilterValue::NumberRange { min: 3.0, max: 9.0 }
    );
}

// --- query_params ---

#[test]
fn text_filter_param_uses_bare_key() {
    let params = FilterValue::Text("widget".to_owned()).query_params("name");
    assert_eq!(params, vec![("name".to_owned(), "widget".to_owned())]);
}

#[test]
fn empty_text_filter_contributes_nothing() {
    assert!(FilterValue::Text(String::new()).query_params("name").is_empty());
}

#[test]
fn date_filter_params_are_start_end_rfc3339() {
    let v = FilterValue::date_range("2024-01-01", "2024-01-31").unwrap();
    let params = v.query_params("created");
    assert_eq!(params.len(), 2);
    assert_eq!(params[0].0, "created_start");
    assert_eq!(params[0].1, "2024-01-01T00:00:00+00:00");
    assert_eq!(params[1].0, "created_end");
}

#[test]
fn open_date_end_is_omitted() {
    let v = FilterValue::date_range("2024-01-01", "").unwrap();
    let params = v.query_params("created");
    assert_eq!(params.len(), 1);
    assert_eq!(params[0].0, "created_start");
}

#[test]
fn number_filter_params_are_min_max_decimal_text() {
    let params = FilterValue::number_range(2.0, 10.5).query_params("price");
    assert_eq!(
        params,
        vec![
            ("price_min".to_owned(), "2".to_owned()),
            ("price_max".to_owned(), "10.5".to_owned()),
        ]
    );
}

// --- from_params ---

#[test]
fn text_filter_round_trips_through_params() {
    let original = FilterValue::Text("widget".to_owned());
    let params = original.query_params("name");
    let get = |name: &str| -> Option<String> {
        params.iter().find(|(k, _)| k == name).map(|(_, v)| v.clone())
    };
    assert_eq!(FilterValue::from_params(&text_col(), &get), Some(original));
}

#[test]
fn number_filter_round_trips_through_params() {
    let original = FilterValue::number_range(2.0, 10.5);
    let params = original.query_params("price");
    let get = |name: &str| -> Option<String> {
        params.iter().find(|(k, _)| k == name).map(|(_, v)| v.clone())
    };
    assert_eq!(FilterValue::from_params(&number_col(), &get), Some(original));
}

#[test]
fn date_filter_round_trips_through_params() {
    let original = FilterValue::date_range("2024-01-01", "2024-01-31").unwrap();
    let params = original.query_params("created");
    let get = |name: &str| -> Option<String> {
        params.iter().find(|(k, _)| k == name).map(|(_, v)| v.clone())
    };
    assert_eq!(FilterValue::from_params(&date_col(), &get), Some(original));
}

#[test]
fn malformed_number_params_drop_the_filter() {
    let get = |name: &str| -> Option<String> {
        match name {
            "price_min" => Some("cheap".to_owned()),
            "price_max" => Some("10".to_owned()),
            _ => None,
        }
    };
    assert_eq!(FilterValue::from_params(&number_col(), &get), None);
}

#[test]
fn malformed_date_end_degrades_to_open() {
    let get = |name: &str| -> Option<String> {
        match name {
            "created_start" => Some("2024-01-01".to_owned()),
            "created_end" => Some("soon".to_owned()),
            _ => None,
        }
    };
    match FilterValue::from_params(&date_col(), &get) {
        Some(FilterValue::DateRange { start, end }) => {
            assert!(start.is_some());
            assert!(end.is_none());
        }
        other => panic!("expected date range, got {other:?}"),
    }
}
