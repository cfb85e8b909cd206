//! The remote data grid widget.
//!
//! A thin reactive shell over [`DataGridCore`]: raw input goes through the
//! debounced commit gate, committed transitions fan out to the location bar
//! and the fetch transport, and the view renders whatever page the core
//! currently holds. All browser-only work (timers, HTTP, history) is gated
//! behind `hydrate`, so the same component server-renders an empty shell.

use leptos::prelude::*;

use crate::grid::{
    ColumnDescriptor, ColumnType, CommitGate, DataGridCore, FetchConfig, FilterValue, GateInput,
    SelectionMode, StateChange,
};

/// Remote data grid over a paginated, filterable, sortable endpoint.
///
/// `columns` declares what to render and which capabilities each column has;
/// `config` says where and how to fetch; `row_key` names the field whose
/// value identifies a row across pages.
#[component]
pub fn DataGrid(
    columns: Vec<ColumnDescriptor>,
    config: FetchConfig,
    row_key: String,
    #[prop(optional)] page_size: Option<u32>,
    #[prop(optional)] selection_mode: Option<SelectionMode>,
) -> impl IntoView {
    let mut grid = DataGridCore::new(columns, config, row_key);
    if let Some(size) = page_size {
        grid = grid.with_page_size(size);
    }
    if let Some(mode) = selection_mode {
        grid = grid.with_selection_mode(mode);
    }
    let core = RwSignal::new(grid);
    let gate = RwSignal::new(CommitGate::new());

    // Adopt the shared URL and load the first page once the browser is up.
    Effect::new(move || {
        let query = crate::net::http::current_location_query();
        core.update(|c| c.apply_location_query(&query));
        spawn_fetch(core);
    });

    let on_search = move |ev| {
        schedule_commit(core, gate, GateInput::Search(event_target_value(&ev)));
    };

    let on_filter = Callback::new(move |(column, value): (String, Option<FilterValue>)| {
        schedule_commit(core, gate, GateInput::Filter { column, value });
    });

    let on_sort = move |key: String| {
        let change = core.try_update(|c| c.toggle_sort(&key)).unwrap_or(StateChange::None);
        fan_out(core, change);
    };

    let on_page = move |page: u32| {
        let change = core.try_update(|c| c.set_page(page)).unwrap_or(StateChange::None);
        fan_out(core, change);
    };

    let on_page_size = move |ev| {
        let Ok(size) = event_target_value(&ev).parse::<u32>() else { return };
        let change = core.try_update(|c| c.set_page_size(size)).unwrap_or(StateChange::None);
        fan_out(core, change);
    };

    let visible = move || {
        core.with(|c| {
            c.columns
                .iter()
                .filter(|col| c.query.is_visible(&col.key))
                .cloned()
                .collect::<Vec<_>>()
        })
    };
    let any_filterable = move || core.with(|c| c.columns.iter().any(|col| col.filterable));

    view! {
        <div class="data-grid">
            <div class="data-grid__toolbar">
                <input
                    class="data-grid__search"
                    type="search"
                    placeholder="Search..."
                    on:input=on_search
                />
                <ColumnPicker core=core/>
            </div>

            {move || {
                core.with(|c| c.error.clone())
                    .map(|message| view! { <div class="data-grid__error">{message}</div> })
            }}

            <table class="data-grid__table">
                <thead>
                    <tr>
                        <th class="data-grid__select-col">
                            <input
                                type="checkbox"
                                prop:checked=move || core.with(DataGridCore::page_fully_selected)
                                on:change=move |ev| {
                                    let checked = event_target_checked(&ev);
                                    core.update(|c| {
                                        c.select_all(checked);
                                    });
                                }
                            />
                        </th>
                        <For
                            each=visible
                            key=|col| col.key.clone()
                            children=move |col: ColumnDescriptor| {
                                let key = col.key.clone();
                                let sort_key = key.clone();
                                let indicator = move || sort_indicator(core, &key);
                                view! {
                                    <th
                                        class=("data-grid__sortable", col.sortable)
                                        on:click=move |_| on_sort(sort_key.clone())
                                    >
                                        {col.label.clone()}
                                        <span class="data-grid__sort-indicator">{indicator}</span>
                                    </th>
                                }
                            }
                        />
                    </tr>
                    <Show when=any_filterable>
                        <tr class="data-grid__filters">
                            <th></th>
                            <For
                                each=visible
                                key=|col| col.key.clone()
                                children=move |col: ColumnDescriptor| {
                                    view! { <th><FilterCell core=core column=col on_filter=on_filter/></th> }
                                }
                            />
                        </tr>
                    </Show>
                </thead>
                <tbody>
                    {move || {
                        core.with(|c| {
                            c.rows
                                .iter()
                                .map(|row| {
                                    let id = c.row_id(row).unwrap_or_default();
                                    let selected = c.selection.is_selected(&id);
                                    let cells = c
                                        .columns
                                        .iter()
                                        .filter(|col| c.query.is_visible(&col.key))
                                        .map(|col| cell_text(row, &col.key))
                                        .collect::<Vec<_>>();
                                    (id, selected, cells)
                                })
                                .collect::<Vec<_>>()
                        })
                            .into_iter()
                            .map(|(id, selected, cells)| {
                                view! {
                                    <tr class=("data-grid__row--selected", selected)>
                                        <td class="data-grid__select-col">
                                            <input
                                                type="checkbox"
                                                prop:checked=selected
                                                on:change=move |ev| {
                                                    let checked = event_target_checked(&ev);
                                                    core.update(|c| {
                                                        c.select_row(&id, checked);
                                                    });
                                                }
                                            />
                                        </td>
                                        {cells.into_iter().map(|text| view! { <td>{text}</td> }).collect::<Vec<_>>()}
                                    </tr>
                                }
                            })
                            .collect::<Vec<_>>()
                    }}
                </tbody>
            </table>

            <div class="data-grid__footer">
                <button
                    class="btn"
                    disabled=move || core.with(|c| c.query.page <= 1)
                    on:click=move |_| {
                        let page = core.with_untracked(|c| c.query.page.saturating_sub(1));
                        on_page(page);
                    }
                >
                    "Prev"
                </button>
                <span class="data-grid__page-label">
                    {move || {
                        core.with(|c| {
                            format!("Page {} of {} — {} records", c.effective_page(), c.page_count(), c.total)
                        })
                    }}
                </span>
                <button
                    class="btn"
                    disabled=move || core.with(|c| u64::from(c.query.page) >= c.page_count())
                    on:click=move |_| {
                        let page = core.with_untracked(|c| c.query.page + 1);
                        on_page(page);
                    }
                >
                    "Next"
                </button>
                <select class="data-grid__page-size" on:change=on_page_size>
                    <option value="10">"10"</option>
                    <option value="25">"25"</option>
                    <option value="50">"50"</option>
                    <option value="100">"100"</option>
                </select>
                <Show when=move || core.with(|c| c.loading)>
                    <span class="data-grid__loading">"Loading..."</span>
                </Show>
            </div>
        </div>
    }
}

/// Checkbox list toggling column visibility. A `View` change only rewrites
/// the location bar; the loaded page stays put.
#[component]
fn ColumnPicker(core: RwSignal<DataGridCore>) -> impl IntoView {
    let all = move || core.with(|c| c.columns.clone());
    view! {
        <details class="data-grid__column-picker">
            <summary>"Columns"</summary>
            <For
                each=all
                key=|col| col.key.clone()
                children=move |col: ColumnDescriptor| {
                    let key = col.key.clone();
                    let toggle_key = col.key.clone();
                    view! {
                        <label class="data-grid__column-option">
                            <input
                                type="checkbox"
                                prop:checked=move || core.with(|c| c.query.is_visible(&key))
                                on:change=move |_| {
                                    let change = core
                                        .try_update(|c| c.toggle_column_visibility(&toggle_key))
                                        .unwrap_or(StateChange::None);
                                    fan_out(core, change);
                                }
                            />
                            {col.label.clone()}
                        </label>
                    }
                }
            />
        </details>
    }
}

/// One column's filter input(s), shaped by the declared column type.
#[component]
fn FilterCell(
    core: RwSignal<DataGridCore>,
    column: ColumnDescriptor,
    on_filter: Callback<(String, Option<FilterValue>)>,
) -> impl IntoView {
    if !column.filterable {
        return ().into_any();
    }
    match column.column_type {
        ColumnType::Number => {
            let key = column.key.clone();
            let stat_key = column.key.clone();
            let min_raw = RwSignal::new(String::new());
            let max_raw = RwSignal::new(String::new());
            let emit = move || {
                let (min, max) = (min_raw.get_untracked(), max_raw.get_untracked());
                let value = match (min.trim().parse::<f64>(), max.trim().parse::<f64>()) {
                    (Ok(a), Ok(b)) => Some(FilterValue::number_range(a, b)),
                    (Ok(a), Err(_)) => Some(FilterValue::number_range(a, a)),
                    (Err(_), Ok(b)) => Some(FilterValue::number_range(b, b)),
                    (Err(_), Err(_)) => None,
                };
                on_filter.run((key.clone(), value));
            };
            let emit_min = emit.clone();
            let bounds = move |end: bool| {
                core.with(|c| {
                    crate::grid::stats::find(&c.stats, &stat_key)
                        .map(|s| format!("{}", if end { s.max } else { s.min }))
                        .unwrap_or_default()
                })
            };
            let bounds_max = bounds.clone();
            view! {
                <span class="data-grid__range-filter">
                    <input
                        type="number"
                        placeholder=move || bounds(false)
                        on:input=move |ev| {
                            min_raw.set(event_target_value(&ev));
                            emit_min();
                        }
                    />
                    <input
                        type="number"
                        placeholder=move || bounds_max(true)
                        on:input=move |ev| {
                            max_raw.set(event_target_value(&ev));
                            emit();
                        }
                    />
                </span>
            }
            .into_any()
        }
        ColumnType::Date => {
            let key = column.key.clone();
            let start_raw = RwSignal::new(String::new());
            let end_raw = RwSignal::new(String::new());
            let emit = move || {
                let value =
                    FilterValue::date_range(&start_raw.get_untracked(), &end_raw.get_untracked());
                on_filter.run((key.clone(), value));
            };
            let emit_start = emit.clone();
            view! {
                <span class="data-grid__range-filter">
                    <input
                        type="date"
                        on:input=move |ev| {
                            start_raw.set(event_target_value(&ev));
                            emit_start();
                        }
                    />
                    <input
                        type="date"
                        on:input=move |ev| {
                            end_raw.set(event_target_value(&ev));
                            emit();
                        }
                    />
                </span>
            }
            .into_any()
        }
        ColumnType::Text | ColumnType::Custom => {
            let column = column.clone();
            view! {
                <input
                    type="text"
                    placeholder="Filter..."
                    on:input=move |ev| {
                        let raw = event_target_value(&ev);
                        on_filter.run((column.key.clone(), FilterValue::from_input(&column, &raw)));
                    }
                />
            }
            .into_any()
        }
    }
}

/// `▲` / `▼` for the active sort column, empty otherwise.
fn sort_indicator(core: RwSignal<DataGridCore>, key: &str) -> &'static str {
    core.with(|c| {
        if c.query.sort_column.as_deref() == Some(key) {
            match c.query.sort_direction {
                crate::grid::SortDirection::Asc => "\u{25b2}",
                crate::grid::SortDirection::Desc => "\u{25bc}",
            }
        } else {
            ""
        }
    })
}

/// Display text for one cell of an open-record row.
fn cell_text(row: &serde_json::Value, key: &str) -> String {
    match row.get(key) {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        Some(serde_json::Value::Bool(b)) => b.to_string(),
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

// --- Fan-out: committed transitions → URL bar + fetch ---

/// Route a transition's [`StateChange`] to its consumers. `Query` re-fetches
/// and rewrites the location string; `View` only rewrites the location
/// string; selection changes touch neither.
fn fan_out(core: RwSignal<DataGridCore>, change: StateChange) {
    match change {
        StateChange::Query => {
            crate::net::http::replace_location_query(&core.with_untracked(DataGridCore::location_query));
            spawn_fetch(core);
        }
        StateChange::View => {
            crate::net::http::replace_location_query(&core.with_untracked(DataGridCore::location_query));
        }
        StateChange::Selection | StateChange::None => {}
    }
}

/// Push raw input through the commit gate and arm its window.
#[cfg(feature = "hydrate")]
fn schedule_commit(core: RwSignal<DataGridCore>, gate: RwSignal<CommitGate>, input: GateInput) {
    let Some(ticket) = gate.try_update(|g| g.submit(input)).flatten() else {
        return;
    };
    let window = gate.with_untracked(CommitGate::window_ms);
    gloo_timers::callback::Timeout::new(window, move || {
        let Some(value) = gate.try_update(|g| g.fire(&ticket)).flatten() else {
            return;
        };
        let change = core
            .try_update(|c| match value {
                GateInput::Search(term) => c.set_search(term),
                GateInput::Filter { column, value } => c.set_filter(&column, value),
            })
            .unwrap_or(StateChange::None);
        fan_out(core, change);
    })
    .forget();
}

#[cfg(not(feature = "hydrate"))]
fn schedule_commit(_core: RwSignal<DataGridCore>, _gate: RwSignal<CommitGate>, _input: GateInput) {}

/// Issue the fetch for the committed state and reconcile its response,
/// discarding it if a newer request has been stamped since.
#[cfg(feature = "hydrate")]
fn spawn_fetch(core: RwSignal<DataGridCore>) {
    let Some((seq, url)) = core.try_update(DataGridCore::begin_request) else {
        return;
    };
    let headers = core.with_untracked(|c| c.config.headers.clone());
    leptos::task::spawn_local(async move {
        let outcome = crate::net::http::fetch_json(&url, &headers).await;
        if let Err(err) = &outcome {
            leptos::logging::warn!("grid fetch failed: {err}");
        }
        core.update(|c| {
            if !c.apply_response(seq, outcome) {
                leptos::logging::log!("discarded stale grid response (seq {seq})");
            }
        });
    });
}

#[cfg(not(feature = "hydrate"))]
fn spawn_fetch(_core: RwSignal<DataGridCore>) {}
