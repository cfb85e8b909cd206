//! Leptos widgets wiring signals to the grid controller.

pub mod data_grid;

pub use data_grid::DataGrid;
