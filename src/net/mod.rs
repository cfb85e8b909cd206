//! Browser-side transport and location sync for the grid controller.

pub mod http;
