//! Datalens: turn raw delimited tables into labeled-instance JSON documents
//! and view the resulting MNIST-style datasets (sample digit grid plus a
//! per-pixel importance heatmap).
//!
//! The crate ships two binaries backed by this library:
//! * `normalize` – batch CLI that converts a CSV into `<name>.json` and
//!   `<name>_labels.json`
//! * `datalens`  – viewer for the produced documents, with a headless
//!   PNG-export mode

pub mod app;
pub mod color;
pub mod data;
pub mod render;
pub mod state;
pub mod ui;
