//! Rendering: egui panels, charts, and the record table.
pub mod panels;
pub mod plot;
pub mod table;
