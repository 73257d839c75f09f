//! Domain aggregates exposed by the finance service layer.

pub mod category;
pub mod movement;
pub mod project;
pub mod report;
pub mod types;
