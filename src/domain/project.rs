use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::types::ProjectId;

/// Project as listed in filter dropdowns.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub base_year: i32,
}

/// Pre-aggregated project figures supplied by `vw_resumo_projetos`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ProjectSummary {
    pub project_id: ProjectId,
    pub name: String,
    pub base_year: i32,
    pub program_line: Option<String>,
    pub total_planned: Decimal,
    /// Sum of outflows.
    pub total_executed: Decimal,
    pub total_inflow: Decimal,
    /// Planned minus executed.
    pub planned_balance: Decimal,
}

impl ProjectSummary {
    /// Label used by the project selector: `name • year • line`.
    pub fn display_label(&self) -> String {
        match self.program_line.as_deref().filter(|line| !line.is_empty()) {
            Some(line) => format!("{} • {} • {line}", self.name, self.base_year),
            None => format!("{} • {}", self.name, self.base_year),
        }
    }
}
