//! Page data of the dashboard, including the monthly chart geometry.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::domain::project::ProjectSummary;
use crate::domain::report::{CategoryExecution, MonthlyTotals};
use crate::domain::types::ProjectId;
use crate::format::{format_brl, format_percent, month_label};

const CHART_HEIGHT: f64 = 240.0;
const PLOT_TOP: f64 = 12.0;
const PLOT_HEIGHT: f64 = 196.0;
const PLOT_LEFT: f64 = 104.0;
const PLOT_RIGHT: f64 = 12.0;
const GROUP_WIDTH: f64 = 64.0;
const BAR_WIDTH: f64 = 22.0;
const BAR_GAP: f64 = 4.0;
const TICK_COUNT: u32 = 4;

#[derive(Debug, Serialize)]
pub struct ProjectOption {
    pub id: ProjectId,
    pub label: String,
    pub selected: bool,
}

/// Summary cards of the selected project, already formatted as currency.
#[derive(Debug, Serialize)]
pub struct ProjectCards {
    pub name: String,
    pub total_planned: String,
    pub total_executed: String,
    pub total_inflow: String,
    pub planned_balance: String,
}

impl From<&ProjectSummary> for ProjectCards {
    fn from(summary: &ProjectSummary) -> Self {
        Self {
            name: summary.display_label(),
            total_planned: format_brl(summary.total_planned),
            total_executed: format_brl(summary.total_executed),
            total_inflow: format_brl(summary.total_inflow),
            planned_balance: format_brl(summary.planned_balance),
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ChartBar {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Tooltip text, e.g. `Entradas jan/25: R$ 1.000,00`.
    pub title: String,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ChartMonth {
    pub label: String,
    pub label_x: f64,
    pub inflow: ChartBar,
    pub outflow: ChartBar,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct ChartTick {
    pub y: f64,
    pub label: String,
}

/// Inline SVG bar chart of monthly inflow and outflow.
#[derive(Debug, Serialize)]
pub struct MonthlyChart {
    pub width: f64,
    pub height: f64,
    pub plot_left: f64,
    pub plot_right: f64,
    pub baseline_y: f64,
    pub label_y: f64,
    pub months: Vec<ChartMonth>,
    pub ticks: Vec<ChartTick>,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

impl MonthlyChart {
    pub fn new(rows: &[MonthlyTotals]) -> Self {
        let peak = rows
            .iter()
            .flat_map(|row| [row.inflow, row.outflow])
            .fold(Decimal::ZERO, Decimal::max);
        let baseline_y = PLOT_TOP + PLOT_HEIGHT;

        let bar = |x: f64, value: Decimal, title: String| {
            let height = if value > Decimal::ZERO {
                let share = (value / peak).to_f64().unwrap_or_default();
                round1(share * PLOT_HEIGHT)
            } else {
                0.0
            };
            ChartBar {
                x: round1(x),
                y: round1(baseline_y - height),
                width: BAR_WIDTH,
                height,
                title,
            }
        };

        let months = rows
            .iter()
            .enumerate()
            .map(|(index, row)| {
                let label = month_label(row.month);
                let group_x = PLOT_LEFT + index as f64 * GROUP_WIDTH;
                let first_bar_x = group_x + (GROUP_WIDTH - 2.0 * BAR_WIDTH - BAR_GAP) / 2.0;
                ChartMonth {
                    inflow: bar(
                        first_bar_x,
                        row.inflow,
                        format!("Entradas {label}: {}", format_brl(row.inflow)),
                    ),
                    outflow: bar(
                        first_bar_x + BAR_WIDTH + BAR_GAP,
                        row.outflow,
                        format!("Saídas {label}: {}", format_brl(row.outflow)),
                    ),
                    label_x: round1(group_x + GROUP_WIDTH / 2.0),
                    label,
                }
            })
            .collect();

        let ticks = (0..=TICK_COUNT)
            .map(|step| {
                let fraction = f64::from(step) / f64::from(TICK_COUNT);
                ChartTick {
                    y: round1(baseline_y - fraction * PLOT_HEIGHT),
                    label: format_brl(peak * Decimal::from(step) / Decimal::from(TICK_COUNT)),
                }
            })
            .collect();

        let width = PLOT_LEFT + rows.len().max(1) as f64 * GROUP_WIDTH + PLOT_RIGHT;

        Self {
            width,
            height: CHART_HEIGHT,
            plot_left: PLOT_LEFT,
            plot_right: width - PLOT_RIGHT,
            baseline_y,
            label_y: baseline_y + 20.0,
            months,
            ticks,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct CategoryRow {
    pub category: String,
    pub planned: String,
    pub executed: String,
    pub balance: String,
    pub execution_percent: String,
}

impl From<&CategoryExecution> for CategoryRow {
    fn from(row: &CategoryExecution) -> Self {
        Self {
            category: row.category.clone(),
            planned: format_brl(row.planned),
            executed: format_brl(row.executed),
            balance: format_brl(row.balance),
            execution_percent: format_percent(row.execution_percent),
        }
    }
}

/// Data required to render the dashboard template.
#[derive(Debug, Serialize)]
pub struct DashboardPageData {
    pub projects: Vec<ProjectOption>,
    pub projects_loading: bool,
    /// Cards of the selected project; `None` when no project is available.
    pub current: Option<ProjectCards>,
    pub chart: MonthlyChart,
    pub monthly_loading: bool,
    pub monthly_empty: bool,
    pub categories: Vec<CategoryRow>,
    pub categories_loading: bool,
    pub categories_empty: bool,
}
