//! Company metrics and their chart series.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRevenueExpense {
    /// `YYYY-MM`.
    pub year_month: String,
    #[serde(default)]
    pub total_revenues: f64,
    #[serde(default)]
    pub total_expenses: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartSeries {
    TotalRevenues,
    TotalExpenses,
}

impl ChartSeries {
    pub fn label(self) -> &'static str {
        match self {
            ChartSeries::TotalRevenues => "Receitas",
            ChartSeries::TotalExpenses => "Despesas",
        }
    }
}

/// One point of the revenue/expense area chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub year_month: String,
    pub value: f64,
    pub category: ChartSeries,
}

/// Splits every month into a revenue point followed by an expense point.
pub fn to_chart_points(metrics: &[MonthlyRevenueExpense]) -> Vec<ChartPoint> {
    metrics
        .iter()
        .flat_map(|month| {
            [
                ChartPoint {
                    year_month: month.year_month.clone(),
                    value: month.total_revenues,
                    category: ChartSeries::TotalRevenues,
                },
                ChartPoint {
                    year_month: month.year_month.clone(),
                    value: month.total_expenses,
                    category: ChartSeries::TotalExpenses,
                },
            ]
        })
        .collect()
}
