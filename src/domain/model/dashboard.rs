use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

/// One metric card: a preformatted value plus its month-over-month change in percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StatMetric {
    pub value: String,
    pub change: f64,
    pub trend: Trend,
}

impl StatMetric {
    pub fn new(value: impl Into<String>, change: f64, trend: Trend) -> Self {
        Self {
            value: value.into(),
            change,
            trend,
        }
    }

    /// `"+20.1%"` for upward trends, `"-4.5%"` for downward ones.
    pub fn change_label(&self) -> String {
        match self.trend {
            Trend::Up => format!("+{}%", self.change.abs()),
            Trend::Down => format!("-{}%", self.change.abs()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_revenue: StatMetric,
    pub total_sales: StatMetric,
    pub active_inventory: StatMetric,
    pub active_customers: StatMetric,
}

impl DashboardStats {
    /// Cards in display order, with their titles.
    pub fn cards(&self) -> [(&'static str, &StatMetric); 4] {
        [
            ("Total Revenue", &self.total_revenue),
            ("Total Sales", &self.total_sales),
            ("Active Inventory", &self.active_inventory),
            ("Active Customers", &self.active_customers),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SalesPoint {
    pub name: String,
    pub sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub sales_data: Vec<SalesPoint>,
}

/// Daily sales amount, as served by `/api/sales?days=N`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DailySales {
    pub date: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesTotal {
    pub total_sales: u64,
    pub total_revenue: f64,
    pub total_items_sold: u64,
    pub period: String,
}
