//! Seed data for the mock backend and fallback constants for offline dashboards.

use super::dashboard::{ChartData, DailySales, DashboardStats, SalesPoint, SalesTotal, StatMetric, Trend};
use super::stock::{StockItem, StockStatus};

#[allow(clippy::too_many_arguments)]
fn seed(
    id: &str,
    name: &str,
    category: &str,
    supplier: (&str, &str),
    cost: f64,
    price: f64,
    quantity: u32,
    last_updated: &str,
    status: StockStatus,
) -> StockItem {
    StockItem {
        id: id.to_string(),
        name: name.to_string(),
        category: Some(category.to_string()),
        supplier: Some(supplier.0.to_string()),
        supplier_id: Some(supplier.1.to_string()),
        cost: Some(cost),
        price,
        quantity,
        status: Some(status),
        last_updated: Some(last_updated.to_string()),
    }
}

/// The inventory the mock backend starts with.
pub fn seed_inventory() -> Vec<StockItem> {
    use StockStatus::*;

    let techgear = ("TechGear Inc.", "SUP001");
    let comfort = ("Comfort Furnishings", "SUP002");
    let fashion = ("Fashion Forward", "SUP003");
    let soundwave = ("SoundWave Audio", "SUP004");
    let home = ("HomeEssentials", "SUP005");
    let readmore = ("ReadMore Publishing", "SUP006");

    vec![
        seed("INV001", "Wireless Headphones", "Electronics", techgear, 89.99, 109.99, 24, "2025-04-18 10:15:00", InStock),
        seed("INV002", "Office Chair", "Furniture", comfort, 149.99, 179.99, 3, "2025-04-17 14:42:00", InStock),
        seed("INV003", "Smartphone", "Electronics", techgear, 599.99, 719.99, 8, "2025-04-16 09:30:00", InStock),
        seed("INV004", "Cotton T-Shirt", "Clothing", fashion, 19.99, 24.99, 45, "2025-04-15 13:00:00", InStock),
        seed("INV005", "Desk Lamp", "Furniture", comfort, 34.99, 44.99, 18, "2025-04-14 08:10:00", InStock),
        seed("INV006", "Bluetooth Speaker", "Electronics", soundwave, 79.99, 99.99, 0, "2025-04-13 11:45:00", OutOfStock),
        seed("INV007", "Denim Jeans", "Clothing", fashion, 49.99, 64.99, 32, "2025-04-12 17:20:00", InStock),
        seed("INV008", "Coffee Maker", "Kitchen", home, 129.99, 159.99, 5, "2025-04-11 10:00:00", LowStock),
        seed("INV009", "Bestselling Novel", "Books", readmore, 24.99, 29.99, 22, "2025-04-10 15:55:00", InStock),
        seed("INV010", "Stainless Steel Cookware Set", "Kitchen", home, 199.99, 249.99, 3, "2025-04-09 12:25:00", LowStock),
    ]
}

pub fn fallback_stats() -> DashboardStats {
    DashboardStats {
        total_revenue: StatMetric::new("$45,231.89", 20.1, Trend::Up),
        total_sales: StatMetric::new("+2350", 18.2, Trend::Up),
        active_inventory: StatMetric::new("573", -4.5, Trend::Down),
        active_customers: StatMetric::new("1,429", 10.1, Trend::Up),
    }
}

pub fn fallback_charts() -> ChartData {
    let week = [
        ("Mon", 4000.0),
        ("Tue", 3000.0),
        ("Wed", 2000.0),
        ("Thu", 2780.0),
        ("Fri", 1890.0),
        ("Sat", 2390.0),
        ("Sun", 3490.0),
    ];
    ChartData {
        sales_data: week
            .iter()
            .map(|(name, sales)| SalesPoint {
                name: name.to_string(),
                sales: *sales,
            })
            .collect(),
    }
}

/// Fifteen days of daily sales, oldest first.
pub fn daily_sales() -> Vec<DailySales> {
    let amounts = [
        4200.0, 3800.0, 4100.0, 3600.0, 3900.0, 4500.0, 5200.0, 4800.0, 5100.0, 4700.0, 4300.0,
        4600.0, 5000.0, 5300.0, 5500.0,
    ];
    amounts
        .iter()
        .enumerate()
        .map(|(i, amount)| DailySales {
            date: format!("2023-04-{:02}", i + 1),
            amount: *amount,
        })
        .collect()
}

/// The last `days` points of `daily_sales()`. `0` returns the whole series.
pub fn recent_daily_sales(days: u32) -> Vec<DailySales> {
    let all = daily_sales();
    if days == 0 {
        return all;
    }
    let skip = all.len().saturating_sub(days as usize);
    all.into_iter().skip(skip).collect()
}

pub fn fallback_sales_total(period: Option<&str>) -> SalesTotal {
    SalesTotal {
        total_sales: 156,
        total_revenue: 45231.89,
        total_items_sold: 2350,
        period: period.unwrap_or("all-time").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recent_daily_sales_takes_the_tail() {
        let last3 = recent_daily_sales(3);
        let dates: Vec<&str> = last3.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(dates, vec!["2023-04-13", "2023-04-14", "2023-04-15"]);
        assert_eq!(recent_daily_sales(100).len(), 15);
    }

    #[test]
    fn zero_days_returns_the_whole_series() {
        assert_eq!(recent_daily_sales(0), daily_sales());
    }
}
