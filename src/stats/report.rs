use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::OrderStatus;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DashboardSummary {
    pub total_products: usize,
    pub total_orders: usize,
    pub total_customers: usize,
    /// Completed orders only.
    pub total_revenue: u64,
    pub pending_orders: usize,
    pub completed_orders: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyRevenue {
    pub year: i32,
    pub month: u32,
    pub revenue: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatusBreakdown {
    pub pending: usize,
    pub processing: usize,
    pub shipped: usize,
    pub completed: usize,
    pub cancelled: usize,
}

impl StatusBreakdown {
    pub fn count(&self, status: OrderStatus) -> usize {
        match status {
            OrderStatus::Pending => self.pending,
            OrderStatus::Processing => self.processing,
            OrderStatus::Shipped => self.shipped,
            OrderStatus::Completed => self.completed,
            OrderStatus::Cancelled => self.cancelled,
        }
    }

    pub(crate) fn record(&mut self, status: OrderStatus) {
        let slot = match status {
            OrderStatus::Pending => &mut self.pending,
            OrderStatus::Processing => &mut self.processing,
            OrderStatus::Shipped => &mut self.shipped,
            OrderStatus::Completed => &mut self.completed,
            OrderStatus::Cancelled => &mut self.cancelled,
        };
        *slot += 1;
    }

    pub fn total(&self) -> usize {
        OrderStatus::ALL.iter().map(|status| self.count(*status)).sum()
    }
}

/// Units and revenue sold under one product title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSales {
    pub title: String,
    pub quantity: u64,
    pub revenue: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerSummary {
    pub username: String,
    pub name: String,
    pub order_count: usize,
    /// Every order counts, whatever its status.
    pub total_spent: u64,
}

/// Comparison window for [`PeriodComparison`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    /// The trailing 7 calendar days against the 7 before them.
    Week,
    /// The current calendar month against the previous one.
    Month,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodComparison {
    pub current: u64,
    pub previous: u64,
    pub growth_percent: f64,
}

impl PeriodComparison {
    pub fn new(current: u64, previous: u64) -> Self {
        let growth_percent = if previous > 0 {
            (current as f64 - previous as f64) / previous as f64 * 100.0
        } else if current > 0 {
            100.0
        } else {
            0.0
        };
        Self {
            current,
            previous,
            growth_percent,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct InventorySummary {
    pub total_products: usize,
    pub in_stock: usize,
    pub low_stock: usize,
    pub out_of_stock: usize,
    /// Σ price × stock.
    pub total_value: u64,
}

/// Products attached to one category or brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub id: u64,
    pub label: String,
    pub product_count: usize,
}

/// Everything the dashboard and statistics pages show, computed at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub summary: DashboardSummary,
    pub revenue_last_7_days: Vec<DailyRevenue>,
    pub revenue_last_6_months: Vec<MonthlyRevenue>,
    pub status_breakdown: StatusBreakdown,
    pub top_products: Vec<ProductSales>,
    pub top_customers: Vec<CustomerSummary>,
    pub week_over_week: PeriodComparison,
    pub month_over_month: PeriodComparison,
    pub inventory: InventorySummary,
    pub categories: Vec<LabelCount>,
    pub brands: Vec<LabelCount>,
}
