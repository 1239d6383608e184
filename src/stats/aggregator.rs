use std::collections::HashMap;

use chrono::{DateTime, Datelike, Days, Months, NaiveDate, TimeZone};

use crate::domain::{Brand, Category, Order, OrderBook, OrderStatus, Product, User};
use crate::store::{KeyValueStore, Repository, StoreError};

use super::report::*;

/// Stock at or below this (and above zero) counts as low.
pub const LOW_STOCK_THRESHOLD: u32 = 5;

/// The collections the rollups read, loaded together.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub categories: Vec<Category>,
    pub brands: Vec<Brand>,
    pub products: Vec<Product>,
    pub orders: OrderBook,
    pub users: Vec<User>,
}

impl Snapshot {
    pub fn load<S: KeyValueStore>(repo: &Repository<S>) -> Result<Self, StoreError> {
        Ok(Self {
            categories: repo.categories()?,
            brands: repo.brands()?,
            products: repo.products()?,
            orders: repo.orders()?,
            users: repo.users()?,
        })
    }
}

/// Rollups over a [`Snapshot`] as seen at `now`.
///
/// Calendar days and months are those of `now`'s time zone, so an order placed
/// late in the evening counts for the viewer's day, not the UTC one.
pub struct Aggregator<'a, Tz: TimeZone> {
    snapshot: &'a Snapshot,
    now: DateTime<Tz>,
}

impl<'a, Tz: TimeZone> Aggregator<'a, Tz> {
    pub fn new(snapshot: &'a Snapshot, now: DateTime<Tz>) -> Self {
        Self { snapshot, now }
    }

    fn orders(&self) -> impl Iterator<Item = &'a Order> {
        self.snapshot.orders.values().flatten()
    }

    fn completed(&self) -> impl Iterator<Item = &'a Order> {
        self.orders().filter(|order| order.status.is_revenue())
    }

    fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    fn local_date(&self, order: &Order) -> NaiveDate {
        order.date.with_timezone(&self.now.timezone()).date_naive()
    }

    fn customers(&self) -> impl Iterator<Item = &'a User> {
        self.snapshot.users.iter().filter(|user| user.is_customer())
    }

    pub fn dashboard_summary(&self) -> DashboardSummary {
        let breakdown = self.order_status_breakdown();
        DashboardSummary {
            total_products: self.snapshot.products.len(),
            total_orders: self.snapshot.orders.values().map(Vec::len).sum(),
            total_customers: self.customers().count(),
            total_revenue: self.completed().map(Order::total).fold(0, u64::saturating_add),
            pending_orders: breakdown.pending,
            completed_orders: breakdown.completed,
        }
    }

    /// Completed revenue per calendar day for the trailing `days` days, oldest
    /// first and ending today. Days without sales are present with zero.
    ///
    /// A window reaching past the earliest representable date is clamped to it.
    pub fn revenue_series(&self, days: u32) -> Vec<DailyRevenue> {
        let mut by_day: HashMap<NaiveDate, u64> = HashMap::new();
        for order in self.completed() {
            let slot = by_day.entry(self.local_date(order)).or_default();
            *slot = slot.saturating_add(order.total());
        }

        if days == 0 {
            return Vec::new();
        }
        let today = self.today();
        let oldest = days_before(today, u64::from(days - 1));
        oldest
            .iter_days()
            .take_while(|date| *date <= today)
            .map(|date| DailyRevenue {
                date,
                revenue: by_day.get(&date).copied().unwrap_or(0),
            })
            .collect()
    }

    /// Completed revenue per calendar month for the trailing `months` months,
    /// oldest first and ending with the current month.
    ///
    /// Clamped the same way as [`Aggregator::revenue_series`].
    pub fn revenue_by_month(&self, months: u32) -> Vec<MonthlyRevenue> {
        let mut by_month: HashMap<(i32, u32), u64> = HashMap::new();
        for order in self.completed() {
            let date = self.local_date(order);
            let slot = by_month.entry((date.year(), date.month())).or_default();
            *slot = slot.saturating_add(order.total());
        }

        let first_of_month = month_start(self.today());
        let available = months_since_min(first_of_month).saturating_add(1);
        (0..months.min(available))
            .rev()
            .filter_map(|offset| first_of_month.checked_sub_months(Months::new(offset)))
            .map(|start| MonthlyRevenue {
                year: start.year(),
                month: start.month(),
                revenue: by_month.get(&(start.year(), start.month())).copied().unwrap_or(0),
            })
            .collect()
    }

    pub fn order_status_breakdown(&self) -> StatusBreakdown {
        let mut breakdown = StatusBreakdown::default();
        for order in self.orders() {
            breakdown.record(order.status);
        }
        breakdown
    }

    /// Best sellers by units over completed orders. Ties keep the order in
    /// which titles were first seen.
    pub fn top_products(&self, n: usize) -> Vec<ProductSales> {
        let mut sales: Vec<ProductSales> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for item in self.completed().flat_map(|order| order.items.iter()) {
            let slot = *index.entry(item.title.as_str()).or_insert_with(|| {
                sales.push(ProductSales {
                    title: item.title.clone(),
                    quantity: 0,
                    revenue: 0,
                });
                sales.len() - 1
            });
            sales[slot].quantity = sales[slot].quantity.saturating_add(u64::from(item.quantity));
            sales[slot].revenue = sales[slot].revenue.saturating_add(item.subtotal());
        }

        // Stable sort keeps first-seen order among equal quantities.
        sales.sort_by(|a, b| b.quantity.cmp(&a.quantity));
        sales.truncate(n);
        sales
    }

    /// Every customer with order count and spend across all statuses.
    pub fn customer_summaries(&self) -> Vec<CustomerSummary> {
        self.customers()
            .map(|user| {
                let orders = self
                    .snapshot
                    .orders
                    .get(&user.username)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                CustomerSummary {
                    username: user.username.clone(),
                    name: user.display_name().to_string(),
                    order_count: orders.len(),
                    total_spent: orders.iter().map(Order::total).fold(0, u64::saturating_add),
                }
            })
            .collect()
    }

    pub fn top_customers(&self, n: usize) -> Vec<CustomerSummary> {
        let mut customers = self.customer_summaries();
        customers.sort_by(|a, b| b.total_spent.cmp(&a.total_spent));
        customers.truncate(n);
        customers
    }

    pub fn period_over_period(&self, period: Period) -> PeriodComparison {
        let today = self.today();
        let (current, previous) = match period {
            Period::Week => {
                let current_start = days_before(today, 6);
                let previous_start = days_before(current_start, 7);
                (
                    self.revenue_between(current_start, today),
                    self.revenue_between(previous_start, days_before(current_start, 1)),
                )
            }
            Period::Month => {
                let current_start = month_start(today);
                let previous_start = current_start
                    .checked_sub_months(Months::new(1))
                    .unwrap_or(current_start);
                (
                    self.revenue_between(current_start, today),
                    self.revenue_between(previous_start, days_before(current_start, 1)),
                )
            }
        };
        PeriodComparison::new(current, previous)
    }

    /// Completed revenue for local dates in `[from, to]`.
    fn revenue_between(&self, from: NaiveDate, to: NaiveDate) -> u64 {
        self.completed()
            .filter(|order| {
                let date = self.local_date(order);
                from <= date && date <= to
            })
            .map(Order::total)
            .fold(0, u64::saturating_add)
    }

    pub fn inventory_summary(&self) -> InventorySummary {
        let products = &self.snapshot.products;
        InventorySummary {
            total_products: products.len(),
            in_stock: products.iter().filter(|p| p.stock > LOW_STOCK_THRESHOLD).count(),
            low_stock: products
                .iter()
                .filter(|p| p.stock > 0 && p.stock <= LOW_STOCK_THRESHOLD)
                .count(),
            out_of_stock: products.iter().filter(|p| p.stock == 0).count(),
            total_value: products
                .iter()
                .map(Product::inventory_value)
                .fold(0, u64::saturating_add),
        }
    }

    pub fn category_product_counts(&self) -> Vec<LabelCount> {
        self.snapshot
            .categories
            .iter()
            .map(|category| LabelCount {
                id: category.id,
                label: category.name.clone(),
                product_count: self
                    .snapshot
                    .products
                    .iter()
                    .filter(|p| p.category == category.value)
                    .count(),
            })
            .collect()
    }

    pub fn brand_product_counts(&self) -> Vec<LabelCount> {
        self.snapshot
            .brands
            .iter()
            .map(|brand| LabelCount {
                id: brand.id,
                label: brand.name.clone(),
                product_count: self.snapshot.products.iter().filter(|p| p.brand == brand.name).count(),
            })
            .collect()
    }

    pub fn report(&self) -> DashboardReport {
        DashboardReport {
            summary: self.dashboard_summary(),
            revenue_last_7_days: self.revenue_series(7),
            revenue_last_6_months: self.revenue_by_month(6),
            status_breakdown: self.order_status_breakdown(),
            top_products: self.top_products(5),
            top_customers: self.top_customers(5),
            week_over_week: self.period_over_period(Period::Week),
            month_over_month: self.period_over_period(Period::Month),
            inventory: self.inventory_summary(),
            categories: self.category_product_counts(),
            brands: self.brand_product_counts(),
        }
    }
}

fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// `date` minus `n` days, saturating at [`NaiveDate::MIN`].
fn days_before(date: NaiveDate, n: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(n)).unwrap_or(NaiveDate::MIN)
}

/// Whole months between the month of [`NaiveDate::MIN`] and that of `date`.
fn months_since_min(date: NaiveDate) -> u32 {
    let min = NaiveDate::MIN;
    let months = i64::from(date.year() - min.year()) * 12 + i64::from(date.month()) - i64::from(min.month());
    u32::try_from(months).unwrap_or(u32::MAX)
}
