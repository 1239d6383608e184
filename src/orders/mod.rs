//! Order status management.
//!
//! The `orders` document (username → orders) is authoritative. The legacy
//! `orderHistory_<username>` documents some storefront builds keep are patched
//! on a best-effort basis; the history view offered here is derived from the
//! authoritative orders instead.

mod error;

pub use error::{OrderError, SyncWarning};

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::domain::{Order, OrderStatus, User};
use crate::store::{keys, KeyValueStore, Repository};

/// One order picked for a bulk status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSelection {
    pub order_id: String,
    pub username: String,
}

impl OrderSelection {
    pub fn new(order_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            username: username.into(),
        }
    }
}

/// A status transition that was applied and persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChange {
    pub order_id: String,
    pub username: String,
    pub previous: OrderStatus,
    pub status: OrderStatus,
    pub at: DateTime<Utc>,
}

/// An order as shown in the admin order table.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderView {
    pub username: String,
    pub customer_name: String,
    pub total: u64,
    pub pre_order: bool,
    pub order: Order,
}

/// Set the status of one order and stamp `updatedAt`.
///
/// # Errors
/// `UserNotFound` when `username` owns no orders, `NotFound` when the order is
/// not among them. Nothing is written in either case.
#[instrument(skip_all, fields(order_id = %order_id, username = %username, status = %status))]
pub fn set_order_status<S: KeyValueStore>(
    repo: &mut Repository<S>,
    order_id: &str,
    username: &str,
    status: OrderStatus,
    now: DateTime<Utc>,
) -> Result<StatusChange, OrderError> {
    let mut book = repo.orders()?;
    let user_orders = book
        .get_mut(username)
        .filter(|orders| !orders.is_empty())
        .ok_or_else(|| OrderError::UserNotFound(username.to_string()))?;
    let order = user_orders
        .iter_mut()
        .find(|order| order.id == order_id)
        .ok_or_else(|| OrderError::NotFound {
            order_id: order_id.to_string(),
            username: username.to_string(),
        })?;

    let previous = order.status;
    order.status = status;
    order.updated_at = Some(now);
    repo.save_orders(&book)?;
    info!(%previous, "Order status updated");

    match mirror_status(repo, username, order_id, status, now) {
        Ok(true) => debug!("History mirror synced"),
        Ok(false) => {}
        Err(warning) => warn!(%warning, "History mirror out of sync"),
    }

    Ok(StatusChange {
        order_id: order_id.to_string(),
        username: username.to_string(),
        previous,
        status,
        at: now,
    })
}

/// Apply one status to many orders; entries that fail are logged and skipped.
pub fn bulk_set_order_status<S: KeyValueStore>(
    repo: &mut Repository<S>,
    selections: &[OrderSelection],
    status: OrderStatus,
    now: DateTime<Utc>,
) -> Vec<StatusChange> {
    let mut changes = Vec::with_capacity(selections.len());
    for selection in selections {
        match set_order_status(repo, &selection.order_id, &selection.username, status, now) {
            Ok(change) => changes.push(change),
            Err(e) => warn!(
                order_id = %selection.order_id,
                username = %selection.username,
                error = %e,
                "Skipping order in bulk update"
            ),
        }
    }
    info!(requested = selections.len(), updated = changes.len(), %status, "Bulk status update finished");
    changes
}

/// Patch the legacy mirror document when it holds this order.
///
/// Returns `Ok(false)` when there is no mirror or it does not contain the order.
fn mirror_status<S: KeyValueStore>(
    repo: &mut Repository<S>,
    username: &str,
    order_id: &str,
    status: OrderStatus,
    now: DateTime<Utc>,
) -> Result<bool, SyncWarning> {
    let key = keys::order_history(username);
    let warning = |reason: String| SyncWarning {
        username: username.to_string(),
        reason,
    };

    let mut history: Vec<Value> = match repo.read(&key) {
        Ok(Some(history)) => history,
        Ok(None) => return Ok(false),
        Err(e) => return Err(warning(e.to_string())),
    };
    let Some(entry) = history
        .iter_mut()
        .find(|entry| entry.get("id").and_then(Value::as_str) == Some(order_id))
    else {
        return Ok(false);
    };
    let Some(fields) = entry.as_object_mut() else {
        return Err(warning(format!("entry for {order_id} is not an object")));
    };

    fields.insert("status".to_string(), Value::from(status.as_str()));
    fields.insert(
        "updatedAt".to_string(),
        Value::from(now.to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    repo.write(&key, &history).map_err(|e| warning(e.to_string()))?;
    Ok(true)
}

/// A user's orders, newest first, read from the authoritative collection.
pub fn order_history<S: KeyValueStore>(repo: &Repository<S>, username: &str) -> Result<Vec<Order>, OrderError> {
    let mut orders = repo.orders()?.remove(username).unwrap_or_default();
    orders.sort_by(|a, b| b.date.cmp(&a.date));
    Ok(orders)
}

/// Every order with its owner and computed total.
pub fn list_orders<S: KeyValueStore>(repo: &Repository<S>) -> Result<Vec<OrderView>, OrderError> {
    let users = repo.users()?;
    let book = repo.orders()?;

    let views = book
        .into_iter()
        .flat_map(|(username, orders)| {
            let customer_name = users
                .iter()
                .find(|user| user.username == username)
                .map_or_else(|| username.clone(), |user: &User| user.display_name().to_string());
            orders.into_iter().map(move |order| OrderView {
                username: username.clone(),
                customer_name: customer_name.clone(),
                total: order.total(),
                pre_order: order.is_pre_order(),
                order,
            })
        })
        .collect();
    Ok(views)
}
