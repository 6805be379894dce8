//! Display projection: what the board screen shows for an order right now.
//!
//! Pure functions of `(order, now)`. Nothing here is cached; the display is
//! expected to project again on every tick.

use crate::broadcast::BoardSnapshot;
use crate::clock::{Timestamp, MINUTE_MS};
use crate::model::Order;
use serde::Serialize;

const NORMAL_ABOVE_MS: i64 = 25 * MINUTE_MS;
const WARNING_ABOVE_MS: i64 = 5 * MINUTE_MS;

/// Presentation tier for the time left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    /// More than 25 minutes left.
    Normal,
    /// More than 5 and at most 25 minutes left.
    Warning,
    /// 5 minutes or less, including overdue.
    Critical,
}

impl Urgency {
    pub fn for_remaining(remaining_ms: i64) -> Self {
        if remaining_ms > NORMAL_ABOVE_MS {
            Urgency::Normal
        } else if remaining_ms > WARNING_ABOVE_MS {
            Urgency::Warning
        } else {
            Urgency::Critical
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Projection {
    pub remaining_ms: i64,
    pub urgency: Urgency,
    pub visible: bool,
}

pub fn project(order: &Order, now: Timestamp) -> Projection {
    let remaining_ms = (order.ends_at - now).max(0);
    Projection {
        remaining_ms,
        urgency: Urgency::for_remaining(remaining_ms),
        visible: order.expires_at > now,
    }
}

/// `MM:SS` countdown, whole seconds rounded down. Minutes are not capped at 59.
pub fn format_countdown(remaining_ms: i64) -> String {
    let seconds = remaining_ms.max(0) / 1_000;
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// One row of the board screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedOrder {
    #[serde(flatten)]
    pub order: Order,
    #[serde(flatten)]
    pub projection: Projection,
    pub countdown: String,
}

/// Projects every visible order of `snapshot`, keeping the snapshot order.
pub fn project_all(snapshot: &BoardSnapshot, now: Timestamp) -> Vec<ProjectedOrder> {
    snapshot
        .orders
        .iter()
        .filter_map(|order| {
            let projection = project(order, now);
            projection.visible.then(|| ProjectedOrder {
                order: order.clone(),
                projection,
                countdown: format_countdown(projection.remaining_ms),
            })
        })
        .collect()
}
