//! Duplicate Orders
//!
//! Two orders are duplicates when they share the customer's CPF, the total and the multiset of
//! `(product, quantity)` lines. The earliest order for a key is the original; every later one is
//! flagged. Flags are advisory: the orders service only marks the observation.

use std::collections::hash_map::Entry;

use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::orders::{Order, OrderId};

/// Prefix added to the observation of a flagged order.
pub const DUPLICATE_MARKER: &str = "[DUPLICADO] ";

/// Composite key identifying an order's content.
pub fn composite_key(order: &Order) -> String {
    let mut lines: SmallVec<[String; 8]> = order
        .items
        .iter()
        .map(|item| format!("{}:{}", item.product_id, item.quantity))
        .collect();

    lines.sort_unstable();

    format!(
        "{}|{}|{}",
        order.customer.national_id,
        order.total_price,
        lines.join(",")
    )
}

/// Orders that repeat an earlier order's composite key.
///
/// Orders are visited in ascending date order with a stable sort, so orders sharing a timestamp
/// keep the order they were given in.
pub fn find_duplicates(orders: &[Order]) -> FxHashSet<OrderId> {
    let mut chronological: Vec<&Order> = orders.iter().collect();
    chronological.sort_by_key(|order| order.date);

    let mut originals: FxHashMap<String, OrderId> = FxHashMap::default();
    let mut duplicates = FxHashSet::default();

    for order in chronological {
        match originals.entry(composite_key(order)) {
            Entry::Occupied(_) => {
                duplicates.insert(order.id);
            }
            Entry::Vacant(entry) => {
                entry.insert(order.id);
            }
        }
    }

    duplicates
}

/// Observation with the duplicate marker prepended, or `None` when it is already marked.
pub fn marked_observation(observation: &str) -> Option<String> {
    if observation.starts_with(DUPLICATE_MARKER) {
        None
    } else {
        Some(format!("{DUPLICATE_MARKER}{observation}"))
    }
}

/// Observation updates still needed for the flagged orders.
pub fn pending_annotations(
    orders: &[Order],
    duplicates: &FxHashSet<OrderId>,
) -> Vec<(OrderId, String)> {
    orders
        .iter()
        .filter(|order| duplicates.contains(&order.id))
        .filter_map(|order| marked_observation(&order.observation).map(|text| (order.id, text)))
        .collect()
}
