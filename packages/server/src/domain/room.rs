//! Domain logic for room-level broadcast decisions.
//!
//! This module contains pure functions that implement business logic
//! without side effects, making them easy to test.

use super::{ConnectionRecord, EndpointId};

/// Find the connection record for an endpoint within a room listing.
///
/// # Arguments
///
/// * `records` - All connection records of the room
/// * `endpoint_id` - The endpoint to look up
///
/// # Returns
///
/// The matching record, or `None` if the endpoint is not in the room
pub fn find_record<'a>(
    records: &'a [ConnectionRecord],
    endpoint_id: &EndpointId,
) -> Option<&'a ConnectionRecord> {
    records.iter().find(|r| &r.endpoint_id == endpoint_id)
}

/// Check whether an endpoint holds creator privilege in a room listing.
///
/// Evaluated fresh on every broadcast request; there is no cached
/// privilege token.
///
/// # Arguments
///
/// * `records` - All connection records of the room
/// * `endpoint_id` - The endpoint originating the broadcast
///
/// # Returns
///
/// `true` if the endpoint has a record with `is_creator`, `false` if the
/// record is absent or not a creator
pub fn holds_creator_privilege(records: &[ConnectionRecord], endpoint_id: &EndpointId) -> bool {
    find_record(records, endpoint_id).is_some_and(|r| r.is_creator)
}

/// Get broadcast targets (all records except the originator's).
///
/// # Arguments
///
/// * `records` - All connection records of the room
/// * `origin_endpoint_id` - The endpoint to exclude from the result
///
/// # Returns
///
/// A vector of connection records for every endpoint except the originator
pub fn broadcast_targets(
    records: &[ConnectionRecord],
    origin_endpoint_id: &EndpointId,
) -> Vec<ConnectionRecord> {
    records
        .iter()
        .filter(|r| &r.endpoint_id != origin_endpoint_id)
        .cloned()
        .collect()
}
