//! Conversion logic between DTOs and domain entities.

use sunadokei_shared::time::epoch_millis_to_rfc3339;

use crate::domain::entity::ConnectionRecord;
use crate::infrastructure::dto::http::ConnectionDto;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<ConnectionRecord> for ConnectionDto {
    fn from(record: ConnectionRecord) -> Self {
        Self {
            endpoint_id: record.endpoint_id.into_string(),
            session_id: record.session_id.into_string(),
            is_creator: record.is_creator,
            joined_at: epoch_millis_to_rfc3339(record.joined_at.value()),
        }
    }
}
