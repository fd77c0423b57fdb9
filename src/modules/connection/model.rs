use serde::Serialize;
use sqlx::prelude::FromRow;
use uuid::Uuid;

use crate::modules::connection::schema::{ConnectionEntity, ConnectionRequestEntity, RequestStatus};
use crate::modules::user::{model::PublicProfile, schema::UserEntity};

/// A pending request joined with its sender's row.
#[derive(Debug, Clone, FromRow)]
pub struct PendingRequestRow {
    pub request_id: Uuid,
    pub status: RequestStatus,
    pub requested_at: chrono::DateTime<chrono::Utc>,
    #[sqlx(flatten)]
    pub sender: UserEntity,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomingRequest {
    pub id: Uuid,
    pub status: RequestStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub sender: PublicProfile,
}

impl From<PendingRequestRow> for IncomingRequest {
    fn from(row: PendingRequestRow) -> Self {
        IncomingRequest {
            id: row.request_id,
            status: row.status,
            created_at: row.requested_at,
            sender: PublicProfile::from_entity(row.sender, false),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConnectionsEnvelope {
    pub connections: Vec<PublicProfile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestsEnvelope {
    pub requests: Vec<IncomingRequest>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConnectionEnvelope {
    pub connection: ConnectionEntity,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestEnvelope {
    pub request: ConnectionRequestEntity,
}
