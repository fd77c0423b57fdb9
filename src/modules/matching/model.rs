use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::modules::user::model::PublicProfile;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MeetModel {
    pub receiver_id: Uuid,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassModel {
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MatchesEnvelope {
    pub matches: Vec<PublicProfile>,
}
