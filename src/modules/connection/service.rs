use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        connection::{
            model::IncomingRequest,
            repository::ConnectionRepo,
            schema::{ConnectionEntity, ConnectionRequestEntity},
        },
        user::model::PublicProfile,
    },
};

#[derive(Clone)]
pub struct ConnectionService<C>
where
    C: ConnectionRepo + Send + Sync,
{
    connection_repo: Arc<C>,
}

impl<C> ConnectionService<C>
where
    C: ConnectionRepo + Send + Sync,
{
    pub fn with_dependencies(connection_repo: Arc<C>) -> Self {
        ConnectionService { connection_repo }
    }

    pub async fn list_connections(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PublicProfile>, error::SystemError> {
        let users = self.connection_repo.find_connected_users(&user_id).await?;
        Ok(users.into_iter().map(|u| PublicProfile::from_entity(u, true)).collect())
    }

    pub async fn list_incoming_requests(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<IncomingRequest>, error::SystemError> {
        let rows = self.connection_repo.find_pending_requests_to_user(&user_id).await?;
        Ok(rows.into_iter().map(IncomingRequest::from).collect())
    }

    pub async fn accept_request(
        &self,
        user_id: Uuid,
        request_id: Uuid,
    ) -> Result<ConnectionEntity, error::SystemError> {
        let connection = self.connection_repo.accept_request_atomic(&request_id, &user_id).await?;
        info!("Request {} accepted, connection {}", request_id, connection.id);
        Ok(connection)
    }

    pub async fn ignore_request(
        &self,
        user_id: Uuid,
        request_id: Uuid,
    ) -> Result<ConnectionRequestEntity, error::SystemError> {
        self.connection_repo.ignore_request_atomic(&request_id, &user_id).await
    }
}
