//! Client application service

use std::sync::Arc;

use tracing::{debug, info, warn};
use validator::Validate;

use core_kernel::{Clock, ClientId, DomainError, DomainResult, Pagination};

use crate::client::{Client, ClientPatch, NewClient};
use crate::ports::{ClientRepository, ClientRepositoryExt};

/// Registration, lookup and maintenance of clients
#[derive(Clone)]
pub struct ClientService {
    clients: Arc<dyn ClientRepository>,
    clock: Arc<dyn Clock>,
}

impl ClientService {
    pub fn new(clients: Arc<dyn ClientRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { clients, clock }
    }

    /// Registers a new client
    ///
    /// # Errors
    ///
    /// * `Validation` - malformed email or empty names
    /// * `BusinessRuleViolation` - the email is already registered
    pub async fn register(&self, new: NewClient) -> DomainResult<Client> {
        new.validate()
            .map_err(|e| DomainError::validation(e.to_string()))?;

        if self.clients.get_by_email(&new.email).await?.is_some() {
            warn!(email = %new.email, "Client registration rejected: email taken");
            return Err(DomainError::business_rule(format!(
                "Client with email {} already exists",
                new.email
            )));
        }

        let client = Client::register(new, self.clock.today());
        let client = self.clients.create(client).await?;
        info!(client_id = %client.id, "Client registered");
        Ok(client)
    }

    pub async fn get(&self, id: ClientId) -> DomainResult<Client> {
        self.clients.require(id).await
    }

    pub async fn list(&self, page: Pagination) -> DomainResult<Vec<Client>> {
        Ok(self.clients.list(page).await?)
    }

    pub async fn get_by_email(&self, email: &str) -> DomainResult<Client> {
        debug!(email, "Looking up client by email");
        self.clients
            .get_by_email(email)
            .await?
            .ok_or_else(|| DomainError::not_found("Client", email))
    }

    pub async fn search_by_name(&self, name: &str, page: Pagination) -> DomainResult<Vec<Client>> {
        Ok(self.clients.search_by_name(name, page).await?)
    }

    /// Applies a partial update
    pub async fn update(&self, id: ClientId, patch: ClientPatch) -> DomainResult<Client> {
        let current = self.clients.require(id).await?;

        if let Some(email) = patch.email.as_set() {
            if *email != current.email {
                if let Some(other) = self.clients.get_by_email(email).await? {
                    if other.id != id {
                        return Err(DomainError::business_rule(format!(
                            "Client with email {email} already exists"
                        )));
                    }
                }
            }
        }

        let next = current.apply_patch(patch)?;
        let saved = self.clients.update(next).await?;
        info!(client_id = %id, version = saved.version, "Client updated");
        Ok(saved)
    }

    /// Marks a client inactive without removing it
    pub async fn deactivate(&self, id: ClientId) -> DomainResult<Client> {
        let mut client = self.clients.require(id).await?;
        client.is_active = false;
        let saved = self.clients.update(client).await?;
        info!(client_id = %id, "Client deactivated");
        Ok(saved)
    }

    pub async fn delete(&self, id: ClientId) -> DomainResult<()> {
        if !self.clients.delete(id).await? {
            return Err(DomainError::not_found("Client", id));
        }
        info!(client_id = %id, "Client deleted");
        Ok(())
    }
}
