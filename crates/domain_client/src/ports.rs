//! Client Domain Ports
//!
//! `ClientRepository` is the persistence port for clients. The PostgreSQL
//! adapter lives in `infra_db`; an in-memory adapter is available under the
//! `mock` feature for tests.

use async_trait::async_trait;

use core_kernel::{ClientId, DomainError, DomainPort, Pagination, PortError};

use crate::client::Client;

/// Persistence port for clients
#[async_trait]
pub trait ClientRepository: DomainPort {
    /// Retrieves a client by ID
    async fn get_by_id(&self, id: ClientId) -> Result<Option<Client>, PortError>;

    /// Stores a new client
    ///
    /// # Returns
    ///
    /// The stored client, or `PortError::Conflict` if the id or email is taken
    async fn create(&self, client: Client) -> Result<Client, PortError>;

    /// Replaces a stored client
    ///
    /// Succeeds only if the stored version equals `client.version`; the
    /// returned client carries the bumped version.
    async fn update(&self, client: Client) -> Result<Client, PortError>;

    /// Removes a client, returning whether it existed
    async fn delete(&self, id: ClientId) -> Result<bool, PortError>;

    /// Lists clients ordered by creation date
    async fn list(&self, page: Pagination) -> Result<Vec<Client>, PortError>;

    /// Finds the client registered under `email`
    async fn get_by_email(&self, email: &str) -> Result<Option<Client>, PortError>;

    /// Case-insensitive substring search on first or last name
    async fn search_by_name(&self, name: &str, page: Pagination) -> Result<Vec<Client>, PortError>;
}

/// Convenience lookups shared by services that reference clients
#[async_trait]
pub trait ClientRepositoryExt: ClientRepository {
    /// Gets a client or fails with `DomainError::NotFound`
    async fn require(&self, id: ClientId) -> Result<Client, DomainError> {
        self.get_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Client", id))
    }
}

impl<T: ClientRepository + ?Sized> ClientRepositoryExt for T {}

/// Mock implementation of ClientRepository for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// In-memory mock implementation of ClientRepository
    #[derive(Debug, Default, Clone)]
    pub struct MockClientRepository {
        clients: Arc<RwLock<HashMap<ClientId, Client>>>,
    }

    impl MockClientRepository {
        /// Creates a new mock repository
        pub fn new() -> Self {
            Self::default()
        }

        /// Pre-populates with clients for testing
        pub async fn with_clients(clients: Vec<Client>) -> Self {
            let repo = Self::new();
            for client in clients {
                repo.clients.write().await.insert(client.id, client);
            }
            repo
        }

        /// Number of stored clients
        pub async fn count(&self) -> usize {
            self.clients.read().await.len()
        }

        async fn sorted(&self) -> Vec<Client> {
            let mut all: Vec<_> = self.clients.read().await.values().cloned().collect();
            all.sort_by(|a, b| (a.created_at, a.id.as_uuid()).cmp(&(b.created_at, b.id.as_uuid())));
            all
        }
    }

    impl DomainPort for MockClientRepository {}

    #[async_trait]
    impl ClientRepository for MockClientRepository {
        async fn get_by_id(&self, id: ClientId) -> Result<Option<Client>, PortError> {
            Ok(self.clients.read().await.get(&id).cloned())
        }

        async fn create(&self, client: Client) -> Result<Client, PortError> {
            let mut clients = self.clients.write().await;
            if clients.contains_key(&client.id) {
                return Err(PortError::conflict(format!("Client {} already exists", client.id)));
            }
            if clients.values().any(|c| c.email == client.email) {
                return Err(PortError::conflict(format!("email {} is already registered", client.email)));
            }
            clients.insert(client.id, client.clone());
            Ok(client)
        }

        async fn update(&self, mut client: Client) -> Result<Client, PortError> {
            let mut clients = self.clients.write().await;
            let stored = clients
                .get(&client.id)
                .ok_or_else(|| PortError::not_found("Client", client.id))?;
            if stored.version != client.version {
                return Err(PortError::stale_version("Client", client.id, client.version));
            }
            if clients.values().any(|c| c.id != client.id && c.email == client.email) {
                return Err(PortError::conflict(format!("email {} is already registered", client.email)));
            }
            client.version += 1;
            clients.insert(client.id, client.clone());
            Ok(client)
        }

        async fn delete(&self, id: ClientId) -> Result<bool, PortError> {
            Ok(self.clients.write().await.remove(&id).is_some())
        }

        async fn list(&self, page: Pagination) -> Result<Vec<Client>, PortError> {
            Ok(page.apply(self.sorted().await))
        }

        async fn get_by_email(&self, email: &str) -> Result<Option<Client>, PortError> {
            Ok(self
                .clients
                .read()
                .await
                .values()
                .find(|c| c.email == email)
                .cloned())
        }

        async fn search_by_name(&self, name: &str, page: Pagination) -> Result<Vec<Client>, PortError> {
            let matches = self.sorted().await.into_iter().filter(|c| c.name_matches(name));
            Ok(page.apply(matches))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockClientRepository;
    use super::*;
    use crate::client::NewClient;
    use chrono::NaiveDate;

    fn new_client(email: &str) -> Client {
        Client::register(
            NewClient {
                first_name: "John".to_string(),
                last_name: "Doe".to_string(),
                email: email.to_string(),
                phone: String::new(),
                birth_date: None,
                address: String::new(),
                passport_number: String::new(),
            },
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_mock_create_and_get() {
        let repo = MockClientRepository::new();
        let client = repo.create(new_client("john@example.com")).await.unwrap();

        let found = repo.get_by_id(client.id).await.unwrap().unwrap();
        assert_eq!(found, client);
        assert!(repo.get_by_email("john@example.com").await.unwrap().is_some());
        assert!(repo.get_by_email("other@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_mock_rejects_duplicate_email() {
        let repo = MockClientRepository::new();
        repo.create(new_client("dup@example.com")).await.unwrap();
        let err = repo.create(new_client("dup@example.com")).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_mock_update_checks_version() {
        let repo = MockClientRepository::new();
        let client = repo.create(new_client("v@example.com")).await.unwrap();

        let updated = repo.update(client.clone()).await.unwrap();
        assert_eq!(updated.version, client.version + 1);

        let err = repo.update(client).await.unwrap_err();
        assert!(err.is_conflict());
    }

    #[tokio::test]
    async fn test_require_reports_not_found() {
        let repo = MockClientRepository::new();
        let err = repo.require(ClientId::new()).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
