//! Client service tests against the in-memory repository

use std::sync::Arc;

use chrono::NaiveDate;
use core_kernel::{ClientId, DomainError, FixedClock, Pagination, Patch};
use domain_client::{ClientPatch, ClientService, MockClientRepository, NewClient};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 20).unwrap()
}

fn service() -> ClientService {
    ClientService::new(
        Arc::new(MockClientRepository::new()),
        Arc::new(FixedClock::on(today())),
    )
}

fn new_client(first: &str, last: &str, email: &str) -> NewClient {
    NewClient {
        first_name: first.to_string(),
        last_name: last.to_string(),
        email: email.to_string(),
        phone: "+1-555-0100".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1985, 7, 4),
        address: "12 Elm Street".to_string(),
        passport_number: "P1234567".to_string(),
    }
}

mod registration {
    use super::*;

    #[tokio::test]
    async fn test_register_stamps_today_and_activates() {
        let service = service();
        let client = service
            .register(new_client("Maria", "Ivanova", "maria@example.com"))
            .await
            .unwrap();

        assert_eq!(client.created_at, today());
        assert!(client.is_active);
        assert_eq!(client.version, 1);
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_email() {
        let err = service()
            .register(new_client("Maria", "Ivanova", "not-an-email"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let service = service();
        service
            .register(new_client("A", "B", "same@example.com"))
            .await
            .unwrap();
        let err = service
            .register(new_client("C", "D", "same@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::BusinessRuleViolation(_)));
    }
}

mod lookups {
    use super::*;

    #[tokio::test]
    async fn test_get_unknown_client_is_not_found() {
        let err = service().get(ClientId::new()).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("Client"));
    }

    #[tokio::test]
    async fn test_search_by_name_matches_first_or_last() {
        let service = service();
        service.register(new_client("Olga", "Smirnova", "o@example.com")).await.unwrap();
        service.register(new_client("Petr", "Olegov", "p@example.com")).await.unwrap();
        service.register(new_client("Ivan", "Kuznetsov", "i@example.com")).await.unwrap();

        let found = service.search_by_name("ol", Pagination::default()).await.unwrap();
        assert_eq!(found.len(), 2);

        let page = service
            .search_by_name("ol", Pagination::new(1, 1).unwrap())
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
    }

    #[tokio::test]
    async fn test_get_by_email() {
        let service = service();
        let client = service.register(new_client("A", "B", "a@example.com")).await.unwrap();
        assert_eq!(service.get_by_email("a@example.com").await.unwrap().id, client.id);
        assert!(service.get_by_email("zz@example.com").await.unwrap_err().is_not_found());
    }
}

mod maintenance {
    use super::*;

    #[tokio::test]
    async fn test_update_bumps_version() {
        let service = service();
        let client = service.register(new_client("A", "B", "a@example.com")).await.unwrap();

        let updated = service
            .update(
                client.id,
                ClientPatch {
                    address: Patch::Set("99 Oak Avenue".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.address, "99 Oak Avenue");
        assert_eq!(updated.first_name, "A");
        assert_eq!(updated.version, 2);
    }

    #[tokio::test]
    async fn test_update_to_taken_email_is_rejected() {
        let service = service();
        service.register(new_client("A", "B", "a@example.com")).await.unwrap();
        let other = service.register(new_client("C", "D", "c@example.com")).await.unwrap();

        let err = service
            .update(
                other.id,
                ClientPatch {
                    email: Patch::Set("a@example.com".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::BusinessRuleViolation(_)));
    }

    #[tokio::test]
    async fn test_deactivate_and_delete() {
        let service = service();
        let client = service.register(new_client("A", "B", "a@example.com")).await.unwrap();

        let inactive = service.deactivate(client.id).await.unwrap();
        assert!(!inactive.is_active);

        service.delete(client.id).await.unwrap();
        assert!(service.delete(client.id).await.unwrap_err().is_not_found());
    }
}
