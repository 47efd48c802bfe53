//! Pre-built Test Fixtures
//!
//! Predictable dates, amounts and identifiers, plus `fake`-backed client
//! data for tests that need many distinct records.

use chrono::NaiveDate;
use fake::faker::address::en::{CityName, StreetName};
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use core_kernel::{ClaimId, ClientId, FixedClock, PaymentId, PolicyId};
use domain_client::NewClient;

static TODAY: Lazy<NaiveDate> = Lazy::new(|| date(2024, 6, 15));

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Fixture for calendar dates
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// The date every fixed test clock reports
    pub fn today() -> NaiveDate {
        *TODAY
    }

    pub fn clock() -> FixedClock {
        FixedClock::on(Self::today())
    }

    pub fn policy_start() -> NaiveDate {
        date(2024, 1, 1)
    }

    pub fn policy_end() -> NaiveDate {
        date(2024, 12, 31)
    }

    /// Inside the standard policy period
    pub fn incident_date() -> NaiveDate {
        date(2024, 3, 15)
    }

    pub fn before_policy() -> NaiveDate {
        date(2023, 12, 1)
    }

    pub fn after_policy() -> NaiveDate {
        date(2025, 2, 1)
    }

    pub fn birth_date() -> NaiveDate {
        date(1989, 5, 15)
    }
}

/// Fixture for monetary amounts
pub struct AmountFixtures;

impl AmountFixtures {
    /// Life premium on this is 7500.00
    pub fn coverage() -> Decimal {
        dec!(100000)
    }

    pub fn claim() -> Decimal {
        dec!(5000)
    }

    pub fn approved() -> Decimal {
        dec!(2500)
    }

    pub fn life_premium() -> Decimal {
        dec!(7500.00)
    }
}

/// Fixture for identifier test data
pub struct IdFixtures;

impl IdFixtures {
    fn parse(s: &str) -> Uuid {
        Uuid::parse_str(s).unwrap_or_default()
    }

    pub fn client_id() -> ClientId {
        ClientId::from_uuid(Self::parse("550e8400-e29b-41d4-a716-446655440001"))
    }

    pub fn policy_id() -> PolicyId {
        PolicyId::from_uuid(Self::parse("550e8400-e29b-41d4-a716-446655440002"))
    }

    pub fn claim_id() -> ClaimId {
        ClaimId::from_uuid(Self::parse("550e8400-e29b-41d4-a716-446655440003"))
    }

    pub fn payment_id() -> PaymentId {
        PaymentId::from_uuid(Self::parse("550e8400-e29b-41d4-a716-446655440004"))
    }
}

/// Fixture for client registration data
pub struct ClientFixtures;

impl ClientFixtures {
    /// The same client every time
    pub fn anna() -> NewClient {
        NewClient {
            first_name: "Anna".to_string(),
            last_name: "Kowalska".to_string(),
            email: "anna.kowalska@example.com".to_string(),
            phone: "+48 600 100 200".to_string(),
            birth_date: Some(TemporalFixtures::birth_date()),
            address: "ul. Dluga 1, Gdansk".to_string(),
            passport_number: "AB1234567".to_string(),
        }
    }

    /// Random but valid registration data
    pub fn random() -> NewClient {
        let first_name: String = FirstName().fake();
        let last_name: String = LastName().fake();
        let email: String = SafeEmail().fake();
        let street: String = StreetName().fake();
        let city: String = CityName().fake();
        let house: u16 = (1..300).fake();
        let passport: u32 = (10_000_000..99_999_999).fake();
        let age_days: i64 = (18 * 365..80 * 365).fake();

        NewClient {
            first_name,
            last_name,
            // prefix keeps repeated fake addresses unique
            email: format!("{}.{email}", Uuid::new_v4().simple()),
            phone: PhoneNumber().fake(),
            birth_date: Some(TemporalFixtures::today() - chrono::Duration::days(age_days)),
            address: format!("{house} {street}, {city}"),
            passport_number: format!("P{passport}"),
        }
    }
}
