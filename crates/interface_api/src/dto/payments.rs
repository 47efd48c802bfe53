//! Payment settlement bodies

use chrono::NaiveDate;
use serde::Deserialize;

/// Settlement date defaults to today
#[derive(Debug, Default, Deserialize)]
pub struct ProcessPaymentRequest {
    pub payment_date: Option<NaiveDate>,
}
