use std::fmt;

use chrono::{DateTime, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default gateway reliability for the simulated payment step.
pub const DEFAULT_SUCCESS_RATE: f64 = 0.9;

/// One payment attempt against the simulated gateway.
///
/// The method label is free-form ("GCash", "Credit Card", ...) and is not
/// validated; the simulation treats it as opaque.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub amount: Decimal,
    pub method: String,
    pub success: bool,
    pub timestamp: DateTime<Utc>,
}

impl Payment {
    pub fn new(amount: Decimal, method: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            method: method.into(),
            success: false,
            timestamp,
        }
    }

    /// Runs the single probabilistic gateway draw: a uniform value in [0, 1)
    /// succeeds when strictly below `success_rate`. Call at most once; a
    /// second call re-randomizes the outcome.
    pub fn process<R: Rng>(&mut self, rng: &mut R, success_rate: f64) -> bool {
        self.success = rng.gen::<f64>() < success_rate;
        self.success
    }
}

impl fmt::Display for Payment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = if self.success { "OK" } else { "DECLINED" };
        write!(f, "{} ₱{} via {}", outcome, self.amount, self.method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rust_decimal_macros::dec;

    fn sample_payment() -> Payment {
        let ts = Utc.with_ymd_and_hms(2026, 1, 15, 20, 0, 0).unwrap();
        Payment::new(dec!(250), "GCash", ts)
    }

    #[test]
    fn process_always_succeeds_at_rate_one() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut payment = sample_payment();
        assert!(payment.process(&mut rng, 1.0));
        assert!(payment.success);
    }

    #[test]
    fn process_always_fails_at_rate_zero() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut payment = sample_payment();
        assert!(!payment.process(&mut rng, 0.0));
        assert!(!payment.success);
    }

    #[test]
    fn display_reflects_outcome() {
        let mut payment = sample_payment();
        assert_eq!(payment.to_string(), "DECLINED ₱250 via GCash");
        let mut rng = StdRng::seed_from_u64(42);
        payment.process(&mut rng, 1.0);
        assert_eq!(payment.to_string(), "OK ₱250 via GCash");
    }
}
