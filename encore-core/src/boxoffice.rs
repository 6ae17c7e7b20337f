use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::payment::{Payment, DEFAULT_SUCCESS_RATE};
use crate::report::{AvailabilityView, SalesReport};
use crate::ticket::{Ticket, TicketStatus};
use crate::user::User;

/// How many sales the report shows in its recent-transactions section.
const RECENT_SALES_WINDOW: usize = 5;

/// How many available tickets the availability preview lists before
/// collapsing the rest into a count.
const AVAILABILITY_PREVIEW: usize = 10;

/// A completed purchase: who bought, the ticket as sold, and the payment
/// that cleared. Append-only, in chronological order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleRecord {
    pub user: User,
    pub ticket: Ticket,
    pub payment: Payment,
}

#[derive(Debug, thiserror::Error)]
pub enum PurchaseError {
    #[error("no tickets left")]
    SoldOut,

    #[error("payment of ₱{} via {} was declined", payment.amount, payment.method)]
    PaymentDeclined { payment: Payment },
}

/// Orchestrates the ticket pool: purchase attempts, attendance tracking,
/// and reporting. Randomness and the clock are injected so runs can be
/// made deterministic.
pub struct BoxOffice<R: Rng> {
    /// Ticket pool, ascending id order; ids are assigned 1..=total once.
    tickets: Vec<Ticket>,
    venue_capacity: u32,
    sales: Vec<SaleRecord>,
    attendance: u32,
    success_rate: f64,
    rng: R,
    clock: fn() -> DateTime<Utc>,
}

impl BoxOffice<StdRng> {
    /// Pool of `total_tickets` tickets at a flat price, with entropy-seeded
    /// payment outcomes.
    pub fn new(total_tickets: u32, price: Decimal, venue_capacity: u32) -> Self {
        Self::with_rng(total_tickets, price, venue_capacity, StdRng::from_entropy())
    }
}

impl<R: Rng> BoxOffice<R> {
    pub fn with_rng(total_tickets: u32, price: Decimal, venue_capacity: u32, rng: R) -> Self {
        let tickets = (1..=total_tickets).map(|id| Ticket::new(id, price)).collect();
        Self {
            tickets,
            venue_capacity,
            sales: Vec::new(),
            attendance: 0,
            success_rate: DEFAULT_SUCCESS_RATE,
            rng,
            clock: Utc::now,
        }
    }

    pub fn with_success_rate(mut self, success_rate: f64) -> Self {
        self.success_rate = success_rate;
        self
    }

    pub fn with_clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub fn set_success_rate(&mut self, success_rate: f64) {
        self.success_rate = success_rate;
    }

    /// Attempts to sell one ticket to `user`.
    ///
    /// The lowest-id available ticket is always the one offered. On a
    /// declined payment the ticket stays available for the next buyer and
    /// the payment is returned in the error rather than recorded; only
    /// successful payments enter the sales history.
    pub fn buy_ticket(&mut self, user: &User, payment_method: &str) -> Result<Ticket, PurchaseError> {
        // Pool is sorted by id at construction, so the first available
        // ticket is the lowest id.
        let Some(idx) = self.tickets.iter().position(Ticket::is_available) else {
            warn!(user = %user.name, "sold out, no tickets left");
            return Err(PurchaseError::SoldOut);
        };

        let mut payment = Payment::new(self.tickets[idx].price, payment_method, (self.clock)());
        if !payment.process(&mut self.rng, self.success_rate) {
            info!(
                user = %user.name,
                ticket = self.tickets[idx].id,
                method = payment_method,
                "payment declined, ticket returned to pool"
            );
            return Err(PurchaseError::PaymentDeclined { payment });
        }

        let ticket = &mut self.tickets[idx];
        ticket.status = TicketStatus::Sold;
        let sold = ticket.clone();
        info!(user = %user.name, ticket = sold.id, amount = %sold.price, "ticket sold");
        self.sales.push(SaleRecord {
            user: user.clone(),
            ticket: sold.clone(),
            payment,
        });
        Ok(sold)
    }

    /// Recomputes attendance from live ticket statuses, capped at venue
    /// capacity. Idempotent; an oversold pool still counts fully as revenue.
    pub fn track_attendance(&mut self) -> u32 {
        let sold = self.sold_count() as u32;
        self.attendance = sold.min(self.venue_capacity);
        debug!(
            attendance = self.attendance,
            capacity = self.venue_capacity,
            "attendance updated"
        );
        self.attendance
    }

    /// Read-only aggregation over current state. Safe on an empty pool and
    /// a zero-capacity venue.
    pub fn report(&self) -> SalesReport {
        let sold_count = self.sold_count();
        let total_tickets = self.tickets.len();
        let gross_revenue: Decimal = self
            .tickets
            .iter()
            .filter(|t| t.status == TicketStatus::Sold)
            .map(|t| t.price)
            .sum();
        let sold_percentage = if total_tickets == 0 {
            0.0
        } else {
            sold_count as f64 / total_tickets as f64 * 100.0
        };
        let attendance_percentage = if self.venue_capacity == 0 {
            0.0
        } else {
            f64::from(self.attendance) / f64::from(self.venue_capacity) * 100.0
        };
        let recent_start = self.sales.len().saturating_sub(RECENT_SALES_WINDOW);

        SalesReport {
            sold_count,
            total_tickets,
            sold_percentage,
            gross_revenue,
            attendance: self.attendance,
            venue_capacity: self.venue_capacity,
            attendance_percentage,
            total_sales: self.sales.len(),
            recent_sales: self.sales[recent_start..].to_vec(),
        }
    }

    /// Preview of the available pool in id order: up to ten tickets plus a
    /// count of the rest.
    pub fn availability(&self) -> AvailabilityView {
        let available: Vec<&Ticket> = self.tickets.iter().filter(|t| t.is_available()).collect();
        let visible: Vec<Ticket> = available
            .iter()
            .take(AVAILABILITY_PREVIEW)
            .map(|t| (*t).clone())
            .collect();
        let hidden = available.len().saturating_sub(visible.len());
        AvailabilityView {
            total_available: available.len(),
            visible,
            hidden,
        }
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn sales(&self) -> &[SaleRecord] {
        &self.sales
    }

    pub fn attendance(&self) -> u32 {
        self.attendance
    }

    pub fn venue_capacity(&self) -> u32 {
        self.venue_capacity
    }

    fn sold_count(&self) -> usize {
        self.tickets
            .iter()
            .filter(|t| t.status == TicketStatus::Sold)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn office(total: u32, capacity: u32, success_rate: f64) -> BoxOffice<StdRng> {
        BoxOffice::with_rng(total, dec!(100), capacity, StdRng::seed_from_u64(7))
            .with_success_rate(success_rate)
    }

    fn buyer(id: u32) -> User {
        User::new(id, format!("Buyer {id}"), format!("buyer{id}@email.com"))
    }

    fn fixed_clock() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 15, 20, 0, 0).unwrap()
    }

    #[test]
    fn sells_lowest_id_first() {
        let mut office = office(3, 3, 1.0);
        let first = office.buy_ticket(&buyer(1), "GCash").unwrap();
        let second = office.buy_ticket(&buyer(2), "PayMaya").unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.status, TicketStatus::Sold);
    }

    #[test]
    fn single_ticket_pool_sells_once_then_sold_out() {
        let mut office = office(1, 1, 1.0);
        let ticket = office.buy_ticket(&buyer(1), "GCash").unwrap();
        assert_eq!(ticket.id, 1);
        assert_eq!(office.sales().len(), 1);

        let err = office.buy_ticket(&buyer(2), "GCash").unwrap_err();
        assert!(matches!(err, PurchaseError::SoldOut));
        assert_eq!(office.sales().len(), 1);
        assert_eq!(office.tickets()[0].status, TicketStatus::Sold);
    }

    #[test]
    fn sold_out_pool_is_untouched_by_further_attempts() {
        let mut office = office(2, 2, 1.0);
        office.buy_ticket(&buyer(1), "GCash").unwrap();
        office.buy_ticket(&buyer(2), "GCash").unwrap();
        let before: Vec<Ticket> = office.tickets().to_vec();

        assert!(matches!(
            office.buy_ticket(&buyer(3), "GCash"),
            Err(PurchaseError::SoldOut)
        ));
        assert_eq!(office.tickets(), &before[..]);
        assert_eq!(office.sales().len(), 2);
    }

    #[test]
    fn declined_payment_keeps_ticket_available() {
        let mut office = office(2, 2, 0.0);
        let err = office.buy_ticket(&buyer(1), "Credit Card").unwrap_err();
        match err {
            PurchaseError::PaymentDeclined { payment } => {
                assert!(!payment.success);
                assert_eq!(payment.amount, dec!(100));
            }
            other => panic!("expected PaymentDeclined, got {other:?}"),
        }
        assert!(office.tickets()[0].is_available());
        assert!(office.sales().is_empty());

        // Another buyer can still claim the same ticket.
        office.set_success_rate(1.0);
        let ticket = office.buy_ticket(&buyer(2), "Debit Card").unwrap();
        assert_eq!(ticket.id, 1);
        assert_eq!(office.sales().len(), 1);
        assert_eq!(office.sales()[0].user.id, 2);
    }

    #[test]
    fn attendance_is_recomputed_and_capped() {
        let mut office = office(5, 3, 1.0);
        for id in 1..=5 {
            office.buy_ticket(&buyer(id), "GCash").unwrap();
        }
        assert_eq!(office.track_attendance(), 3);
        // Idempotent under repetition.
        assert_eq!(office.track_attendance(), 3);
        assert_eq!(office.attendance(), 3);

        // Excess sold tickets still count as revenue.
        let report = office.report();
        assert_eq!(report.sold_count, 5);
        assert_eq!(report.gross_revenue, dec!(500));
    }

    #[test]
    fn zero_capacity_venue_yields_zero_attendance() {
        let mut office = office(3, 0, 1.0);
        office.buy_ticket(&buyer(1), "GCash").unwrap();
        assert_eq!(office.track_attendance(), 0);

        let report = office.report();
        assert_eq!(report.attendance, 0);
        assert_eq!(report.attendance_percentage, 0.0);
    }

    #[test]
    fn empty_pool_reports_without_dividing_by_zero() {
        let mut office = office(0, 10, 1.0);
        assert!(matches!(
            office.buy_ticket(&buyer(1), "GCash"),
            Err(PurchaseError::SoldOut)
        ));

        let report = office.report();
        assert_eq!(report.total_tickets, 0);
        assert_eq!(report.sold_percentage, 0.0);
        assert_eq!(report.gross_revenue, Decimal::ZERO);
    }

    #[test]
    fn report_aggregates_revenue_and_percentages() {
        let mut office = office(4, 10, 1.0);
        office.buy_ticket(&buyer(1), "GCash").unwrap();
        office.buy_ticket(&buyer(2), "PayMaya").unwrap();
        office.track_attendance();

        let report = office.report();
        assert_eq!(report.sold_count, 2);
        assert_eq!(report.total_tickets, 4);
        assert_eq!(report.sold_percentage, 50.0);
        assert_eq!(report.gross_revenue, dec!(200));
        assert_eq!(report.attendance, 2);
        assert_eq!(report.attendance_percentage, 20.0);
        assert_eq!(report.total_sales, 2);
    }

    #[test]
    fn recent_sales_window_keeps_last_five_in_order() {
        let mut office = office(8, 8, 1.0);
        for id in 1..=7 {
            office.buy_ticket(&buyer(id), "GCash").unwrap();
        }

        let report = office.report();
        assert_eq!(report.total_sales, 7);
        assert_eq!(report.recent_sales.len(), 5);
        let buyers: Vec<u32> = report.recent_sales.iter().map(|s| s.user.id).collect();
        assert_eq!(buyers, vec![3, 4, 5, 6, 7]);
    }

    #[test]
    fn availability_preview_caps_at_ten() {
        let office = office(15, 15, 1.0);
        let view = office.availability();
        assert_eq!(view.total_available, 15);
        assert_eq!(view.visible.len(), 10);
        assert_eq!(view.hidden, 5);
        let ids: Vec<u32> = view.visible.iter().map(|t| t.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<u32>>());
    }

    #[test]
    fn injected_clock_timestamps_payments() {
        let mut office = BoxOffice::with_rng(1, dec!(100), 1, StdRng::seed_from_u64(7))
            .with_success_rate(1.0)
            .with_clock(fixed_clock);
        office.buy_ticket(&buyer(1), "GCash").unwrap();
        assert_eq!(office.sales()[0].payment.timestamp, fixed_clock());
    }

    #[test]
    fn same_seed_same_outcome_sequence() {
        let run = |seed: u64| -> Vec<bool> {
            let mut office =
                BoxOffice::with_rng(20, dec!(100), 20, StdRng::seed_from_u64(seed));
            (0..20)
                .map(|i| office.buy_ticket(&buyer(i), "GCash").is_ok())
                .collect()
        };
        assert_eq!(run(99), run(99));
    }
}
