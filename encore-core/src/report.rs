use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::boxoffice::SaleRecord;
use crate::ticket::Ticket;

/// Sales and attendance snapshot, renderable on any surface (terminal,
/// JSON, logs). Percentages are 0.0 when their denominator is 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesReport {
    pub sold_count: usize,
    pub total_tickets: usize,
    pub sold_percentage: f64,
    pub gross_revenue: Decimal,
    pub attendance: u32,
    pub venue_capacity: u32,
    pub attendance_percentage: f64,
    pub total_sales: usize,
    /// Most recent sales, oldest first.
    pub recent_sales: Vec<SaleRecord>,
}

/// Preview of the available ticket pool: the first few tickets by id plus
/// a count of the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityView {
    pub total_available: usize,
    pub visible: Vec<Ticket>,
    pub hidden: usize,
}
