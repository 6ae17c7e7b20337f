use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle of a ticket in the pool. Transitions are one-way:
/// a sold ticket never becomes available again.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    Available,
    Sold,
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketStatus::Available => write!(f, "AVAILABLE"),
            TicketStatus::Sold => write!(f, "SOLD"),
        }
    }
}

/// A single concert ticket with a stable id and a fixed face price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ticket {
    pub id: u32,
    pub price: Decimal,
    pub status: TicketStatus,
}

impl Ticket {
    pub fn new(id: u32, price: Decimal) -> Self {
        Self {
            id,
            price,
            status: TicketStatus::Available,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == TicketStatus::Available
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ticket #{} | {} | ₱{}", self.id, self.status, self.price)
    }
}
