pub mod boxoffice;
pub mod payment;
pub mod report;
pub mod ticket;
pub mod user;

pub use boxoffice::{BoxOffice, PurchaseError, SaleRecord};
pub use payment::{Payment, DEFAULT_SUCCESS_RATE};
pub use report::{AvailabilityView, SalesReport};
pub use ticket::{Ticket, TicketStatus};
pub use user::User;
