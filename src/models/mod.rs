pub mod session;

pub use session::{BookingData, Session, Stage};
