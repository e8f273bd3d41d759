pub mod ai;
pub mod calendar;
pub mod conversation;
pub mod extract;
pub mod replies;
pub mod session;
