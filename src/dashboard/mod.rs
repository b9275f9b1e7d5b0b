pub mod clock;
pub mod commands;
pub mod controller;
pub mod state;

pub use clock::{ClockReading, ClockTicker, CLOCK_EVENT};
pub use controller::DashboardController;
pub use state::{DashboardSnapshot, DashboardState};
