//! Presentation layer: the displayed session and its terminal rendering

pub mod formatter;
pub mod session;

pub use formatter::{SIMULATION_BANNER, render_news, render_snapshot, render_tickers};
pub use session::{DashboardSession, RunTicket};
