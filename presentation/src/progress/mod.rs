//! Turn progress indicator

pub mod reporter;

pub use reporter::TurnSpinner;
