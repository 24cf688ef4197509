//! Core type definitions for Mindwell

pub mod analysis;
pub mod plugin;
pub mod reading;
pub mod store;
pub mod thresholds;

pub use analysis::*;
pub use plugin::*;
pub use reading::*;
pub use store::*;
pub use thresholds::*;
