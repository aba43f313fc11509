pub mod allocation;
pub mod asset;
pub mod chart;
pub mod history;
pub mod price;
pub mod simulation;
pub mod state;
