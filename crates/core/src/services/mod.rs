pub mod dataset_service;
pub mod history_service;
pub mod rebalance_service;
pub mod simulation_service;
