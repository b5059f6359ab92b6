pub mod api;
pub mod config;
pub mod entities;
pub mod error;
pub mod forms;
pub mod imaging;
pub mod metrics;
pub mod migrator;
pub mod store;
pub mod telemetry;
pub mod uploads;
pub mod views;
pub mod wechat;

pub use sea_orm;
