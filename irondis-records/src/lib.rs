//! # IronDIS Records
//!
//! DIS 7 record definitions built on `irondis-core`.
//!
//! Every record is a plain `Copy` struct whose codec, field table and value
//! semantics come from `#[derive(WireRecord)]`:
//! - [`StorageFuelReload`] and [`StorageFuel`] - supply and logistics records
//! - [`EntityId`] - simulation entity identifier
//! - [`ClockTime`] - simulation time stamp
//! - [`EulerAngles`] and [`Vector3Double`] - orientation and location

pub mod entity;
pub mod logistics;
pub mod spatial;
pub mod time;

pub use entity::EntityId;
pub use logistics::{StorageFuel, StorageFuelReload};
pub use spatial::{EulerAngles, Vector3Double};
pub use time::ClockTime;
