//! warehouse-planner core
//!
//! Warehouse location model and pick-route optimizer: turns flat location
//! records into a typed rack/zone tree with 3D positions, folds stock into
//! it, and orders pick lists with aisle-aware routing heuristics.

pub mod code;
pub mod error;
pub mod hierarchy;
pub mod layout;
pub mod natural;
pub mod pick;
pub mod polyline;
pub mod record;
pub mod router;
pub mod stock;
pub mod traits;
pub mod walking;
pub mod zone;
