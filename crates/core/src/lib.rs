//! # Duxcall Core
//!
//! Domain types shared by the store and the HTTP layer, plus the schedule
//! resolver that decides whether a hospital route is open right now and when
//! it opens next.

pub mod errors;
pub mod models;
pub mod resolver;
pub mod store;

pub use resolver::{ResolverConfig, ScheduleResolver, DEFAULT_TIMEZONE};
pub use store::ScheduleStore;
