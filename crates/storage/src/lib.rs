//! Storage for rendered weather cards.
//!
//! - Disk-backed card cache with TTL freshness
//! - Injectable clock for freshness checks
//! - Per-key single-flight coalescing of cache misses

pub mod card_cache;
pub mod clock;
pub mod single_flight;

pub use card_cache::{CacheEntry, CacheKey, CardCache, DEFAULT_TTL};
pub use clock::{Clock, ManualClock, SystemClock};
pub use single_flight::{FlightGuard, FlightRole, SingleFlight};
