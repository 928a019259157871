//! Journey store adapters.

mod in_memory;
mod redis;

pub use in_memory::InMemoryJourneyStore;
pub use redis::RedisJourneyStore;
