//! Event publisher adapters.

mod in_memory;
mod redis;

pub use in_memory::InMemoryEventBus;
pub use redis::RedisEventPublisher;
