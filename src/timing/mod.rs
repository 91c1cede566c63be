//! Scheduled transitions on a virtual clock.

mod timeline;

pub use timeline::{TimerId, Timeline};
