//! Connection driver: accepts TCP connections and runs each one on its own
//! task.

pub mod listener;
