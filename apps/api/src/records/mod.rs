// Session Record Store: one row per completed interview, read back most-recent-first.

pub mod handlers;
pub mod store;
