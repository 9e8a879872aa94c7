pub mod campaign;
pub mod handoff;
pub mod lead;
pub mod sessions;
mod store;
