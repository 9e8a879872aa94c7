pub mod components;
pub mod form;
pub mod homepage;
pub mod layout;
pub mod quiz;
pub mod result;

// Re-export commonly used functions from layout
pub use layout::{page, render, titled};
