pub mod form;
pub mod homepage;
pub mod quiz;
pub mod result;
