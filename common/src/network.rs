pub mod interface;
pub mod range;
