pub mod args;
pub mod train;
