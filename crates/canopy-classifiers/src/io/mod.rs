pub mod csv_table;

pub use csv_table::{read_dataset, read_table};
