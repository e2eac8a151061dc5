pub mod matrix;
pub mod setkey;
