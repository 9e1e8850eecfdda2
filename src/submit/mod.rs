pub mod fields;
pub mod parser;
