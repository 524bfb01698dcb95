//! Material definitions and the `.mtl` parser

pub mod material_table;
pub mod mtl_parser;

pub use material_table::{Material, MaterialTable};
pub use mtl_parser::MtlParser;
