pub mod bisect;
pub mod generate;
pub mod probe;
pub mod switch;
