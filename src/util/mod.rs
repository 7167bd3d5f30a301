pub mod line_input;
pub mod unicode;
