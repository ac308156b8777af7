pub mod logs;
pub mod ml;
pub mod nlp;
