pub mod ml_port;
pub mod nlp_port;
