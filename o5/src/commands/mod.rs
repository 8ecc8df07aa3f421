pub mod check_config;
pub mod serve;
pub mod submit;
