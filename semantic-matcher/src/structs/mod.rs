pub mod match_options;
pub mod match_result;
