mod named_factor_tests;
mod properties;
mod utils;
