mod cli_test;
mod error_test;
mod json_test;
mod noninteractive_test;
mod session_test;
