mod config_test;
mod exit_codes_test;
mod imports_test;
