pub mod app_config;

#[cfg(test)]
mod app_config_tests;
