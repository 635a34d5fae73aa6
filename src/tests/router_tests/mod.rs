mod auth_flow_tests;
mod extension_tests;
mod properties_tests;
