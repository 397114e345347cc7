mod add_tests;
mod browse_tests;
mod export_tests;
mod manage_tests;
