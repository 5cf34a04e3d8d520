// Integration test modules
pub mod http_api_tests;
pub mod resolver_tests;
pub mod serializer_tests;
pub mod snapshot_tests;

// Fixtures shared by every suite
#[path = "../common/mod.rs"]
pub mod common;
