// Integration tests for routers and external provider plumbing
// Upstream endpoints are wiremock servers. Route tests use a lazy pool that is never
// touched; database_test runs against DATABASE_URL and skips when it is unset

pub mod app_routes_test;
pub mod image_resolver_test;
pub mod plan_routes_test;
