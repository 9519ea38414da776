/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const REGISTRY_ROUTE_COMPONENT: &str = "registry";
pub const REGISTRY_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", REGISTRY_ROUTE_COMPONENT);

pub const AUTH_ROUTE_COMPONENT: &str = "auth";
pub const AUTH_ROUTE_PREFIX: &str = const_str::concat!(API_ROUTE_PREFIX, "/", AUTH_ROUTE_COMPONENT);

/// Name of the counter row backing registry ids.
pub const REGISTRY_SEQUENCE_NAME: &str = "registry";
