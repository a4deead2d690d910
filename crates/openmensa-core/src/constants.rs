/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const API_V2_ROUTE_COMPONENT: &str = "v2";
pub const API_V2_ROUTE_PREFIX: &str =
    const_str::concat!(API_ROUTE_PREFIX, "/", API_V2_ROUTE_COMPONENT);

pub const USERS_ROUTE_COMPONENT: &str = "users";
pub const USERS_ROUTE_PREFIX: &str =
    const_str::concat!(API_V2_ROUTE_PREFIX, "/", USERS_ROUTE_COMPONENT);

/// Prefix of every custom response header (`X-OM-Api-Version`, ...).
pub const CUSTOM_HEADER_PREFIX: &str = "X-OM";

/// Logins that belong to the internal singleton users.
pub const SYSTEM_LOGIN: &str = "system";
pub const ANONYMOUS_LOGIN: &str = "anonymous";
pub const RESERVED_LOGINS: [&str; 2] = [ANONYMOUS_LOGIN, SYSTEM_LOGIN];

pub const DEFAULT_TIME_ZONE: &str = "Berlin";
pub const DEFAULT_LOCALE: &str = "en";
pub const DEFAULT_API_VERSION: u16 = 2;
pub const DEFAULT_TOKEN_TTL_HOURS: u32 = 720;
