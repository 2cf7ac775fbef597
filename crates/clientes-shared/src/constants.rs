//! Application-wide constants

pub const DEFAULT_PAGE: u32 = 0;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const BIRTH_DATE_FORMAT: &str = "%d/%m/%Y";
pub const CACHE_NAMESPACE: &str = "clientes";
