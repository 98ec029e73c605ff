//! Application constants
//!
//! Field limits mirror the backend's contract; defaults mirror the pages.

// Field limits
pub const MESSAGE_MAX_CHARS: usize = 5000;
pub const CONTACT_NAME_MAX_CHARS: usize = 100;
pub const CONTACT_PHONE_MAX_CHARS: usize = 20;
pub const MIN_CONTACTS: usize = 1;

// Form defaults
pub const DEFAULT_SCHEDULE_TIME: &str = "09:00";

// Pagination
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DASHBOARD_RECENT_LIMIT: u32 = 5;

// API defaults
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api/v1";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 30;
/// Total attempts for read requests (initial try + one retry)
pub const DEFAULT_READ_ATTEMPTS: usize = 2;
pub const FALLBACK_ERROR_MESSAGE: &str = "Unexpected error";

// Cache defaults
pub const DEFAULT_CACHE_STALE_SECS: u64 = 30;
pub const DEFAULT_CACHE_MAX_CAPACITY: u64 = 256;
