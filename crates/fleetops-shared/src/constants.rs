//! Application-wide constants

pub const DEFAULT_PAGE_SIZE: u32 = 15;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: i64 = 86_400;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PASSWORD_LENGTH: usize = 128;
pub const MAX_ATTACHMENT_BYTES: usize = 2 * 1024 * 1024;
pub const ALLOWED_ATTACHMENT_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "pdf"];
pub const INCOME_ATTACHMENT_PREFIX: &str = "attachments/incomes";
