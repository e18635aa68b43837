pub const DEFAULT_EXTENSIONS: &[&str] = &[".jpg", ".png"];
pub const DEFAULT_MAX_FILE_SIZE: u64 = 5_000_000;

pub const DEFAULT_COMPRESS_COUNT: u32 = 1;
pub const MIN_COMPRESS_COUNT: u32 = 1;
pub const MAX_COMPRESS_COUNT: u32 = 10;

pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

pub const DEFAULT_SHRINK_ENDPOINT: &str = "https://tinypng.com/web/shrink";
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_14_2) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/86.0.4240.198 Safari/537.36";
pub const FORWARDED_FOR_HEADER: &str = "X-Forwarded-For";
pub const SUBMIT_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

pub const BYTES_PER_KB: f64 = 1024.0;
