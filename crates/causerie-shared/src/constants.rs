/// Application name
pub const APP_NAME: &str = "Causerie";

/// Maximum chatroom title length in characters
pub const TITLE_MAX_CHARS: usize = 50;

/// Messages per transcript page (most-recent-first windows)
pub const PAGE_SIZE: usize = 20;

/// Lower bound of the simulated thinking delay in milliseconds (inclusive)
pub const REPLY_DELAY_MIN_MS: u64 = 2000;

/// Upper bound of the simulated thinking delay in milliseconds (exclusive)
pub const REPLY_DELAY_MAX_MS: u64 = 4000;

/// Cooldown after a simulated reply before the next submission is admitted
pub const REPLY_COOLDOWN_MS: u64 = 1000;

/// Required one-time-code length in digits
pub const OTP_LENGTH: usize = 6;

/// The fixed demo code the verification oracle accepts
pub const DEMO_OTP_CODE: &str = "123456";

/// Minimum phone number length in digits
pub const PHONE_MIN_DIGITS: usize = 6;

/// Simulated latency for dispatching a one-time code, in milliseconds
pub const OTP_SEND_LATENCY_MS: u64 = 1500;

/// Simulated latency for verifying a one-time code, in milliseconds
pub const OTP_VERIFY_LATENCY_MS: u64 = 1000;

/// Number of synthetic messages inserted by demo seeding
pub const SEED_MESSAGE_COUNT: usize = 50;

/// Demo seed timestamps are spread over this window into the past (30 min)
pub const SEED_TIME_SPREAD_MS: i64 = 30 * 60 * 1000;

/// Persistence namespace holding the chat state snapshot
pub const CHAT_NAMESPACE: &str = "chat-storage";

/// Persistence namespace holding the UI settings snapshot
pub const UI_NAMESPACE: &str = "ui-storage";

/// Country directory endpoint (best-effort; a static fallback covers failure)
pub const COUNTRY_DIRECTORY_URL: &str =
    "https://restcountries.com/v3.1/all?fields=name,cca2,idd,flag";
