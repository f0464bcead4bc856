#[cfg(debug_assertions)]
pub fn get_backend_url() -> &'static str {
    "http://localhost:5000"  // Development URL when running locally
}

#[cfg(not(debug_assertions))]
pub fn get_backend_url() -> &'static str {
    ""  // Same origin in production
}

pub fn lead_endpoint() -> String {
    format!("{}{}", get_backend_url(), LEAD_ENDPOINT_PATH)
}

pub const LEAD_ENDPOINT_PATH: &str = "/api/send-lead";

/// Local storage key holding the JSON array of liked gallery ids.
pub const LIKED_STORAGE_KEY: &str = "gallery-liked";

/// Header switches to its compact look once the page is scrolled past this offset.
pub const HEADER_SCROLL_THRESHOLD: f64 = 50.0;

pub const TOAST_VISIBLE_MS: u32 = 4_000;
pub const TOAST_HIDE_TRANSITION_MS: u32 = 300;

/// Only this project category shows the before/after block in its modal.
pub const BEFORE_AFTER_CATEGORY: &str = "renovation";

/// News sort keys without an offset are wall-clock time in Petrozavodsk (UTC+3).
pub const NEWS_UTC_OFFSET_SECS: i32 = 3 * 3600;

pub mod messages {
    pub const MISSING_NAME: &str = "Укажите имя";
    pub const MISSING_PHONE: &str = "Укажите телефон";
    pub const LEAD_SENT: &str = "Спасибо! Мы свяжемся с вами в ближайшее время.";
    pub const LEAD_FAILED: &str = "Не удалось отправить заявку. Попробуйте позже.";
    pub const NETWORK_ERROR: &str = "Ошибка сети. Попробуйте позже.";
}
