/// Current UTC timestamp in milliseconds.
///
/// All persisted timestamps (`created_at`, `updated_at`) use this format.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
