//! Rate limit demo endpoint.

/// Demo endpoint with a very tight limit so the 429 page is easy to trigger.
///
/// GET /spam
pub async fn spam() -> &'static str {
    "مسموح لك بثلاث محاولات في الدقيقة"
}
