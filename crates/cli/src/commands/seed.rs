//! Seed the database with sample complaints for local development.

use shakwa_core::{Phone, TrackingToken};
use shakwa_server::db::{self, ComplaintRepository};
use shakwa_server::models::NewComplaint;

use super::migrate::database_url;

const SAMPLE_COMPLAINTS: &[(&str, &str)] = &[
    ("انقطاع الماء", "انقطاع مستمر في الماء منذ ثلاثة أيام في منطقتنا"),
    ("تراكم النفايات", "لم يتم رفع النفايات من الحي منذ أسبوع"),
    ("حفرة في الشارع", "حفرة كبيرة في الشارع الرئيسي تسبب حوادث"),
    ("انقطاع الكهرباء", "انقطاع الكهرباء لساعات طويلة يوميًا"),
    ("إنارة معطلة", "أعمدة الإنارة في الشارع معطلة منذ شهر"),
];

const SAMPLE_NAMES: &[&str] = &["أحمد علي", "فاطمة حسن", "محمد كريم", "زينب جاسم", "علي حسين"];

/// Insert `count` sample complaints.
///
/// # Errors
///
/// Returns an error if the database is unreachable or an insert fails.
pub async fn run(count: usize) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let database_url = database_url()?;
    let pool = db::create_pool(&database_url).await?;

    let repo = ComplaintRepository::new(&pool);

    for i in 0..count {
        let (title, content) = SAMPLE_COMPLAINTS[i % SAMPLE_COMPLAINTS.len()];
        let name = SAMPLE_NAMES[i % SAMPLE_NAMES.len()];
        let phone = Phone::parse(&format!("077012345{:02}", i % 100))?;

        let new = NewComplaint {
            token: TrackingToken::generate(),
            name: name.to_string(),
            phone,
            email: None,
            title: title.to_string(),
            content: content.to_string(),
        };

        let complaint = repo.create(&new).await?;
        tracing::info!(token = %complaint.token, title = %complaint.title, "Seeded complaint");
    }

    tracing::info!(count, "Seeding complete");
    Ok(())
}
