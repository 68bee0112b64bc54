use std::sync::Arc;

use sqlx::PgPool;

use crate::config::AppConfig;
use crate::sms::OtpSender;

/// Shared handler context: the connection pool, the read-only configuration
/// and the code-delivery seam, all constructed once at startup.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<AppConfig>,
    pub sms: Arc<dyn OtpSender>,
}

impl AppState {
    pub fn new(pool: PgPool, config: Arc<AppConfig>, sms: Arc<dyn OtpSender>) -> Self {
        Self { pool, config, sms }
    }
}
