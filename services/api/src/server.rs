use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use innkeep::config::AppConfig;
use innkeep::contact::{NotificationDispatcher, SmtpMailer};
use innkeep::error::AppError;
use innkeep::settings::SettingsService;
use innkeep::telemetry;
use tracing::info;

use crate::cli::ServeArgs;
use crate::guard::AdminGuard;
use crate::infra::{AppState, InMemorySettingsStore};
use crate::limit::ContactRateLimiter;
use crate::routes;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let mailer = Arc::new(SmtpMailer::from_config(&config.mail)?);
    let dispatcher = Arc::new(NotificationDispatcher::new(
        mailer,
        config.mail.admin_address.clone(),
        config.mail.front_desk_phone.clone(),
    ));
    let settings = Arc::new(SettingsService::new(Arc::new(
        InMemorySettingsStore::default(),
    )));
    let limiter = Arc::new(ContactRateLimiter::new(&config.rate_limit));
    let admin = Arc::new(AdminGuard {
        token: config.admin_token.clone(),
    });

    let app = routes::api_router(dispatcher, settings, limiter, admin)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "guest services backend ready");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
