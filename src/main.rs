use std::sync::Arc;

use anyhow::Context;
use secrecy::ExposeSecret;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gatekeeper_bot::adapters::http::webhook::WEBHOOK_PATH;
use gatekeeper_bot::adapters::http::{webhook_router, WebhookAppState};
use gatekeeper_bot::adapters::telegram::{
    TelegramBotApi, TelegramConfig, UpdatePoller, UpdateRouter,
};
use gatekeeper_bot::application::handlers::{CheckMembershipHandler, InteractionDispatcher};
use gatekeeper_bot::config::{AppConfig, LogFormat, LoggingConfig};
use gatekeeper_bot::domain::gate::PromptRenderer;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging);

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "refusing to start with invalid configuration");
        std::process::exit(1);
    }

    let group = config.gate.group_reference()?;
    let api = Arc::new(
        TelegramBotApi::new(TelegramConfig::from_bot_config(&config.bot))
            .context("failed to build Bot API client")?,
    );

    let bot_username = match api.get_me().await {
        Ok(me) => {
            tracing::info!(bot_id = me.id, username = ?me.username, "bot identity confirmed");
            me.username
        }
        Err(e) => {
            tracing::error!(error = %e, "getMe failed, check the bot token");
            None
        }
    };

    let gate = CheckMembershipHandler::new(api.clone(), group.clone())
        .with_timeout(config.gate.oracle_timeout());
    let dispatcher = Arc::new(InteractionDispatcher::new(
        gate,
        PromptRenderer::new(group.clone()),
        api.clone(),
    ));
    let router =
        Arc::new(UpdateRouter::new(dispatcher, api.clone()).with_bot_username(bot_username));

    tracing::info!(group = %group, mode = ?config.bot.mode, "gatekeeper starting");

    if config.is_webhook_mode() {
        serve_webhook(&config, api, router).await
    } else {
        run_polling(&config, api, router).await
    }
}

async fn run_polling(
    config: &AppConfig,
    api: Arc<TelegramBotApi>,
    router: Arc<UpdateRouter>,
) -> anyhow::Result<()> {
    if let Err(e) = api.delete_webhook().await {
        tracing::warn!(error = %e, "deleteWebhook failed, polling may receive nothing");
    }

    UpdatePoller::new(api, router, config.bot.poll_timeout())
        .run(shutdown_signal())
        .await;

    Ok(())
}

async fn serve_webhook(
    config: &AppConfig,
    api: Arc<TelegramBotApi>,
    router: Arc<UpdateRouter>,
) -> anyhow::Result<()> {
    let public_url = config
        .server
        .public_url
        .as_deref()
        .context("webhook mode requires a public URL")?;
    let webhook_url = format!("{}{}", public_url.trim_end_matches('/'), WEBHOOK_PATH);

    let secret = config.server.secret_token.as_ref().map(|s| s.expose_secret().as_str());
    api.set_webhook(&webhook_url, secret)
        .await
        .context("setWebhook failed")?;
    tracing::info!(url = %webhook_url, "webhook registered");

    let app = webhook_router()
        .with_state(WebhookAppState {
            router,
            secret_token: config.server.secret_token.clone(),
        })
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(config.server.request_timeout())),
        );

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "webhook listener started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("webhook server failed")?;

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let registry = tracing_subscriber::registry().with(filter);
    match logging.format {
        LogFormat::Json => registry.with(fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(fmt::layer()).init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
