//! HTTP surface of the avatar backend

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod chat;
mod cors;
mod health;
mod payload;
mod voices;

use std::net::SocketAddr;
use std::sync::Arc;

use avatar_config::{Config, ServerConfig};
use avatar_llm::ReplyGenerator;
use avatar_media::MediaPipeline;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

/// Shared, read-only state behind every handler
pub struct AppState {
    pub replies: ReplyGenerator,
    pub media: MediaPipeline,
    /// Both API keys are present
    pub credentials_ready: bool,
}

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server and its providers from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the completion or speech provider cannot be built
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let replies = ReplyGenerator::from_config(&config.llm)
            .map_err(|e| anyhow::anyhow!("Failed to initialize completion provider: {e}"))?;

        let synthesizer = avatar_tts::from_config(&config.tts)
            .map_err(|e| anyhow::anyhow!("Failed to initialize speech provider: {e}"))?;

        let media = MediaPipeline::from_config(&config.media, synthesizer, config.tts.voice_id());

        let credentials_ready = config.credentials_ready();
        if !credentials_ready {
            tracing::warn!("API keys are not configured, /chat will answer with the configuration warning");
        }

        tracing::info!(
            completion = replies.provider_name(),
            speech = media.synthesizer().name(),
            fixtures = %media.fixtures().dir().display(),
            "providers initialized"
        );

        Ok(Self::with_state(
            &config.server,
            AppState {
                replies,
                media,
                credentials_ready,
            },
        ))
    }

    /// Build the server around already constructed components
    pub fn with_state(config: &ServerConfig, state: AppState) -> Self {
        let mut app = Router::new()
            .route("/", get(health::root_handler))
            .route("/voices", get(voices::voices_handler))
            .route("/chat", post(chat::chat_handler))
            .with_state(Arc::new(state));

        if config.health.enabled {
            app = app.route(&config.health.path, get(health::health_handler));
        }

        app = app.layer(TraceLayer::new_for_http());

        if let Some(ref cors_config) = config.cors {
            app = app.layer(cors::cors_layer(cors_config));
        }

        Self {
            router: app,
            listen_address: config.listen_address(),
        }
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}
