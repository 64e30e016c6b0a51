//! Pipeline construction from validated configuration.
//!
//! # Responsibilities
//! - Build one handler per running logger definition
//! - Skip misconfigured loggers without aborting startup
//! - Hand the host a shared dispatcher plus its shutdown guard
//!
//! # Design Decisions
//! - Fail fast per logger, never per process: a bad endpoint disables
//!   one sink, not the pipeline
//! - Handler settings are fixed at construction; reconfiguration means
//!   calling bootstrap again with a new config

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::config::schema::{LoggerConfig, RelayConfig, SinkConfig, TraceFormat};
use crate::dispatch::Dispatcher;
use crate::handler::{
    ArchiveHandler, BatchEncoder, BufferedHttpHandler, ConsoleHandler, EventStore, Handler,
    JsonLinesEncoder,
};
use crate::lifecycle::shutdown::ShutdownGuard;
use crate::observability::metrics as diag;
use crate::trace::{GenericJsonEncoder, Sampler, SpanEncoder, SpanHandler, ZipkinJsonEncoder};
use crate::transport::{HttpTransport, TransportError};

/// How the host process was invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    /// Long-lived service invocation.
    Service,
    /// Command-line invocation; combined with the `unbuffered_cli`
    /// config flag this forces direct delivery.
    Cli,
}

/// Host-supplied collaborators for bootstrap.
pub struct BootstrapOptions {
    pub mode: ExecutionMode,
    /// Store backing any archive logger. Archive loggers are skipped
    /// when absent.
    pub archive_store: Option<Box<dyn EventStore>>,
}

impl Default for BootstrapOptions {
    fn default() -> Self {
        Self {
            mode: ExecutionMode::Service,
            archive_store: None,
        }
    }
}

/// Why one logger definition could not be turned into a handler.
#[derive(Debug, Error)]
enum BuildError {
    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] url::ParseError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("sampling rate out of range: {0}")]
    Sampling(#[from] crate::trace::sampling::InvalidRate),

    #[error("no archive store was provided")]
    MissingStore,
}

fn build_handler(
    logger: &LoggerConfig,
    buffer_size: usize,
    force_unbuffered: bool,
    archive_store: &mut Option<Box<dyn EventStore>>,
) -> Result<Box<dyn Handler>, BuildError> {
    match &logger.sink {
        SinkConfig::Console => Ok(Box::new(ConsoleHandler::new())),

        SinkConfig::Archive => {
            let store = archive_store.take().ok_or(BuildError::MissingStore)?;
            Ok(Box::new(ArchiveHandler::new(store)))
        }

        SinkConfig::Http {
            endpoint,
            verb,
            buffered,
            timeout_secs,
        } => {
            let encoder = JsonLinesEncoder;
            let transport = HttpTransport::new(
                Url::parse(endpoint)?,
                *verb,
                encoder.content_type(),
                Duration::from_secs(*timeout_secs),
            )?;
            Ok(Box::new(BufferedHttpHandler::new(
                logger.level,
                *buffered && !force_unbuffered,
                buffer_size,
                Box::new(encoder),
                Box::new(transport),
            )))
        }

        SinkConfig::Tracing {
            endpoint,
            sampling,
            format,
            service,
            timeout_secs,
        } => {
            let sampler = Sampler::new(*sampling)?;
            let encoder: Box<dyn SpanEncoder> = match format {
                TraceFormat::Generic => Box::new(GenericJsonEncoder),
                TraceFormat::Zipkin => Box::new(ZipkinJsonEncoder::new(service.clone())),
            };
            let transport = HttpTransport::new(
                Url::parse(endpoint)?,
                Default::default(),
                encoder.content_type(),
                Duration::from_secs(*timeout_secs),
            )?;
            Ok(Box::new(SpanHandler::new(
                logger.level,
                !force_unbuffered,
                buffer_size,
                sampler,
                encoder,
                Box::new(transport),
            )))
        }
    }
}

/// Build the dispatcher and its shutdown guard from a validated config.
///
/// Registration order follows the config's logger order.
pub fn bootstrap(
    config: &RelayConfig,
    options: BootstrapOptions,
) -> (Arc<Dispatcher>, ShutdownGuard) {
    let force_unbuffered = config.unbuffered_cli && options.mode == ExecutionMode::Cli;
    let mut archive_store = options.archive_store;

    let mut builder = Dispatcher::builder();
    for logger in &config.loggers {
        if !logger.running {
            tracing::debug!(logger = %logger.name, "skipping stopped logger");
            continue;
        }
        match build_handler(logger, config.buffer_size, force_unbuffered, &mut archive_store) {
            Ok(handler) => {
                builder = builder.register(&logger.name, logger.level, logger.bubble, handler);
            }
            Err(e) => {
                diag::record_logger_rejected();
                tracing::warn!(
                    logger = %logger.name,
                    id = %logger.id,
                    error = %e,
                    "skipping misconfigured logger"
                );
            }
        }
    }

    let dispatcher = Arc::new(builder.build());
    let guard = ShutdownGuard::new(dispatcher.clone());
    tracing::info!(
        handlers = dispatcher.handler_count(),
        buffer_size = config.buffer_size,
        "relay pipeline ready"
    );
    (dispatcher, guard)
}
