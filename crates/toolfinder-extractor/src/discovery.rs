//! Discovery service: prompt, chat, extract, cache

use crate::cache::BatchCache;
use crate::config::DiscoveryConfig;
use crate::error::ExtractorError;
use crate::parser::extract;
use crate::prompt::PromptBuilder;
use crate::types::{DiscoveryMetadata, DiscoveryRequest, DiscoveryResult, ExtractionTier};
use chrono::{SecondsFormat, Utc};
use std::fmt::Display;
use std::sync::Arc;
use std::time::Instant;
use tokio::time::timeout;
use toolfinder_domain::ChatTransport;
use tracing::{debug, info, warn};

/// Asks a chat service for tool listings and turns the replies into records
pub struct Discovery<T>
where
    T: ChatTransport,
{
    transport: Arc<T>,
    config: DiscoveryConfig,
    cache: BatchCache,
}

impl<T> Discovery<T>
where
    T: ChatTransport + Send + Sync + 'static,
    T::Error: Display,
{
    /// Create a new discovery service
    ///
    /// Fails with [`ExtractorError::Config`] when the configuration does not
    /// validate.
    pub fn new(transport: T, config: DiscoveryConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;

        let cache = BatchCache::new(config.cache_ttl(), config.cache_capacity);
        Ok(Self {
            transport: Arc::new(transport),
            config,
            cache,
        })
    }

    /// Configuration in use
    pub fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// Number of batches currently cached
    pub fn cached_batches(&self) -> usize {
        self.cache.len()
    }

    /// Forget every cached batch
    pub fn invalidate(&self) {
        self.cache.clear();
    }

    /// Discover tools
    ///
    /// Serves a fresh cached batch for the same prompt unless the request
    /// forces a refresh. An empty batch is returned as-is and not cached.
    pub async fn discover(
        &self,
        request: DiscoveryRequest,
    ) -> Result<DiscoveryResult, ExtractorError> {
        let start_time = Instant::now();
        let label = request.kind.label().to_string();

        let mut builder = PromptBuilder::new(request.kind.clone());
        if let Some(count) = request.count {
            builder = builder.with_count(count);
        }
        if let Some(category) = &request.category {
            builder = builder.with_category(category.as_str());
        }
        let prompt = builder.build();

        if !request.force_refresh {
            if let Some((records, tier)) = self.cache.get(&prompt) {
                info!("Serving {} cached {} tools", records.len(), label);
                return Ok(DiscoveryResult {
                    records,
                    metadata: self.metadata(label, 0, tier, true, start_time),
                });
            }
        }

        info!(
            "Discovering {} tools via {} (prompt length {})",
            request.kind,
            self.transport.name(),
            prompt.len()
        );

        let reply = timeout(self.config.chat_timeout(), self.call_transport(&prompt))
            .await
            .map_err(|_| ExtractorError::Timeout)??;

        let reply_length = reply.chars().count();
        debug!("Reply length: {} chars", reply_length);

        if reply_length > self.config.max_reply_length {
            return Err(ExtractorError::ReplyTooLong(
                reply_length,
                self.config.max_reply_length,
            ));
        }

        let extraction = extract(&reply);

        if extraction.records.is_empty() {
            warn!("Reply for {} contained no recognizable tools", label);
        } else {
            self.cache
                .insert(prompt, extraction.records.clone(), extraction.tier);
        }

        info!(
            "Discovery complete: {} tools via {} tier",
            extraction.records.len(),
            extraction.tier
        );

        Ok(DiscoveryResult {
            metadata: self.metadata(label, reply_length, extraction.tier, false, start_time),
            records: extraction.records,
        })
    }

    fn metadata(
        &self,
        kind: String,
        reply_length: usize,
        tier: ExtractionTier,
        from_cache: bool,
        start_time: Instant,
    ) -> DiscoveryMetadata {
        DiscoveryMetadata {
            kind,
            transport: self.transport.name().to_string(),
            reply_length,
            tier,
            from_cache,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }

    /// Call the chat transport and normalize the reply to plain text
    async fn call_transport(&self, prompt: &str) -> Result<String, ExtractorError> {
        let transport = Arc::clone(&self.transport);
        let prompt = prompt.to_string();

        // Transports are blocking, so keep them off the async workers
        tokio::task::spawn_blocking(move || {
            transport
                .chat(&prompt)
                .map(|reply| reply.into_text())
                .map_err(|e| ExtractorError::Chat(e.to_string()))
        })
        .await
        .map_err(|e| ExtractorError::Join(e.to_string()))?
    }
}
