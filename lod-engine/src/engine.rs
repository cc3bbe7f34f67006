//! [`CacheEngine`], the façade over compression, storage, and retrieval.
//!
//! Lock discipline: the entry store sits behind one `RwLock`. Embeddings are
//! always computed before any store lock is taken; ranking runs under a read
//! lock and touching results takes a short write lock afterwards. Config,
//! compressor, and store locks are never held while waiting on another of
//! them, except in `configure`, which takes config then compressor then store.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, Utc};
use lod_compression::{levels, HierarchicalCompressor};
use lod_core::errors::{ConfigError, RenderError};
use lod_core::traits::{IBatchScorer, IEmbedder, IRenderer};
use lod_core::{
    CacheEntry, CacheStats, CompressionStats, ConfigureOptions, EntryId, Granularity,
    IngestRequest, LodConfig, LodError, LodResult, RankedResult, RankedResults, RetrieveRequest,
    VisualAsset,
};
use lod_embeddings::EmbeddingService;
use lod_retrieval::SimilarityIndex;
use lod_storage::{expiry, EntryStore};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::metrics::CacheMetrics;
use crate::prefetch::{self, PrefetchJob, PrefetchQueue};
use crate::render::TileSvgRenderer;
use crate::scoring;

/// Shared engine state. Handles to it are cheap to clone.
pub(crate) struct EngineInner {
    config: RwLock<LodConfig>,
    store: RwLock<EntryStore>,
    compressor: RwLock<HierarchicalCompressor>,
    embeddings: EmbeddingService,
    index: SimilarityIndex,
    renderer: Arc<dyn IRenderer>,
    metrics: CacheMetrics,
    prefetch: PrefetchQueue,
}

/// Level-of-detail semantic cache.
///
/// Construct one per process (or per tenant) and share it by cloning; every
/// clone refers to the same store.
#[derive(Clone)]
pub struct CacheEngine {
    inner: Arc<EngineInner>,
}

/// Optional collaborators for a [`CacheEngine`].
pub struct CacheEngineBuilder {
    config: LodConfig,
    embedder: Arc<dyn IEmbedder>,
    renderer: Option<Arc<dyn IRenderer>>,
    scorer: Option<Arc<dyn IBatchScorer>>,
}

impl CacheEngineBuilder {
    pub fn renderer(mut self, renderer: Arc<dyn IRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn scorer(mut self, scorer: Arc<dyn IBatchScorer>) -> Self {
        self.scorer = Some(scorer);
        self
    }

    /// Validate the config against the embedder and assemble the engine.
    ///
    /// # Errors
    /// Any [`ConfigError`] from validation, or `DimensionMismatch` when
    /// `cache.embedding_dim` differs from the embedder's dimensionality.
    pub fn build(self) -> LodResult<CacheEngine> {
        self.config.validate()?;
        check_dimensions(self.config.cache.embedding_dim, self.embedder.dimensions())?;

        let index = match self.scorer {
            Some(scorer) => SimilarityIndex::new(scorer),
            None => SimilarityIndex::default(),
        };
        let renderer = self
            .renderer
            .unwrap_or_else(|| Arc::new(TileSvgRenderer) as Arc<dyn IRenderer>);

        info!(
            max_entries = self.config.cache.max_entries,
            hit_threshold = self.config.cache.hit_threshold,
            embedding_dim = self.config.cache.embedding_dim,
            embedder = self.embedder.name(),
            scorer = index.scorer_name(),
            renderer = renderer.name(),
            "cache engine initialized"
        );

        let inner = EngineInner {
            store: RwLock::new(EntryStore::new(self.config.cache.max_entries)),
            compressor: RwLock::new(HierarchicalCompressor::from_config(&self.config.cache)),
            embeddings: EmbeddingService::new(
                self.embedder,
                self.config.cache.embedding_cache_entries,
            ),
            index,
            renderer,
            metrics: CacheMetrics::default(),
            prefetch: PrefetchQueue::default(),
            config: RwLock::new(self.config),
        };
        Ok(CacheEngine {
            inner: Arc::new(inner),
        })
    }
}

fn check_dimensions(expected: usize, actual: usize) -> Result<(), ConfigError> {
    if expected != actual {
        return Err(ConfigError::DimensionMismatch { expected, actual });
    }
    Ok(())
}

fn excerpt(text: &str, max_chars: usize) -> String {
    levels::truncate_chars(text, max_chars).0.to_string()
}

impl CacheEngine {
    /// Engine with the default scorer and renderer.
    pub fn new(config: LodConfig, embedder: Arc<dyn IEmbedder>) -> LodResult<Self> {
        Self::builder(config, embedder).build()
    }

    pub fn builder(config: LodConfig, embedder: Arc<dyn IEmbedder>) -> CacheEngineBuilder {
        CacheEngineBuilder {
            config,
            embedder,
            renderer: None,
            scorer: None,
        }
    }

    /// Store `request.text` at every level, or return the cached entry.
    ///
    /// A live entry with the same id and `prediction_confidence` above the hit
    /// threshold is touched and returned without recomputation. Otherwise the
    /// text is embedded (no lock held), compressed, scored, and inserted,
    /// evicting the lowest-value entry when full.
    ///
    /// # Errors
    /// `IngestFailed` when the embedder fails; `CapacityExhausted` when the
    /// store cannot make room.
    pub fn ingest(&self, request: IngestRequest) -> LodResult<CacheEntry> {
        let span = crate::ingest_span!(request.text.len());
        let _guard = span.enter();

        let IngestRequest { text, context } = request;
        let id = EntryId::from_content(&text, &context);
        let config = self.config();
        let ttl = expiry::ttl_from_secs(config.cache.ttl_secs);
        let now = Utc::now();

        if let Some(hit) = self.inner.touch_if_hit(&id, config.cache.hit_threshold, ttl, now) {
            self.inner.metrics.record_hit();
            debug!(id = %id, access_count = hit.access_count, "cache hit");
            return Ok(hit);
        }
        self.inner.metrics.record_miss();

        let (kept, truncated) = levels::truncate_chars(&text, config.cache.max_text_len);
        if truncated {
            debug!(
                id = %id,
                max_text_len = config.cache.max_text_len,
                "source text truncated"
            );
        }
        let spans = Granularity::ALL.map(|g| levels::span(kept, g));
        let embeddings = self.inner.embeddings.embed_levels(spans).map_err(|e| {
            warn!(
                id = %id,
                provider = self.inner.embeddings.provider_name(),
                error = %e,
                "ingest failed in embedder"
            );
            LodError::IngestFailed {
                reason: e.to_string(),
            }
        })?;

        let compressed = self.inner.read_compressor().compress(kept, &embeddings);
        let compression_stats = CompressionStats::compute(text.len(), &compressed, truncated);
        let entry = CacheEntry {
            id: id.clone(),
            source_text: kept.to_string(),
            compressed,
            embeddings,
            created_at: now,
            last_accessed: now,
            access_count: 0,
            prediction_confidence: scoring::prediction_confidence(&text, &context, &config.scoring),
            retrieval_priority: scoring::retrieval_priority(&text, &context, &config.scoring),
            compression_stats,
        };

        // Expired entries are purged off the write path when a worker runs.
        let purge_inline = ttl.is_some() && !self.inner.enqueue(PrefetchJob::Housekeeping);
        let outcome = {
            let mut store = self.inner.write_store();
            if purge_inline {
                let expired = store.purge_expired(ttl, now);
                self.inner.metrics.record_expirations(expired.len());
            }
            store.insert(entry.clone()).map_err(|e| {
                warn!(id = %id, error = %e, "store rejected entry");
                LodError::CapacityExhausted
            })?
        };
        self.inner.metrics.record_evictions(outcome.evicted.len());

        debug!(
            id = %id,
            compressed_bytes = entry.compression_stats.compressed_size,
            ratio = entry.compression_stats.ratio,
            confidence = %entry.prediction_confidence,
            priority = %entry.retrieval_priority,
            replaced = outcome.replaced,
            evicted = outcome.evicted.len(),
            "ingested entry"
        );
        Ok(entry)
    }

    /// Rank live entries against `request.query` at `request.level`.
    ///
    /// Empty store, blank query, or `top_k == 0` return an empty result
    /// without embedding anything. Returned entries are touched. Render
    /// failures mark the result partial instead of failing the call.
    ///
    /// # Errors
    /// The embedder's error when the query cannot be embedded.
    pub fn retrieve(&self, request: RetrieveRequest) -> LodResult<RankedResults> {
        let config = self.config();
        let top_k = request.top_k.unwrap_or(config.cache.default_top_k);
        let span = crate::retrieve_span!(request.level, top_k);
        let _guard = span.enter();

        if top_k == 0 || request.query.trim().is_empty() || self.inner.read_store().is_empty() {
            return Ok(RankedResults::empty());
        }
        self.inner.metrics.record_retrieval();

        let level = request.level;
        let query = self.inner.embeddings.embed(&request.query, level)?;
        let ttl = expiry::ttl_from_secs(config.cache.ttl_secs);
        let now = Utc::now();

        let (mut results, level_bytes, saw_expired) = {
            let store = self.inner.read_store();
            let mut saw_expired = false;
            let candidates: Vec<&CacheEntry> = store
                .values()
                .filter(|entry| {
                    let expired = expiry::is_expired(*entry, ttl, now);
                    saw_expired |= expired;
                    !expired
                })
                .filter(|entry| {
                    request
                        .structural_filter
                        .as_ref()
                        .map_or(true, |keep| keep(*entry))
                })
                .collect();

            let ranked = self.inner.index.rank(&query, &candidates, top_k, level);
            let mut results = Vec::with_capacity(ranked.len());
            let mut level_bytes = Vec::new();
            for (id, score) in ranked {
                let Some(entry) = store.get(&id) else {
                    continue;
                };
                if request.render {
                    level_bytes.push(entry.compressed.level(level).to_vec());
                }
                results.push(RankedResult {
                    id,
                    score,
                    level,
                    excerpt: excerpt(&entry.source_text, config.cache.excerpt_len),
                    retrieval_priority: entry.retrieval_priority.value(),
                    access_count: entry.access_count,
                    visual: None,
                });
            }
            (results, level_bytes, saw_expired)
        };

        {
            let mut store = self.inner.write_store();
            for result in &mut results {
                if let Some(touched) = store.touch_at(&result.id, now) {
                    result.access_count = touched.access_count;
                }
            }
        }

        let mut partial = false;
        if request.render {
            for (result, bytes) in results.iter_mut().zip(&level_bytes) {
                match self.inner.renderer.render(level, bytes) {
                    Ok(asset) => result.visual = Some(asset),
                    Err(e) => {
                        partial = true;
                        self.inner.metrics.record_render_failure();
                        warn!(
                            id = %result.id,
                            renderer = self.inner.renderer.name(),
                            error = %e,
                            "render failed, returning partial results"
                        );
                    }
                }
            }
        }

        if config.prefetch.enabled {
            self.inner.enqueue(PrefetchJob::WarmQuery {
                query: request.query.clone(),
                skip: level,
            });
            if saw_expired {
                self.inner.enqueue(PrefetchJob::Housekeeping);
            }
        }

        debug!(level = %level, returned = results.len(), partial, "retrieve complete");
        Ok(RankedResults { results, partial })
    }

    /// Point-in-time totals over live entries plus lifetime counters.
    pub fn stats(&self) -> CacheStats {
        let mut stats = CacheStats::default();
        {
            let store = self.inner.read_store();
            let mut ratio_sum = 0.0;
            for entry in store.values() {
                stats.total_original_bytes += entry.compression_stats.original_size as u64;
                stats.total_compressed_bytes += entry.compression_stats.compressed_size as u64;
                ratio_sum += entry.compression_stats.ratio;
            }
            stats.entries = store.len();
            if stats.entries > 0 {
                stats.avg_ratio = ratio_sum / stats.entries as f64;
            }
        }
        self.inner.metrics.fill(&mut stats);
        stats
    }

    /// Drop every entry and every memoized embedding. Counters are kept.
    pub fn clear(&self) -> usize {
        let removed = self.inner.write_store().clear();
        self.inner.embeddings.clear_cache();
        info!(removed, "cache cleared");
        removed
    }

    /// Evict the lowest-value entry. `None` when empty.
    pub fn evict_one(&self) -> Option<EntryId> {
        let victim = self.inner.write_store().evict_one();
        if victim.is_some() {
            self.inner.metrics.record_evictions(1);
        }
        victim
    }

    /// Apply a partial config update. Nothing changes when validation fails.
    ///
    /// Lowering `max_entries` evicts immediately; new `unit_capacities` apply
    /// to entries ingested afterwards.
    ///
    /// # Errors
    /// [`ConfigError`] for invalid values or an `embedding_dim` the embedder
    /// cannot produce.
    pub fn configure(&self, options: ConfigureOptions) -> LodResult<()> {
        let mut config = self.inner.config.write().unwrap_or_else(PoisonError::into_inner);
        let next = config.merged(&options)?;
        check_dimensions(next.cache.embedding_dim, self.inner.embeddings.dimensions())?;

        if next.cache.unit_capacities != config.cache.unit_capacities {
            *self.inner.write_compressor() = HierarchicalCompressor::from_config(&next.cache);
        }
        if next.cache.max_entries != config.cache.max_entries {
            let evicted = self
                .inner
                .write_store()
                .set_max_entries(next.cache.max_entries);
            self.inner.metrics.record_evictions(evicted.len());
        }

        info!(
            max_entries = next.cache.max_entries,
            hit_threshold = next.cache.hit_threshold,
            unit_capacities = ?next.cache.unit_capacities,
            "cache reconfigured"
        );
        *config = next;
        Ok(())
    }

    /// Current configuration.
    pub fn config(&self) -> LodConfig {
        self.inner.read_config().clone()
    }

    /// Read an entry without touching it.
    pub fn get(&self, id: &EntryId) -> Option<CacheEntry> {
        self.inner.read_store().get(id).cloned()
    }

    /// Clones of every live entry, ordered by id.
    pub fn snapshot(&self) -> Vec<CacheEntry> {
        let mut entries: Vec<CacheEntry> = self.inner.read_store().values().cloned().collect();
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        entries
    }

    pub fn len(&self) -> usize {
        self.inner.read_store().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read_store().is_empty()
    }

    /// Visualize one level of a stored entry.
    ///
    /// # Errors
    /// `EntryNotFound` for unknown ids, `Render` when the renderer fails.
    pub fn render(&self, id: &EntryId, level: Granularity) -> LodResult<VisualAsset> {
        let bytes = self
            .inner
            .read_store()
            .get(id)
            .map(|entry| entry.compressed.level(level).to_vec())
            .ok_or_else(|| LodError::EntryNotFound { id: id.to_string() })?;
        let asset = self.inner.renderer.render(level, &bytes).map_err(|e: RenderError| {
            self.inner.metrics.record_render_failure();
            e
        })?;
        Ok(asset)
    }

    /// Whether `text` already has a memoized embedding at `level`.
    pub fn is_embedding_cached(&self, text: &str, level: Granularity) -> bool {
        self.inner.embeddings.is_cached(text, level)
    }

    /// Remove expired entries now. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        self.inner.purge_expired(Utc::now())
    }

    /// Queue a housekeeping pass on the prefetch worker.
    pub fn schedule_housekeeping(&self) -> bool {
        self.inner.enqueue(PrefetchJob::Housekeeping)
    }

    /// Spawn the prefetch worker on `handle`. Returns `None` when prefetch is
    /// disabled. Starting again replaces the previous worker's queue.
    pub fn start_prefetch(&self, handle: &Handle) -> Option<JoinHandle<()>> {
        let config = self.config();
        if !config.prefetch.enabled {
            debug!("prefetch disabled, worker not started");
            return None;
        }
        let jobs = self.inner.prefetch.open(config.prefetch.queue_capacity);
        let engine = Arc::downgrade(&self.inner);
        info!(
            queue_capacity = config.prefetch.queue_capacity,
            "prefetch worker started"
        );
        Some(handle.spawn(prefetch::run_worker(engine, jobs)))
    }

    /// Stop accepting prefetch jobs. The worker finishes what is queued and
    /// exits. Foreground operations keep working.
    pub fn close(&self) {
        if self.inner.prefetch.close() {
            info!("prefetch queue closed");
        }
    }
}

impl EngineInner {
    fn read_config(&self) -> RwLockReadGuard<'_, LodConfig> {
        self.config.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_store(&self) -> RwLockReadGuard<'_, EntryStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_store(&self) -> RwLockWriteGuard<'_, EntryStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn read_compressor(&self) -> RwLockReadGuard<'_, HierarchicalCompressor> {
        self.compressor.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_compressor(&self) -> RwLockWriteGuard<'_, HierarchicalCompressor> {
        self.compressor.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Touch and clone `id` if it is live and confident enough to serve.
    fn touch_if_hit(
        &self,
        id: &EntryId,
        hit_threshold: f64,
        ttl: Option<Duration>,
        now: DateTime<Utc>,
    ) -> Option<CacheEntry> {
        let mut store = self.write_store();
        let entry = store.get(id)?;
        if expiry::is_expired(entry, ttl, now)
            || entry.prediction_confidence.value() <= hit_threshold
        {
            return None;
        }
        store.touch_at(id, now).cloned()
    }

    fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let ttl = expiry::ttl_from_secs(self.read_config().cache.ttl_secs);
        let purged = self.write_store().purge_expired(ttl, now);
        self.metrics.record_expirations(purged.len());
        purged.len()
    }

    fn enqueue(&self, job: PrefetchJob) -> bool {
        self.prefetch.enqueue(job, &self.metrics)
    }

    pub(crate) fn run_prefetch_job(&self, job: PrefetchJob) {
        let span = crate::prefetch_span!(job.kind());
        let _guard = span.enter();
        match job {
            PrefetchJob::WarmQuery { query, skip } => {
                let levels: Vec<Granularity> =
                    Granularity::ALL.into_iter().filter(|&g| g != skip).collect();
                let computed = self.embeddings.warm(&query, &levels);
                debug!(computed, "warmed query embeddings");
            }
            PrefetchJob::Housekeeping => {
                let purged = self.purge_expired(Utc::now());
                debug!(purged, "housekeeping pass complete");
            }
        }
    }
}
