//! Memory-budgeted worker pool for concurrent hashing.
//!
//! Each derivation runs on tokio's blocking thread pool, never on the task
//! that accepted the request. Admission is bounded twice:
//!
//! - a memory semaphore holding one permit per KiB of the budget; a request
//!   takes `memory` permits, so the sum of in-flight memory costs never
//!   exceeds the budget
//! - a worker semaphore capping the number of derivations running at once
//!
//! A request whose memory cost exceeds the whole budget takes the whole
//! budget and runs alone.
//!
//! Once admitted, a derivation runs to completion. Dropping the returned
//! future does not stop it; the permits are released when the blocking
//! task finishes. Callers that need a deadline wrap the call in
//! `tokio::time::timeout` and discard late results.

use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::config::HashingConfig;
use crate::encoder::HashResult;
use crate::engine::{Argon2Engine, KdfEngine};
use crate::error::{BridgeError, Result};
use crate::hasher::hash_resolved;
use crate::resolver::resolve;

/// Default memory budget: 256 MiB, eight default-cost hashes at once.
pub const DEFAULT_MEMORY_BUDGET_KIB: u32 = 256 * 1024;

/// Pool sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Total KiB that in-flight derivations may use
    pub memory_budget_kib: u32,
    /// Maximum derivations running at once
    pub max_workers: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            memory_budget_kib: DEFAULT_MEMORY_BUDGET_KIB,
            max_workers: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        }
    }
}

/// Concurrent hashing front end.
///
/// Cheap to clone; clones share the same budget.
pub struct HashPool<E: KdfEngine + 'static = Argon2Engine> {
    engine: Arc<E>,
    memory: Arc<Semaphore>,
    workers: Arc<Semaphore>,
    config: PoolConfig,
}

impl<E: KdfEngine + 'static> Clone for HashPool<E> {
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            memory: Arc::clone(&self.memory),
            workers: Arc::clone(&self.workers),
            config: self.config,
        }
    }
}

impl HashPool<Argon2Engine> {
    /// Pool backed by the default Argon2 engine.
    pub fn new(config: PoolConfig) -> Self {
        Self::with_engine(Argon2Engine, config)
    }
}

impl<E: KdfEngine + 'static> HashPool<E> {
    /// Pool backed by a caller-supplied engine.
    ///
    /// Zero values in `config` are raised to one so the pool can always
    /// make progress.
    pub fn with_engine(engine: E, config: PoolConfig) -> Self {
        let config = PoolConfig {
            memory_budget_kib: config.memory_budget_kib.max(1),
            max_workers: config.max_workers.max(1),
        };
        Self {
            engine: Arc::new(engine),
            memory: Arc::new(Semaphore::new(config.memory_budget_kib as usize)),
            workers: Arc::new(Semaphore::new(config.max_workers)),
            config,
        }
    }

    pub fn config(&self) -> PoolConfig {
        self.config
    }

    /// KiB of the budget not held by in-flight derivations.
    pub fn available_memory_kib(&self) -> usize {
        self.memory.available_permits()
    }

    /// Hash one configuration on the blocking pool.
    ///
    /// Validation runs on the calling task, so bad input fails without
    /// waiting for admission.
    pub async fn hash(&self, config: HashingConfig) -> Result<HashResult> {
        let request = resolve(&config)?;
        drop(config);

        let weight = request.costs.memory.clamp(1, self.config.memory_budget_kib);
        let queued = Instant::now();

        let memory_permit = Arc::clone(&self.memory)
            .acquire_many_owned(weight)
            .await
            .map_err(|_| BridgeError::EngineRejected("Hash pool is closed".to_string()))?;
        let worker_permit = Arc::clone(&self.workers)
            .acquire_owned()
            .await
            .map_err(|_| BridgeError::EngineRejected("Hash pool is closed".to_string()))?;

        tracing::debug!(
            weight_kib = weight,
            waited_ms = queued.elapsed().as_millis() as u64,
            "admitted hashing request"
        );

        let engine = Arc::clone(&self.engine);
        tokio::task::spawn_blocking(move || {
            let _permits = (memory_permit, worker_permit);
            hash_resolved(engine.as_ref(), &request)
        })
        .await
        .map_err(|e| BridgeError::EngineRejected(format!("Hashing worker failed: {}", e)))?
    }

    /// Hash several configurations concurrently.
    ///
    /// Results come back in input order, one per configuration.
    pub async fn hash_many(&self, configs: Vec<HashingConfig>) -> Vec<Result<HashResult>> {
        let total = configs.len();
        let started = Instant::now();
        let mut tasks = JoinSet::new();
        for (index, config) in configs.into_iter().enumerate() {
            let pool = self.clone();
            tasks.spawn(async move { (index, pool.hash(config).await) });
        }

        let mut results: Vec<Option<Result<HashResult>>> = (0..total).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => results[index] = Some(result),
                Err(e) => tracing::warn!(error = %e, "hashing task did not complete"),
            }
        }

        tracing::info!(
            total,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "batch finished"
        );

        results
            .into_iter()
            .map(|slot| {
                slot.unwrap_or_else(|| {
                    Err(BridgeError::EngineRejected(
                        "Hashing task did not complete".to_string(),
                    ))
                })
            })
            .collect()
    }
}
