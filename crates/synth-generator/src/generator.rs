//! Deterministic record generator.
//!
//! One [`StdRng`] is seeded from `seed_used` per request and threaded through
//! every value in a fixed order: records in index order `0..count`, and
//! within a record, fields in definition order. For each field, a nullable
//! optional field first draws its null decision from the stream, then the
//! value (builtin generator or expression) consumes the stream. The same
//! request and seed therefore always yield identical records.

use crate::cache::ExpressionCache;
use crate::error::GeneratorError;
use crate::plan::{build_plan, GenerationPlan};
use crate::registry::CustomTypeRegistry;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use synth_core::{GeneratedRecord, GenerationRequest, Value};
use tracing::{debug, info};

/// Probability that a nullable optional field is null.
pub const NULL_PROBABILITY: f64 = 0.1;

/// Result of a generation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationOutput {
    /// Seed that reproduces `records`
    pub seed_used: u64,
    pub records: Vec<GeneratedRecord>,
}

/// Record generator bound to a custom type registry.
///
/// Holds no per-request state, so one instance can serve concurrent
/// requests; each call owns its own random stream.
#[derive(Debug, Clone)]
pub struct DataGenerator {
    registry: Arc<CustomTypeRegistry>,
    cache: Arc<ExpressionCache>,
    max_count: Option<u64>,
}

impl DataGenerator {
    /// Create a generator with a default expression cache and no count limit.
    pub fn new(registry: Arc<CustomTypeRegistry>) -> Self {
        Self {
            registry,
            cache: Arc::new(ExpressionCache::default()),
            max_count: None,
        }
    }

    /// Share an existing expression cache.
    pub fn with_cache(mut self, cache: Arc<ExpressionCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Reject requests for more than `max_count` records.
    pub fn with_max_count(mut self, max_count: u64) -> Self {
        self.max_count = Some(max_count);
        self
    }

    pub fn registry(&self) -> &Arc<CustomTypeRegistry> {
        &self.registry
    }

    pub fn cache(&self) -> &Arc<ExpressionCache> {
        &self.cache
    }

    /// Validate a request without generating anything.
    pub fn validate(&self, request: &GenerationRequest) -> Result<GenerationPlan, GeneratorError> {
        build_plan(request, &self.registry, &self.cache, self.max_count)
    }

    /// Generate all records of `request`.
    ///
    /// Fails before producing anything if the request is invalid, and
    /// discards everything if any value fails to evaluate.
    pub fn generate(&self, request: &GenerationRequest) -> Result<GenerationOutput, GeneratorError> {
        let started = Instant::now();
        let records = self.records(request)?;
        let seed_used = records.seed_used();

        let records = records.collect::<Result<Vec<_>, _>>()?;
        info!(
            "Generated {} records ({} fields each, seed {}) in {:?}",
            records.len(),
            request.field_definitions.len(),
            seed_used,
            started.elapsed()
        );
        Ok(GenerationOutput { seed_used, records })
    }

    /// Validate `request` and return an iterator that generates its
    /// records lazily.
    pub fn records(&self, request: &GenerationRequest) -> Result<RecordIterator, GeneratorError> {
        let plan = self.validate(request)?;
        let seed_used = match request.seed {
            Some(seed) => seed,
            None => {
                let seed: u64 = rand::thread_rng().gen();
                info!("No seed supplied, using {}", seed);
                seed
            }
        };
        debug!(
            "Generating {} records with {} fields from seed {}",
            plan.count,
            plan.fields.len(),
            seed_used
        );
        Ok(RecordIterator::new(plan, seed_used))
    }
}

/// Iterator over the records of one validated request.
///
/// Yields `Err` at most once; iteration stops after the first failure.
pub struct RecordIterator {
    plan: GenerationPlan,
    rng: StdRng,
    seed_used: u64,
    next_index: u64,
    failed: bool,
}

impl RecordIterator {
    fn new(plan: GenerationPlan, seed_used: u64) -> Self {
        Self {
            plan,
            rng: StdRng::seed_from_u64(seed_used),
            seed_used,
            next_index: 0,
            failed: false,
        }
    }

    pub fn seed_used(&self) -> u64 {
        self.seed_used
    }

    fn generate_record(&mut self, index: u64) -> Result<GeneratedRecord, GeneratorError> {
        let mut record = GeneratedRecord::with_capacity(index, self.plan.fields.len());
        for field in &self.plan.fields {
            let value = if field.may_be_null && self.rng.gen_bool(NULL_PROBABILITY) {
                Value::Null
            } else {
                field.generate(&mut self.rng, &record)?
            };
            record.push(field.name.clone(), value);
        }
        Ok(record)
    }
}

impl Iterator for RecordIterator {
    type Item = Result<GeneratedRecord, GeneratorError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.next_index >= self.plan.count {
            return None;
        }
        let index = self.next_index;
        self.next_index += 1;

        let result = self.generate_record(index);
        if let Err(e) = &result {
            debug!("Generation stopped at record {}: {}", index, e);
            self.failed = true;
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            return (0, Some(0));
        }
        let remaining = (self.plan.count - self.next_index) as usize;
        (0, Some(remaining))
    }
}
