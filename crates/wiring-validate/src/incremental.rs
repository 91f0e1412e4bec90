//! Incremental analysis
//!
//! Keeps the local-pass result of every declaration keyed by identity and a
//! fingerprint of its inputs (the declaration, every in-scope base in its
//! chain, and the analysis config). Only declarations whose fingerprint
//! changed are re-evaluated; the contract index and every cross-declaration
//! check are always rebuilt.

use crate::analyzer::{AnalysisOutput, Analyzer, DeclarationAnalysis};
use crate::index::ImplementationResolver;
use crate::model::DeclarationSet;
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use tracing::debug;
use wiring_domain::{AnalysisConfig, ClassDeclaration, Result};

/// Work counters of the most recent pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Declarations whose local pass ran
    pub evaluated: usize,
    /// Declarations served from the cache
    pub reused: usize,
}

struct CacheEntry {
    fingerprint: u64,
    analysis: DeclarationAnalysis,
}

/// Analyzer that reuses per-declaration results across passes
pub struct IncrementalAnalyzer {
    analyzer: Analyzer,
    cache: HashMap<String, CacheEntry>,
    last_pass: PassStats,
}

impl IncrementalAnalyzer {
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer,
            cache: HashMap::new(),
            last_pass: PassStats::default(),
        }
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    pub fn last_pass(&self) -> PassStats {
        self.last_pass
    }

    /// Drop every cached result
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn analyze(&mut self, inputs: &[ClassDeclaration]) -> Result<AnalysisOutput> {
        self.run(inputs, None)
    }

    pub fn analyze_with_resolver(
        &mut self,
        inputs: &[ClassDeclaration],
        resolver: &dyn ImplementationResolver,
    ) -> Result<AnalysisOutput> {
        self.run(inputs, Some(resolver))
    }

    fn run(
        &mut self,
        inputs: &[ClassDeclaration],
        resolver: Option<&dyn ImplementationResolver>,
    ) -> Result<AnalysisOutput> {
        let config = self.analyzer.config();
        let set = DeclarationSet::build(inputs, config)?;
        let fingerprints: Vec<u64> = (0..set.len())
            .map(|index| fingerprint(&set, inputs, index, config))
            .collect();

        let stale: Vec<usize> = fingerprints
            .iter()
            .enumerate()
            .filter(|(index, fingerprint)| {
                self.cache
                    .get(&inputs[*index].id)
                    .is_none_or(|entry| entry.fingerprint != **fingerprint)
            })
            .map(|(index, _)| index)
            .collect();

        let stats = PassStats {
            evaluated: stale.len(),
            reused: set.len() - stale.len(),
        };
        let fresh = self.analyzer.local_pass(&set, stale);
        for analysis in fresh {
            let fingerprint = fingerprints[analysis.index];
            self.cache.insert(
                analysis.id.clone(),
                CacheEntry {
                    fingerprint,
                    analysis,
                },
            );
        }
        self.cache.retain(|id, _| set.index_of(id).is_some());

        let mut analyses = Vec::with_capacity(set.len());
        for declaration in set.iter() {
            let entry = self.cache.get(&declaration.id).ok_or_else(|| {
                wiring_domain::Error::internal(format!(
                    "no cached analysis for {}",
                    declaration.id
                ))
            })?;
            analyses.push(DeclarationAnalysis {
                index: declaration.index,
                ..entry.analysis.clone()
            });
        }

        debug!(
            evaluated = stats.evaluated,
            reused = stats.reused,
            "Incremental local pass"
        );
        self.last_pass = stats;
        Ok(self.analyzer.global_pass(&set, analyses, resolver))
    }
}

/// Stable hash of everything a declaration's local pass reads
fn fingerprint(
    set: &DeclarationSet,
    inputs: &[ClassDeclaration],
    index: usize,
    config: &AnalysisConfig,
) -> u64 {
    let mut hasher = DefaultHasher::new();
    config.hash(&mut hasher);
    inputs[index].hash(&mut hasher);
    for base in set.ancestors(index) {
        inputs[base.index].hash(&mut hasher);
    }
    hasher.finish()
}
