//! Diagnostic Aggregator
//!
//! Merges findings from every validator into one list:
//! 1. host severity overrides are applied per code
//! 2. diagnostics are ordered by declaration order, then code, then message
//! 3. exact duplicates are dropped
//!
//! The order depends only on the snapshot, so an unchanged snapshot always
//! yields an identical list.

use std::collections::HashMap;
use tracing::debug;
use wiring_domain::{Diagnostic, DiagnosticsConfig};

/// Stateless merger bound to one severity policy
pub struct DiagnosticAggregator<'a> {
    config: &'a DiagnosticsConfig,
    order: HashMap<&'a str, usize>,
}

impl<'a> DiagnosticAggregator<'a> {
    /// `declarations` lists identities in snapshot order
    pub fn new<I>(config: &'a DiagnosticsConfig, declarations: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let order = declarations
            .into_iter()
            .enumerate()
            .map(|(position, id)| (id, position))
            .collect();
        Self { config, order }
    }

    pub fn aggregate(&self, diagnostics: Vec<Diagnostic>) -> Vec<Diagnostic> {
        let total = diagnostics.len();
        let mut merged: Vec<Diagnostic> = diagnostics
            .into_iter()
            .map(|mut diagnostic| {
                diagnostic.severity = self
                    .config
                    .severity_for(&diagnostic.code, diagnostic.severity);
                diagnostic
            })
            .collect();

        merged.sort_by(|a, b| {
            self.position(&a.declaration)
                .cmp(&self.position(&b.declaration))
                .then_with(|| a.code.cmp(&b.code))
                .then_with(|| a.message.cmp(&b.message))
                .then_with(|| a.notes.cmp(&b.notes))
        });
        merged.dedup();

        debug!(
            total,
            kept = merged.len(),
            "Diagnostics aggregated"
        );
        merged
    }

    fn position(&self, declaration: &str) -> usize {
        self.order.get(declaration).copied().unwrap_or(usize::MAX)
    }
}
