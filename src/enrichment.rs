//! Per-row hostname enrichment.
//!
//! Every pending lookup of a render pass runs as its own future; they are
//! polled together and yield [`HostnameUpdate`]s in completion order, which
//! need not match row order. A bounded number run at once. One lookup's
//! failure only affects its own row: the resolver already turned it into the
//! raw address.

use std::sync::Arc;

use futures::stream::{FuturesUnordered, Stream, StreamExt};
use log::{debug, info};
use tokio::sync::Semaphore;

use crate::page::{DashboardPage, HostnameUpdate, UpdateOutcome};
use crate::render::PendingLookup;
use crate::resolver::HostnameResolver;

/// Counts from one enrichment run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentStats {
    /// Cells filled in
    pub applied: usize,
    /// Completions dropped because a newer render replaced their rows
    pub stale: usize,
    /// Completions whose row no longer exists
    pub unknown: usize,
}

/// Starts one lookup per pending row, at most `max_concurrent` at a time.
///
/// Duplicate addresses are looked up once per row.
pub fn lookup_stream(
    resolver: &HostnameResolver,
    pending: Vec<PendingLookup>,
    max_concurrent: usize,
) -> impl Stream<Item = HostnameUpdate> + Unpin {
    let semaphore = Arc::new(Semaphore::new(max_concurrent.max(1)));

    pending
        .into_iter()
        .map(|lookup| {
            let resolver = resolver.clone();
            let semaphore = Arc::clone(&semaphore);
            async move {
                // A closed semaphore only means no limit applies any more
                let _permit = semaphore.acquire_owned().await.ok();
                let hostname = resolver.resolve(&lookup.address).await;
                debug!(
                    "Resolved {} ({} row {}) -> {hostname}",
                    lookup.address,
                    lookup.kind.as_str(),
                    lookup.row
                );
                HostnameUpdate {
                    generation: lookup.generation,
                    kind: lookup.kind,
                    row: lookup.row,
                    hostname,
                }
            }
        })
        .collect::<FuturesUnordered<_>>()
}

/// Runs `pending` and writes each result into `page` as it arrives.
pub async fn enrich_page(
    page: &mut DashboardPage,
    resolver: &HostnameResolver,
    pending: Vec<PendingLookup>,
    max_concurrent: usize,
) -> EnrichmentStats {
    let mut stats = EnrichmentStats::default();
    if pending.is_empty() {
        return stats;
    }

    let total = pending.len();
    let mut updates = lookup_stream(resolver, pending, max_concurrent);
    while let Some(update) = updates.next().await {
        match page.apply_hostname(&update) {
            UpdateOutcome::Applied => stats.applied += 1,
            UpdateOutcome::Stale => stats.stale += 1,
            UpdateOutcome::UnknownRow => stats.unknown += 1,
        }
    }

    info!(
        "Hostname enrichment finished: {}/{} applied, {} stale",
        stats.applied, total, stats.stale
    );
    stats
}
