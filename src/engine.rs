use std::time::Instant;

use indexmap::map::Entry;
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, info, trace};

use crate::error::ReslocError;
use crate::index::{IndexStats, ResourceIndex};
use crate::root::Root;
use crate::scanner::ScanConfig;
use crate::traits::Scanner;

// ---------------------------------------------------------------------------
// assemble()
// ---------------------------------------------------------------------------

/// Scan every root in order and fold the candidates into a fresh index.
///
/// Strict per root, lenient per resource: a root the scanner cannot open
/// fails the whole build, while candidates that cannot be resolved are
/// dropped and only logged.
///
/// Called by `LocatorBuilder::build()` after checking at least one root is
/// configured.
pub(crate) fn assemble(
    roots: &IndexSet<Root>,
    scanner: &dyn Scanner,
    config: &ScanConfig,
) -> Result<ResourceIndex, ReslocError> {
    let start = Instant::now();

    let mut resources  = IndexMap::new();
    let mut candidates = 0;
    let mut dropped    = 0;
    let mut duplicates = 0;

    for root in roots {
        debug!(root = %root.path().display(), kind = ?root.kind(), "scanning root");

        // The scanner's handle on the root is released when `found` drops at
        // the end of this iteration, error or not.
        let found = scanner.scan(root, config)?;

        for candidate in found {
            candidates += 1;

            let resource = match candidate {
                Ok(r) => r,
                Err(err) => {
                    dropped += 1;
                    debug!(error = %err, path = ?err.path(), "dropping unresolvable candidate");
                    continue;
                }
            };

            match resources.entry(resource.name) {
                Entry::Occupied(slot) => {
                    duplicates += 1;
                    trace!(name = %slot.key(), "keeping first occurrence of duplicate name");
                }
                Entry::Vacant(slot) => {
                    trace!(name = %slot.key(), location = %resource.location, "indexed");
                    slot.insert(resource.location);
                }
            }
        }
    }

    let stats = IndexStats {
        roots: roots.len(),
        candidates,
        dropped,
        duplicates,
        resources: resources.len(),
        duration: start.elapsed(),
    };

    info!(
        roots = stats.roots,
        resources = stats.resources,
        dropped = stats.dropped,
        duplicates = stats.duplicates,
        elapsed_ms = stats.duration.as_millis() as u64,
        "resource index built"
    );

    Ok(ResourceIndex::new(resources, stats))
}
