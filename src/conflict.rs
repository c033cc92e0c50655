// ─── Entry-Point Conflict Scan ───
// The vanilla launcher leaves the obfuscated client jar on the search path
// next to the deobfuscated one. If both were resolved, the obfuscated copy
// would occupy the entry-point packages of the module graph. The game
// locator pre-claims the offenders found here so no later locator can pick
// them up.

use std::path::PathBuf;

use tracing::warn;

use crate::content::scan;

/// Sources that contain `shadowed_entry` but not `marker_entry`, in search
/// path order.
///
/// `marker_entry` is a name only present in the legitimate (deobfuscated)
/// copy; sources carrying it are never reported. Unreadable sources are
/// skipped with a warning so one corrupt jar cannot abort discovery.
pub fn shadowed_entry_sources(
    sources: &[PathBuf],
    shadowed_entry: &str,
    marker_entry: &str,
) -> Vec<PathBuf> {
    let mut offenders = Vec::new();
    for source in sources {
        let has_shadowed = match scan::source_contains(source, shadowed_entry) {
            Ok(found) => found,
            Err(e) => {
                warn!("Skipping unscannable source {source:?}: {e}");
                continue;
            }
        };
        if !has_shadowed {
            continue;
        }
        match scan::source_contains(source, marker_entry) {
            Ok(true) => {}
            Ok(false) => offenders.push(source.clone()),
            Err(e) => warn!("Skipping unscannable source {source:?}: {e}"),
        }
    }
    offenders
}
