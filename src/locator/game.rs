use std::path::{Path, PathBuf};

use tracing::{error, info};

use super::{CandidateLocator, HIGHEST_PRIORITY};
use crate::conflict;
use crate::content::{scan, ContentUnitBuilder};
use crate::context::{Distribution, LaunchContext};
use crate::error::{DiscoveryError, DiscoveryResult};
use crate::maven::MavenArtifact;
use crate::pipeline::{keys, DiscoveryAttributes, DiscoveryPipeline, Issue};

/// Locates the game distribution itself, either split across development
/// roots on the search path or assembled from partial jars in the libraries
/// directory.
pub struct GameLocator;

/// Entry present in every client jar, obfuscated or not.
const OBFUSCATED_ENTRYPOINT: &str = "net/minecraft/client/main/Main.class";
/// Only present in deobfuscated jars.
const DEOBFUSCATED_MARKER: &str = "net/minecraft/client/Minecraft.class";
/// Marks the game resource root in development layouts.
const RESOURCE_ROOT_MARKER: &str = "assets/.mcassetsroot";

/// Entries under these prefixes belong to the loader overlay, not the game.
const OVERLAY_PREFIXES: [&str; 3] = ["quarry/", "META-INF/services/", "META-INF/quarry.mods.toml"];

const GAME_GROUP: &str = "net.minecraft";
const LOADER_GROUP: &str = "org.quarrymc";
const LOADER_ARTIFACT: &str = "quarry";

fn is_overlay_entry(entry: &str) -> bool {
    OVERLAY_PREFIXES.iter().any(|prefix| entry.starts_with(prefix))
}

fn is_readable_file(path: &Path) -> bool {
    path.is_file() && std::fs::File::open(path).is_ok()
}

impl CandidateLocator for GameLocator {
    fn name(&self) -> &'static str {
        "game locator"
    }

    fn priority(&self) -> i32 {
        HIGHEST_PRIORITY
    }

    fn find_candidates(
        &self,
        context: &LaunchContext,
        pipeline: &mut DiscoveryPipeline,
    ) -> DiscoveryResult<()> {
        // The vanilla launcher puts the obfuscated client jar on the search
        // path. Claim it first so it can never occupy the entry-point
        // packages.
        self.prevent_loading_of_obfuscated_client(context, pipeline);

        // Development layout: classes and resources visible as two distinct
        // roots on the search path. One condition covers both packed-jar and
        // exploded-directory class roots.
        let classes_root = scan::find_source_containing(&context.search_path, DEOBFUSCATED_MARKER);
        let resources_root =
            scan::find_source_containing(&context.search_path, RESOURCE_ROOT_MARKER);
        if let (Some(classes), Some(resources)) = (classes_root, resources_root) {
            if classes != resources {
                info!("Found split development roots: {classes:?} + {resources:?}");
                pipeline.claim(&classes);
                pipeline.claim(&resources);
                add_development_units(classes, resources, context, pipeline);
                return Ok(());
            }
        }

        locate_production_game(context, pipeline);
        Ok(())
    }
}

impl GameLocator {
    fn prevent_loading_of_obfuscated_client(
        &self,
        context: &LaunchContext,
        pipeline: &mut DiscoveryPipeline,
    ) {
        let offenders = conflict::shadowed_entry_sources(
            &context.search_path,
            OBFUSCATED_ENTRYPOINT,
            DEOBFUSCATED_MARKER,
        );
        for path in offenders {
            info!("Marking obfuscated client jar as claimed to prevent loading: {path:?}");
            pipeline.claim(&path);
        }
    }
}

/// Split the combined class + resource roots into the game unit and the
/// loader overlay unit. The two filters partition file entries: overlay
/// classes and loose loader resources go to the overlay, everything else to
/// the game.
fn add_development_units(
    classes: PathBuf,
    resources: PathBuf,
    context: &LaunchContext,
    pipeline: &mut DiscoveryPipeline,
) {
    let resources_for_filter = resources.clone();
    let game_unit = ContentUnitBuilder::new()
        .root(&classes)
        .root(&resources)
        .filter(move |entry, root| {
            // Everything in the resource root is game content.
            if root == resources_for_filter {
                return true;
            }
            // Non-class files in the class root belong to the overlay.
            if !entry.ends_with(".class") {
                return false;
            }
            !is_overlay_entry(entry)
        })
        .build();
    pipeline.add_mod_file(
        game_unit,
        DiscoveryAttributes::system(context.version_info.game_version.clone()),
    );

    // The overlay shows up as its own unit so it can carry its own metadata
    // and resources.
    let overlay_unit = ContentUnitBuilder::new()
        .root(&classes)
        .filter(|entry, _| !entry.ends_with(".class") || is_overlay_entry(entry))
        .build();
    pipeline.add_mod_file(
        overlay_unit,
        DiscoveryAttributes::system(context.version_info.loader_version.clone()),
    );
}

/// In production the game jar is assembled from partial jars in the
/// libraries directory, addressed by Maven coordinates from the context.
fn locate_production_game(context: &LaunchContext, pipeline: &mut DiscoveryPipeline) {
    let Some(libraries_root) = context.libraries_root.as_deref() else {
        error!("When launching in production, the libraries directory must be configured");
        pipeline.add_issue(Issue::error(keys::CORRUPTED_INSTALLATION));
        return;
    };
    if !libraries_root.is_dir() {
        error!("Libraries directory is not readable: {libraries_root:?}");
        pipeline.add_issue(Issue::error(keys::CORRUPTED_INSTALLATION));
        return;
    }

    let Some(game_version) = context.version_info.game_version.as_deref() else {
        error!("When launching in production, the game version must be configured");
        pipeline.add_issue(Issue::error(keys::CORRUPTED_INSTALLATION));
        return;
    };
    let Some(loader_version) = context.version_info.loader_version.as_deref() else {
        error!("When launching in production, the loader version must be configured");
        pipeline.add_issue(Issue::error(keys::CORRUPTED_INSTALLATION));
        return;
    };

    let side = match context.distribution {
        Distribution::Client => "client",
        Distribution::DedicatedServer => "server",
    };

    // THE ORDER OF THESE ARTIFACTS MATTERS!
    // Entries in later jars shadow entries in earlier ones.
    let coordinates = [
        MavenArtifact::new(GAME_GROUP, side, game_version, Some("srg")),
        MavenArtifact::new(GAME_GROUP, side, game_version, Some("extra")),
        // Only the game classes patched by the loader.
        MavenArtifact::new(LOADER_GROUP, LOADER_ARTIFACT, loader_version, Some(side)),
    ];

    let Some(mut jar_paths) = resolve_libraries(libraries_root, &coordinates, pipeline) else {
        return;
    };

    // The unit serves the first root that has an entry; the coordinate list
    // is later-wins, so reverse it.
    jar_paths.reverse();
    let game_unit = ContentUnitBuilder::new().roots(jar_paths).build();
    pipeline.add_mod_file(
        game_unit,
        DiscoveryAttributes::system(Some(game_version.to_string())),
    );

    // The loader's own classes and resources ship as the universal artifact,
    // contributed as an independent file.
    let universal = MavenArtifact::new(
        LOADER_GROUP,
        LOADER_ARTIFACT,
        loader_version,
        Some("universal"),
    );
    let universal_path = libraries_root.join(universal.local_path());
    if !is_readable_file(&universal_path) {
        error!("Couldn't find loader universal jar at {universal_path:?}");
        pipeline.add_issue(
            Issue::error(keys::CORRUPTED_INSTALLATION)
                .with_cause(DiscoveryError::MissingInstallation(universal_path)),
        );
    } else {
        pipeline.add_path(
            &universal_path,
            DiscoveryAttributes::system(Some(loader_version.to_string())),
        );
    }
}

/// Resolve every coordinate against the libraries root, in order. Any
/// missing or unreadable jar fails the whole set; no partial list is ever
/// returned.
fn resolve_libraries(
    libraries_root: &Path,
    coordinates: &[MavenArtifact],
    pipeline: &mut DiscoveryPipeline,
) -> Option<Vec<PathBuf>> {
    let mut paths = Vec::with_capacity(coordinates.len());
    for coordinate in coordinates {
        let path = libraries_root.join(coordinate.local_path());
        if !is_readable_file(&path) {
            error!("Couldn't find or read required game jar: {path:?}");
            pipeline.add_issue(
                Issue::error(keys::CORRUPTED_INSTALLATION)
                    .with_cause(DiscoveryError::MissingInstallation(path)),
            );
            return None;
        }
        paths.push(path);
    }
    Some(paths)
}
