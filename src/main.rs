use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use rand::SeedableRng;
use rand::rngs::StdRng;

use playlist_mixer::catalog::Catalog;
use playlist_mixer::config::{CATALOG_VAR, PLAYLIST_SIZE_VAR, SEED_VAR, load_settings};
use playlist_mixer::models::Source;
use playlist_mixer::parametrize::{TrackParameter, TrackRef, WeightAssignment, parametrize};
use playlist_mixer::playlist::{
    GeneratedEntry, MixLimits, PlaylistGenerator, PlaylistMetadata, PlaylistStats,
};

#[derive(Parser)]
#[command(name = "playlist-mixer")]
#[command(about = "Mix two albums or playlists into a weighted random playlist")]
#[command(version)]
struct Args {
    /// Path to the catalog JSON file (falls back to MIXER_CATALOG, then the built-in sample)
    #[arg(short = 'c', long = "catalog")]
    catalog: Option<PathBuf>,

    /// Id of a source to mix; give exactly two
    #[arg(short = 's', long = "source", value_name = "ID")]
    sources: Vec<String>,

    /// Number of tracks to generate (falls back to MIXER_PLAYLIST_SIZE)
    #[arg(short = 'n', long = "size", allow_negative_numbers = true)]
    size: Option<i64>,

    /// Seed for a reproducible playlist (falls back to MIXER_SEED)
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Set a track's weight
    #[arg(short = 'w', long = "weight", value_name = "SOURCE:TRACK=WEIGHT")]
    weights: Vec<WeightAssignment>,

    /// Always include a track
    #[arg(short = 'r', long = "require", value_name = "SOURCE:TRACK")]
    required: Vec<TrackRef>,

    /// Let a track be drawn more than once
    #[arg(long = "repeat", value_name = "SOURCE:TRACK")]
    repeatable: Vec<TrackRef>,

    /// Path to a JSON file overriding the weight and size limits
    #[arg(long = "limits")]
    limits: Option<PathBuf>,

    /// List the catalog sources and their tracks, then exit
    #[arg(short = 'l', long = "list")]
    list: bool,

    /// Print the generated playlist as JSON
    #[arg(long = "json")]
    json: bool,

    /// Quiet mode - only print the playlist itself
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,

    /// Verbose mode - debug logging unless RUST_LOG says otherwise
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

impl Args {
    /// Environment variables whose value is replaced by a flag
    fn overridden_variables(&self) -> Vec<&'static str> {
        [
            (self.catalog.is_some(), CATALOG_VAR),
            (self.size.is_some(), PLAYLIST_SIZE_VAR),
            (self.seed.is_some(), SEED_VAR),
        ]
        .into_iter()
        .filter_map(|(given, var)| given.then_some(var))
        .collect()
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let settings = load_settings(&args.overridden_variables())
        .context("Failed to load settings from the environment")?;
    debug!("Settings: {settings:?}");

    let limits = match &args.limits {
        Some(path) => MixLimits::load_from_file(path)
            .with_context(|| format!("Failed to load limits from '{}'", path.display()))?,
        None => MixLimits::default(),
    };

    let catalog = load_catalog(args.catalog.as_deref(), &settings.catalog_path)?;

    if args.list {
        print_catalog(&catalog);
        return Ok(());
    }

    if args.sources.is_empty() {
        anyhow::bail!(
            "No sources selected: choose {} with --source (run with --list to see them)",
            limits.source_count
        );
    }

    let mut sources = catalog.select_sources(args.sources.as_slice(), &limits)?;
    sources = apply_parameters(sources, &args, &limits)?;

    let size = args.size.unwrap_or(settings.playlist_size as i64);
    let target_size = limits.check_playlist_size(size)?;

    let seed = args.seed.or(settings.seed);
    let mut rng = match seed {
        Some(seed) => {
            info!("Using seed {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let playlist = PlaylistGenerator::generate(&sources, target_size, &mut rng)?;
    let metadata = PlaylistStats::calculate_metadata(&playlist, &sources);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&playlist)?);
    } else {
        print_playlist(&sources, &playlist, &metadata, target_size, args.quiet);
    }

    Ok(())
}

/// An explicit catalog path must exist; the configured default may be absent
fn load_catalog(explicit: Option<&Path>, configured: &Path) -> Result<Catalog> {
    if let Some(path) = explicit {
        if !path.exists() {
            anyhow::bail!("Catalog file '{}' not found", path.display());
        }
        return Catalog::load_from_file(path)
            .with_context(|| format!("Failed to load catalog '{}'", path.display()));
    }

    if configured.exists() {
        Catalog::load_from_file(configured)
            .with_context(|| format!("Failed to load catalog '{}'", configured.display()))
    } else {
        info!("No catalog at '{}', using the built-in sample", configured.display());
        Ok(Catalog::sample())
    }
}

fn apply_parameters(
    mut sources: Vec<Source>,
    args: &Args,
    limits: &MixLimits,
) -> Result<Vec<Source>> {
    for assignment in &args.weights {
        sources = parametrize(
            &sources,
            &assignment.track,
            TrackParameter::Weight(assignment.weight),
            limits,
        )?;
    }
    for track in &args.required {
        sources = parametrize(&sources, track, TrackParameter::Required(true), limits)?;
    }
    for track in &args.repeatable {
        sources = parametrize(&sources, track, TrackParameter::AllowRepeated(true), limits)?;
    }
    Ok(sources)
}

fn print_catalog(catalog: &Catalog) {
    for source in &catalog.sources {
        let artist = source
            .artist
            .as_ref()
            .map(|artist| format!(" by {artist}"))
            .unwrap_or_default();
        println!("[{}] {} ({}){}", source.id, source.name, source.source_type, artist);

        for track in &source.musics {
            println!(
                "     {}:{}  \"{}\" by {} {}",
                source.id, track.id, track.title, track.artist, track.duration
            );
        }
        println!();
    }
}

fn print_playlist(
    sources: &[Source],
    playlist: &[GeneratedEntry],
    metadata: &PlaylistMetadata,
    target_size: usize,
    quiet: bool,
) {
    if !quiet {
        let title = sources
            .iter()
            .map(|source| source.name.as_str())
            .collect::<Vec<_>>()
            .join(" + ");
        println!("{title}");
        println!("{}", "=".repeat(title.chars().count()));
    }

    if playlist.is_empty() {
        println!("No tracks available for this mix.");
        return;
    }

    for (i, entry) in playlist.iter().enumerate() {
        let required_indicator = if entry.track.is_required { " [required]" } else { "" };
        println!(
            "{:>3}. \"{}\" by {} {} | {}{}",
            i + 1,
            entry.track.title,
            entry.track.artist,
            entry.track.duration,
            entry.source_name,
            required_indicator
        );
    }

    if quiet {
        return;
    }

    println!("\nStatistics:");
    println!(
        "   Tracks: {} | Duration: {}",
        metadata.total_tracks,
        metadata.total_duration.display_total()
    );
    if metadata.total_tracks < target_size {
        println!(
            "   Only {} of {target_size} requested tracks could be placed",
            metadata.total_tracks
        );
    } else if metadata.total_tracks > target_size {
        println!("   Required tracks pushed the playlist past the requested {target_size}");
    }

    println!("\nTracks per source:");
    for count in &metadata.source_counts {
        println!("   ({}) {}: {} tracks", count.source_type, count.source_name, count.count);
    }
}
