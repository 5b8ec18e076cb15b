//! track-poster CLI - Lay out a poster from pre-parsed tracks
//!
//! Usage:
//!   track-poster --tracks <tracks.json> [--type grid|circular|github|monthoflife] [--output <file>]
//!
//! Tracks are read as a JSON array of `Track` records. Grid, github and
//! monthoflife posters are written as one JSON document of drawing primitives; circular
//! posters are written as one `year_{YEAR}.json` per year next to the output.

use clap::Parser;
use log::{error, info, warn};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use track_poster::{
    render_poster, render_years, Color, ColorScheme, DistanceThresholds, GithubStyle,
    PosterConfig, PosterKind, PosterOutput, RenderOutcome, Result, TimeBasis, Track,
    TrackFilter, TrackSet, Units, YearRange,
};

#[derive(Parser)]
#[command(name = "track-poster")]
#[command(about = "Lay out GPS tracks as a poster", long_about = None)]
struct Cli {
    /// JSON file with an array of tracks
    #[arg(long)]
    tracks: PathBuf,

    /// JSON poster configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output file (directory of the file for circular posters)
    #[arg(short, long, default_value = "poster.json")]
    output: PathBuf,

    /// Poster type: grid, circular, github or monthoflife
    #[arg(long = "type", default_value = "grid")]
    kind: PosterKind,

    /// Years to draw: all, NUM or NUM-NUM
    #[arg(long, default_value = "all")]
    year: String,

    /// Sport type to keep, or "all"
    #[arg(long, default_value = "all")]
    sport_type: String,

    /// Minimum track distance in km
    #[arg(long, default_value = "1.0")]
    min_distance: f64,

    /// Track id to mark as special (repeatable)
    #[arg(long)]
    special: Vec<String>,

    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    athlete: Option<String>,

    /// Distance units: metric or imperial
    #[arg(long)]
    units: Option<Units>,

    /// Bucket tracks by local start date instead of UTC
    #[arg(long)]
    use_localtime: bool,

    #[arg(long)]
    background_color: Option<Color>,

    #[arg(long)]
    track_color: Option<Color>,

    #[arg(long)]
    track_color2: Option<Color>,

    #[arg(long)]
    text_color: Option<Color>,

    /// Color of special tracks and of the first distance tier
    #[arg(long)]
    special_color: Option<Color>,

    /// Color of the second distance tier
    #[arg(long)]
    special_color2: Option<Color>,

    /// Color of the third distance tier
    #[arg(long)]
    special_color3: Option<Color>,

    /// First distance tier threshold in km
    #[arg(long)]
    special_distance: Option<f64>,

    #[arg(long)]
    special_distance2: Option<f64>,

    #[arg(long)]
    special_distance3: Option<f64>,

    /// GitHub calendar alignment: align-firstday or align-monday
    #[arg(long)]
    github_style: Option<GithubStyle>,

    /// Enable verbose debug output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format(|buf, record| writeln!(buf, "[{:5}] {}", record.level(), record.args()))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_parameter_error() => {
            eprintln!("Invalid parameter: {}", e);
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error generating poster: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    // Parsed before any loading so a typo fails fast
    let years = YearRange::parse(&cli.year)?;
    let config = build_config(cli)?;
    let filter = TrackFilter {
        years,
        sport_type: (cli.sport_type != "all").then(|| cli.sport_type.clone()),
        min_length: 1000.0 * cli.min_distance,
        special: cli.special.iter().cloned().collect(),
    };

    let tracks = load_tracks(&cli.tracks)?;
    info!(
        "[CLI] Loaded {} tracks from {}",
        tracks.len(),
        cli.tracks.display()
    );

    if cli.kind == PosterKind::Circular {
        return run_circular(cli, &tracks, &filter, &config);
    }

    let mut set = TrackSet::with_config(&config);
    set.set_tracks(tracks);
    set.apply(filter);

    match render_poster(&set, &config, cli.kind)? {
        RenderOutcome::Rendered(poster) => write_poster(&cli.output, &poster),
        RenderOutcome::NoTracks => {
            warn!("[CLI] No tracks left after filtering, nothing written");
            Ok(())
        }
    }
}

fn run_circular(
    cli: &Cli,
    tracks: &[Track],
    filter: &TrackFilter,
    config: &PosterConfig,
) -> Result<()> {
    let dir = output_dir(&cli.output);
    let results = render_years(tracks, filter, config);
    if results.is_empty() {
        warn!("[CLI] No tracks left after filtering, nothing written");
        return Ok(());
    }

    // A failed year is reported but does not stop the others
    let mut first_error = None;
    for (year, result) in results {
        match result {
            Ok(RenderOutcome::Rendered(poster)) => {
                let path = dir.join(format!("year_{}.json", year));
                write_poster(&path, &poster)?;
            }
            Ok(RenderOutcome::NoTracks) => info!("[CLI] {}: no tracks, skipped", year),
            Err(e) => {
                error!("[CLI] {}: {}", year, e);
                first_error.get_or_insert(e);
            }
        }
    }
    first_error.map_or(Ok(()), Err)
}

fn build_config(cli: &Cli) -> Result<PosterConfig> {
    let mut config = match &cli.config {
        Some(path) => PosterConfig::from_json(&fs::read_to_string(path)?)?,
        None => PosterConfig::default(),
    };

    if uses_circular_palette(cli) {
        config.colors = ColorScheme::circular();
    }

    if let Some(title) = &cli.title {
        config.title = title.clone();
    }
    if let Some(athlete) = &cli.athlete {
        config.athlete = athlete.clone();
    }
    if let Some(units) = cli.units {
        config.units = units;
    }
    if cli.use_localtime {
        config.time_basis = TimeBasis::Local;
    }
    if let Some(style) = cli.github_style {
        config.github_style = style;
    }

    let colors = &mut config.colors;
    if let Some(c) = cli.background_color {
        colors.background = c;
    }
    if let Some(c) = cli.track_color {
        colors.track = c;
    }
    if cli.track_color2.is_some() {
        colors.track2 = cli.track_color2;
    }
    if let Some(c) = cli.text_color {
        colors.text = c;
    }
    if let Some(c) = cli.special_color {
        colors.special = c;
        colors.tiers.0[0] = Some(c);
    }
    if cli.special_color2.is_some() {
        colors.tiers.0[1] = cli.special_color2;
    }
    if cli.special_color3.is_some() {
        colors.tiers.0[2] = cli.special_color3;
    }

    let [d1, d2, d3] = config.thresholds.limits();
    config.thresholds = DistanceThresholds::new(
        cli.special_distance.unwrap_or(d1),
        cli.special_distance2.unwrap_or(d2),
        cli.special_distance3.unwrap_or(d3),
    )?;

    config.validate()?;
    Ok(config)
}

/// Circular posters switch to their own palette unless any color was chosen.
fn uses_circular_palette(cli: &Cli) -> bool {
    let has_color_flags = [
        cli.background_color,
        cli.track_color,
        cli.track_color2,
        cli.text_color,
        cli.special_color,
        cli.special_color2,
        cli.special_color3,
    ]
    .iter()
    .any(Option::is_some);
    cli.kind == PosterKind::Circular && cli.config.is_none() && !has_color_flags
}

fn load_tracks(path: &Path) -> Result<Vec<Track>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

fn output_dir(output: &Path) -> PathBuf {
    match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn write_poster(path: &Path, poster: &PosterOutput) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, poster)?;
    writer.flush()?;
    info!(
        "[CLI] Wrote {} shapes to {}",
        poster.shapes.len(),
        path.display()
    );
    Ok(())
}
