use anyhow::{anyhow, Context, Result};
use catalogue::{load_places, update_distances, Coordinates, DistanceUnit, Place, SearchSettings};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use engine::{OrderingStrategy, Query, SortedResultSet, Tag, TagState};
use std::path::PathBuf;

/// near-places - Point-of-interest search
#[derive(Parser)]
#[command(name = "near-places")]
#[command(about = "Search a catalogue of places by text, tags and distance", long_about = None)]
struct Cli {
    /// Path to the catalogue JSON file
    #[arg(short, long, default_value = "data/places.json")]
    data: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalogue with text, tags and a distance cutoff
    Search {
        /// Free-text search over place titles (case-insensitive substring)
        #[arg(long, default_value = "")]
        text: String,

        /// Maximum distance from your position, in the selected unit
        #[arg(long)]
        max_distance: Option<f64>,

        /// Distance unit for input and display
        #[arg(long, value_enum, default_value = "km")]
        unit: UnitArg,

        /// Your latitude (enables distance filtering and ordering)
        #[arg(long, requires = "lon")]
        lat: Option<f64>,

        /// Your longitude
        #[arg(long, requires = "lat")]
        lon: Option<f64>,

        /// Only wheelchair-accessible places
        #[arg(long)]
        wheelchair: bool,

        /// Only child-friendly places
        #[arg(long)]
        child_friendly: bool,

        /// Only places with cheap entry
        #[arg(long)]
        cheap: bool,

        /// Only places with free entry
        #[arg(long)]
        free: bool,

        /// Only places you have liked
        #[arg(long)]
        liked: bool,

        /// Mark a place id as liked for this run (repeatable)
        #[arg(long = "like", value_name = "ID")]
        likes: Vec<String>,

        /// Result ordering
        #[arg(long, value_enum, default_value = "auto")]
        order: OrderArg,
    },

    /// Show the details of a single place
    Show {
        /// Place id to display
        #[arg(long)]
        id: String,
    },

    /// List the N places closest to a position
    Nearest {
        /// Your latitude
        #[arg(long)]
        lat: f64,

        /// Your longitude
        #[arg(long)]
        lon: f64,

        /// Number of places to show
        #[arg(long, default_value = "5")]
        limit: usize,

        /// Distance unit for display
        #[arg(long, value_enum, default_value = "km")]
        unit: UnitArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    /// Distance when a position is given, alphabetic otherwise
    Auto,
    Alphabetic,
    Distance,
}

#[derive(Clone, Copy, ValueEnum)]
enum UnitArg {
    Km,
    Mi,
}

impl From<UnitArg> for DistanceUnit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::Km => DistanceUnit::Kilometer,
            UnitArg::Mi => DistanceUnit::Mile,
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let places = load_places(&cli.data)
        .with_context(|| format!("Failed to load catalogue from {}", cli.data.display()))?;
    tracing::debug!(places = places.len(), "catalogue loaded");

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Search {
            text,
            max_distance,
            unit,
            lat,
            lon,
            wheelchair,
            child_friendly,
            cheap,
            free,
            liked,
            likes,
            order,
        } => handle_search(
            places,
            SearchArgs {
                text,
                max_distance,
                unit: unit.into(),
                reference: position(lat, lon),
                wheelchair,
                child_friendly,
                cheap,
                free,
                liked,
                likes,
                order,
            },
        ),
        Commands::Show { id } => handle_show(places, &id),
        Commands::Nearest {
            lat,
            lon,
            limit,
            unit,
        } => handle_nearest(places, Coordinates::new(lat, lon), limit, unit.into()),
    }
}

fn position(lat: Option<f64>, lon: Option<f64>) -> Option<Coordinates> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => Some(Coordinates::new(lat, lon)),
        _ => None,
    }
}

struct SearchArgs {
    text: String,
    max_distance: Option<f64>,
    unit: DistanceUnit,
    reference: Option<Coordinates>,
    wheelchair: bool,
    child_friendly: bool,
    cheap: bool,
    free: bool,
    liked: bool,
    likes: Vec<String>,
    order: OrderArg,
}

/// Handle the 'search' command
fn handle_search(mut places: Vec<Place>, args: SearchArgs) -> Result<()> {
    // Stamp liked state onto the snapshot before filtering
    let mut settings = SearchSettings::new(args.unit);
    for id in &args.likes {
        settings.like(id.clone());
    }
    settings.apply_liked(&mut places);

    if let Some(reference) = args.reference {
        update_distances(&mut places, reference);
    }

    let tags = TagState::new()
        .with_tag(Tag::WheelchairAccessible, args.wheelchair)
        .with_tag(Tag::ChildFriendly, args.child_friendly)
        .with_tag(Tag::CheapEntry, args.cheap)
        .with_tag(Tag::FreeEntry, args.free)
        .with_tag(Tag::LikedByYou, args.liked);

    let ordering = match args.order {
        OrderArg::Auto => OrderingStrategy::for_reference(args.reference),
        OrderArg::Alphabetic => OrderingStrategy::Alphabetic,
        OrderArg::Distance => OrderingStrategy::ShortestDistance,
    };

    if matches!(ordering, OrderingStrategy::ShortestDistance) && args.reference.is_none() {
        return Err(anyhow!(
            "Distance ordering needs a position; pass --lat and --lon"
        ));
    }
    if args.max_distance.is_some() && args.reference.is_none() {
        return Err(anyhow!(
            "--max-distance needs a position; pass --lat and --lon"
        ));
    }

    let mut query = Query::new(ordering).with_text(args.text).with_tags(tags);
    if let Some(max) = args.max_distance {
        query = query.with_max_distance(args.unit.to_meters(max));
    }
    if let Some(reference) = args.reference {
        query = query.with_reference(reference);
    }

    let mut results = SortedResultSet::new();
    results.apply(&places, &query);

    let show_distance = args.reference.is_some();
    for place in results.entries() {
        print_place_line(place, show_distance, args.unit);
    }
    println!("{}", results_count_line(results.size()).bold());
    Ok(())
}

/// Handle the 'show' command
fn handle_show(places: Vec<Place>, id: &str) -> Result<()> {
    let place = places
        .iter()
        .find(|p| p.id() == id)
        .ok_or_else(|| anyhow!("Place '{}' not found", id))?;

    println!("{}", place.title.bold());
    println!("  id:       {}", place.id());
    println!("  category: {}", place.category);
    println!(
        "  position: {:.4}, {:.4}",
        place.coordinates.latitude, place.coordinates.longitude
    );
    for (label, set) in [
        ("wheelchair accessible", place.wheelchair_accessible),
        ("child friendly", place.child_friendly),
        ("cheap entry", place.cheap_entry),
        ("free entry", place.free_entry),
    ] {
        if set {
            println!("  {} {}", "✓".green(), label);
        }
    }
    Ok(())
}

/// Handle the 'nearest' command
fn handle_nearest(
    mut places: Vec<Place>,
    reference: Coordinates,
    limit: usize,
    unit: DistanceUnit,
) -> Result<()> {
    update_distances(&mut places, reference);

    let query = Query::new(OrderingStrategy::ShortestDistance).with_reference(reference);
    let mut results = SortedResultSet::new();
    results.apply(&places, &query);

    for place in results.entries().iter().take(limit) {
        print_place_line(place, true, unit);
    }
    Ok(())
}

fn print_place_line(place: &Place, show_distance: bool, unit: DistanceUnit) {
    let mut line = format!("{}  {}", place.title.bold(), place.category.dimmed());
    if show_distance {
        let distance = place.distance_m / unit.conversion_rate();
        line = format!("{line}  {:.1} {}", distance, unit.display_name());
    }
    if place.liked {
        line = format!("{line}  {}", "♥".red());
    }
    println!("{line}");
}

fn results_count_line(count: usize) -> String {
    if count == 1 {
        "1 result found".to_string()
    } else {
        format!("{count} results found")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_results_count_pluralization() {
        assert_eq!(results_count_line(0), "0 results found");
        assert_eq!(results_count_line(1), "1 result found");
        assert_eq!(results_count_line(7), "7 results found");
    }

    #[test]
    fn test_position_requires_both_parts() {
        assert!(position(Some(53.8), None).is_none());
        assert!(position(None, Some(-1.55)).is_none());
        assert!(position(Some(53.8), Some(-1.55)).is_some());
    }
}
