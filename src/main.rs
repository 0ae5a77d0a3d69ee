use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use shiftboard::board::seed::demo_listings;
use shiftboard::board::{
    Application, ApplicationId, ApplicationStatus, Currency, FilterState, JobBoard, Listing,
    ListingId, ListingPatch, NewApplication, NewListing, SortOrder,
};
use shiftboard::config::AppConfig;
use shiftboard::error::AppError;
use shiftboard::storage::FileStore;
use shiftboard::telemetry;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "shiftboard",
    about = "Post, browse and manage part-time job listings stored on this device",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Work with job listings (default: browse)
    Listings {
        #[command(subcommand)]
        command: ListingsCommand,
    },
    /// Manage favorite listings
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommand,
    },
    /// Review applications sent to listings
    Applications {
        #[command(subcommand)]
        command: ApplicationsCommand,
    },
    /// Populate an empty board with demo listings
    Seed,
    /// Remove applications whose listing no longer exists
    Sweep,
}

#[derive(Subcommand, Debug)]
enum ListingsCommand {
    /// Filter and sort listings
    Browse(BrowseArgs),
    /// Listings posted by the configured owner
    Mine,
    /// Show one listing with its applications
    Show { id: String },
    /// Post a new listing
    Create(CreateArgs),
    /// Change fields of an existing listing
    Update(UpdateArgs),
    /// Delete a listing and its applications
    Delete { id: String },
    /// Open a closed listing or close an open one
    Toggle { id: String },
}

#[derive(Subcommand, Debug)]
enum FavoritesCommand {
    /// List favorite listings
    List,
    /// Add or remove a listing from favorites
    Toggle { id: String },
}

#[derive(Subcommand, Debug)]
enum ApplicationsCommand {
    /// Applications for one listing
    List { listing_id: String },
    /// Apply to a listing
    Create {
        listing_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        note: Option<String>,
    },
    /// Set an application's review status
    Status {
        id: String,
        #[arg(value_parser = parse_application_status)]
        status: ApplicationStatus,
    },
}

#[derive(Args, Debug, Default)]
struct BrowseArgs {
    /// Location substring (accent and case insensitive)
    #[arg(long)]
    location: Option<String>,
    /// Minimum hourly rate, inclusive
    #[arg(long)]
    min_rate: Option<f64>,
    /// Maximum hourly rate, inclusive
    #[arg(long)]
    max_rate: Option<f64>,
    /// Search title, location and description
    #[arg(long)]
    query: Option<String>,
    /// Only favorite listings
    #[arg(long)]
    only_favorites: bool,
    /// Only open listings
    #[arg(long)]
    open_only: bool,
    /// Rate order: asc or desc
    #[arg(long, value_parser = parse_sort_order, default_value = "desc")]
    sort: SortOrder,
}

#[derive(Args, Debug)]
struct CreateArgs {
    #[arg(long)]
    title: String,
    #[command(flatten)]
    fields: ListingFields,
}

#[derive(Args, Debug)]
struct UpdateArgs {
    id: String,
    #[arg(long)]
    title: Option<String>,
    #[command(flatten)]
    fields: ListingFields,
}

#[derive(Args, Debug, Default)]
struct ListingFields {
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    location: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    district: Option<String>,
    /// Whether the job can be done remotely (`--remote` alone means true)
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    remote: Option<bool>,
    /// Hourly rate
    #[arg(long)]
    rate: Option<f64>,
    #[arg(long, value_parser = parse_currency)]
    currency: Option<Currency>,
    #[arg(long)]
    required_count: Option<f64>,
    #[arg(long)]
    duration_days: Option<f64>,
    #[arg(long)]
    hours_per_day: Option<f64>,
    /// Shift start (RFC 3339)
    #[arg(long, value_parser = parse_timestamp)]
    start_at: Option<DateTime<Utc>>,
    /// Shift end (RFC 3339)
    #[arg(long, value_parser = parse_timestamp)]
    end_at: Option<DateTime<Utc>>,
}

fn main() {
    if let Err(err) = run_cli() {
        eprintln!("error: {err}");
        std::process::exit(err.exit_code());
    }
}

fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let board = JobBoard::new(
        FileStore::new(&config.storage.data_dir),
        config.owner_id.clone(),
    );
    info!(
        environment = ?config.environment,
        data_dir = %config.storage.data_dir.display(),
        "job board opened"
    );

    let command = cli.command.unwrap_or(Command::Listings {
        command: ListingsCommand::Browse(BrowseArgs::default()),
    });

    match command {
        Command::Listings { command } => run_listings(&board, command),
        Command::Favorites { command } => run_favorites(&board, command),
        Command::Applications { command } => run_applications(&board, command),
        Command::Seed => {
            let written = board.seed_if_empty(demo_listings(board.owner_id(), Utc::now()))?;
            if written == 0 {
                println!("Board already has listings; nothing seeded.");
            } else {
                println!("Seeded {written} demo listings.");
            }
            Ok(())
        }
        Command::Sweep => {
            let removed = board.sweep_orphaned_applications()?;
            println!("Removed {removed} orphaned applications.");
            Ok(())
        }
    }
}

fn run_listings(board: &JobBoard<FileStore>, command: ListingsCommand) -> Result<(), AppError> {
    match command {
        ListingsCommand::Browse(args) => {
            let filter = FilterState {
                location: args.location,
                min_rate: args.min_rate,
                max_rate: args.max_rate,
                query: args.query,
                only_favorites: args.only_favorites,
                open_only: args.open_only,
                sort_order: args.sort,
            };
            let listings = board.browse(&filter);
            if listings.is_empty() {
                if filter.only_favorites {
                    println!("No favorite listings match these filters.");
                } else {
                    println!("No listings match these filters.");
                }
            }
            render_listings(&listings);
        }
        ListingsCommand::Mine => {
            let listings = board.my_listings();
            if listings.is_empty() {
                println!("You have not posted any listings yet.");
            }
            render_listings(&listings);
        }
        ListingsCommand::Show { id } => {
            let id = ListingId(id);
            let listing = board.listing(&id)?;
            render_listing_detail(&listing, &board.applications_for(&id));
        }
        ListingsCommand::Create(CreateArgs { title, fields }) => {
            let listing = board.create_listing(new_listing(title, fields))?;
            println!("Listing created: {} ({})", listing.title, listing.id);
        }
        ListingsCommand::Update(UpdateArgs { id, title, fields }) => {
            let patch = listing_patch(title, fields);
            if patch.is_empty() {
                return Err(AppError::Input("no fields to update".to_string()));
            }
            let listing = board.update_listing(&ListingId(id), &patch)?;
            println!("Listing updated: {} ({})", listing.title, listing.id);
        }
        ListingsCommand::Delete { id } => {
            let outcome = board.delete_listing(&ListingId(id))?;
            println!(
                "Deleted {} and {} application(s).",
                outcome.listing.id, outcome.removed_applications
            );
        }
        ListingsCommand::Toggle { id } => {
            let listing = board.toggle_listing_status(&ListingId(id))?;
            println!("Listing {} is now {}.", listing.id, listing.status.label());
        }
    }
    Ok(())
}

fn run_favorites(board: &JobBoard<FileStore>, command: FavoritesCommand) -> Result<(), AppError> {
    match command {
        FavoritesCommand::List => {
            let filter = FilterState {
                only_favorites: true,
                ..FilterState::default()
            };
            let listings = board.browse(&filter);
            if listings.is_empty() {
                println!("No favorites yet.");
            }
            render_listings(&listings);
        }
        FavoritesCommand::Toggle { id } => {
            let id = ListingId(id);
            if board.toggle_favorite(&id)? {
                println!("Added {id} to favorites.");
            } else {
                println!("Removed {id} from favorites.");
            }
        }
    }
    Ok(())
}

fn run_applications(
    board: &JobBoard<FileStore>,
    command: ApplicationsCommand,
) -> Result<(), AppError> {
    match command {
        ApplicationsCommand::List { listing_id } => {
            let listing_id = ListingId(listing_id);
            let listing = board.listing(&listing_id)?;
            render_listing_detail(&listing, &board.applications_for(&listing_id));
        }
        ApplicationsCommand::Create {
            listing_id,
            name,
            phone,
            note,
        } => {
            let application = board.create_application(NewApplication {
                listing_id: ListingId(listing_id),
                name,
                phone,
                note,
            })?;
            println!(
                "Application {} from {} recorded.",
                application.id, application.name
            );
        }
        ApplicationsCommand::Status { id, status } => {
            let application = board.set_application_status(&ApplicationId(id), status)?;
            println!(
                "Application {} is now {}.",
                application.id,
                application.status.label()
            );
        }
    }
    Ok(())
}

fn new_listing(title: String, fields: ListingFields) -> NewListing {
    NewListing {
        title,
        company_name: fields.company,
        description: fields.description,
        location: fields.location,
        city: fields.city,
        district: fields.district,
        is_remote: fields.remote.unwrap_or(false),
        hourly_rate: fields.rate,
        currency: fields.currency,
        start_at: fields.start_at,
        end_at: fields.end_at,
        duration_days: fields.duration_days,
        hours_per_day: fields.hours_per_day,
        required_count: fields.required_count,
    }
}

fn listing_patch(title: Option<String>, fields: ListingFields) -> ListingPatch {
    ListingPatch {
        title,
        company_name: fields.company.map(Some),
        description: fields.description.map(Some),
        location: fields.location.map(Some),
        city: fields.city.map(Some),
        district: fields.district.map(Some),
        is_remote: fields.remote,
        hourly_rate: fields.rate.map(Some),
        currency: fields.currency,
        start_at: fields.start_at.map(Some),
        end_at: fields.end_at.map(Some),
        duration_days: fields.duration_days.map(Some),
        hours_per_day: fields.hours_per_day.map(Some),
        required_count: fields.required_count.map(Some),
    }
}

fn render_listings(listings: &[Listing]) {
    for listing in listings {
        println!(
            "{:<36} {} | {} | {} | {}",
            listing.id.as_str(),
            listing.headline(),
            listing.display_location(),
            listing
                .pay_label()
                .unwrap_or_else(|| "rate not stated".to_string()),
            listing.status.label()
        );
    }
}

fn render_listing_detail(listing: &Listing, applications: &[Application]) {
    println!("{}", listing.headline());
    println!("  id: {}", listing.id);
    println!("  status: {}", listing.status.label());
    println!("  location: {}", listing.display_location());
    println!(
        "  pay: {}",
        listing
            .pay_label()
            .unwrap_or_else(|| "rate not stated".to_string())
    );
    if let Some(duration) = listing.duration_label() {
        println!("  duration: {duration}");
    }
    if let Some(count) = listing.required_count {
        println!("  people needed: {count}");
    }
    if listing.start_at.is_some() || listing.end_at.is_some() {
        let format = |value: Option<DateTime<Utc>>| {
            value
                .map(|value| value.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string())
        };
        println!(
            "  shift: {} -> {}",
            format(listing.start_at),
            format(listing.end_at)
        );
    }
    if let Some(description) = &listing.description {
        println!("  {description}");
    }

    println!("Applications ({}):", applications.len());
    if applications.is_empty() {
        println!("  none yet");
    }
    for application in applications {
        println!(
            "  {} {} [{}]{}",
            application.id,
            application.name,
            application.status.label(),
            application
                .phone
                .as_deref()
                .map(|phone| format!(" tel {phone}"))
                .unwrap_or_default()
        );
    }
}

fn parse_currency(raw: &str) -> Result<Currency, String> {
    raw.parse()
}

fn parse_sort_order(raw: &str) -> Result<SortOrder, String> {
    raw.parse()
}

fn parse_application_status(raw: &str) -> Result<ApplicationStatus, String> {
    raw.parse()
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw.trim())
        .map(|value| value.with_timezone(&Utc))
        .map_err(|err| format!("failed to parse '{raw}' as an RFC 3339 timestamp ({err})"))
}
