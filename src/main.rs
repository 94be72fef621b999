use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use estate_desk::api::{AdminApi, AdminService, ApiClient, AuthService, ContactService, PropertyApi, PropertyService};
use estate_desk::config::Config;
use estate_desk::contact::{load_inquiry_types, submit_contact_form};
use estate_desk::format::{
    format_area, format_currency, format_phone, format_relative_time, price_per_unit, truncate,
};
use estate_desk::models::{
    AdminQuery, Category, ContactForm, Credentials, Furnished, ImageFile, Listing, Pagination, PropertyDraft,
    PropertyStatus, PropertyType, Registration, Role, SortKey, SortOrder,
};
use estate_desk::review::{ReviewBoard, DEFAULT_REJECT_REASON};
use estate_desk::state::{AuthState, FilterUpdate, ListingAction, ListingState};
use estate_desk::wizard::{Step, Wizard, SUBMITTED_MESSAGE};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "estate-desk", version, about = "Browse, submit and review property listings")]
struct Cli {
    /// Backend base URL (overrides API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in and print the session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "buyer")]
        role: String,
    },
    /// Show the signed-in user (needs API_TOKEN)
    Profile,
    /// Browse approved listings
    Listings(ListingArgs),
    /// Show one listing in full
    Show { id: String },
    /// Listings owned by the signed-in user
    Mine,
    /// Tell an owner you are interested
    Interest {
        id: String,
        #[arg(long, default_value = "I am interested in this property.")]
        message: String,
    },
    /// Remove one of your own listings
    Delete { id: String },
    /// Run a draft through the submission wizard and send it
    Submit(SubmitArgs),
    /// Admin review
    #[command(subcommand)]
    Admin(AdminCommand),
    /// Contact form
    #[command(subcommand)]
    Contact(ContactCommand),
}

#[derive(Args)]
struct ListingArgs {
    #[arg(long = "type")]
    kind: Option<String>,
    #[arg(long, default_value = "")]
    location: String,
    #[arg(long)]
    min_price: Option<u64>,
    #[arg(long)]
    max_price: Option<u64>,
    #[arg(long)]
    bedrooms: Option<u32>,
    #[arg(long)]
    furnished: Option<String>,
    #[arg(long, default_value = "createdAt")]
    sort_by: String,
    #[arg(long, default_value = "desc")]
    sort_order: String,
    #[arg(long, default_value_t = 1)]
    page: u32,
    #[arg(long, default_value_t = 12)]
    limit: u32,
}

#[derive(Args)]
struct SubmitArgs {
    /// JSON file holding the draft (same shape as the form sections)
    #[arg(long)]
    draft: PathBuf,
    /// Image to attach; repeat for more
    #[arg(long = "image")]
    images: Vec<PathBuf>,
    /// Amenity to toggle on; repeat for more
    #[arg(long = "amenity")]
    amenities: Vec<String>,
}

#[derive(Subcommand)]
enum AdminCommand {
    /// List properties, optionally filtered
    List {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    Approve { id: String },
    Reject {
        id: String,
        #[arg(long)]
        reason: Option<String>,
    },
    Delete { id: String },
    /// Dashboard statistics as JSON
    Dashboard,
}

#[derive(Subcommand)]
enum ContactCommand {
    /// List inquiry types
    Types,
    /// Send a message
    Send {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
        #[arg(long = "type", default_value = "general")]
        kind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env()?;
    if let Some(url) = cli.api_url {
        config.api_url = url.trim_end_matches('/').to_string();
    }
    let client = ApiClient::new(&config)?;

    info!("🏠 Estate Desk ({})", client.base_url());

    match cli.command {
        Command::Login { email, password } => {
            let auth = AuthService::new(client.clone());
            let mut state = AuthState::default();
            match state.login(&auth, &Credentials { email, password }).await {
                Ok(user) => {
                    println!("Welcome back, {} ({})", user.name, user.role.label());
                    if let Some(token) = client.session().token {
                        println!("API_TOKEN={}", token);
                    }
                }
                Err(message) => bail!(message),
            }
        }
        Command::Register {
            name,
            email,
            phone,
            password,
            role,
        } => {
            let auth = AuthService::new(client.clone());
            let role: Role = role.parse()?;
            let mut state = AuthState::default();
            let registration = Registration {
                name,
                email,
                phone,
                password,
                role,
            };
            match state.register(&auth, &registration).await {
                Ok(user) => {
                    println!("Account created for {}", user.email);
                    if let Some(token) = client.session().token {
                        println!("API_TOKEN={}", token);
                    }
                }
                Err(message) => bail!(message),
            }
        }
        Command::Profile => {
            let auth = AuthService::new(client.clone());
            let mut state = AuthState::default();
            state.restore(&auth, client.session().token).await;
            match &state.user {
                Some(user) => {
                    println!("{} <{}>", user.name, user.email);
                    println!("   Role: {}", user.role.label());
                    if let Some(phone) = &user.phone {
                        println!("   Phone: {}", format_phone(phone));
                    }
                }
                None => bail!("Not signed in"),
            }
        }
        Command::Listings(args) => browse(&PropertyService::new(client), args).await?,
        Command::Show { id } => {
            let properties = PropertyService::new(client);
            let mut state = ListingState::default();
            state.open(&properties, &id).await;
            match (&state.current, &state.error) {
                (Some(listing), _) => print_details(listing),
                (None, Some(message)) => bail!(message.clone()),
                (None, None) => bail!("Property not found"),
            }
        }
        Command::Mine => {
            let properties = PropertyService::new(client);
            let listings = properties
                .mine()
                .await
                .map_err(|e| anyhow::anyhow!(e.notification("Failed to load your properties")))?;
            info!("📋 {} properties", listings.len());
            print_listings(&listings);
        }
        Command::Interest { id, message } => {
            let properties = PropertyService::new(client);
            let ack = properties
                .express_interest(&id, &message)
                .await
                .map_err(|e| anyhow::anyhow!(e.notification("Failed to send interest")))?;
            println!("{}", ack.message.unwrap_or_else(|| "Interest sent to the owner".to_string()));
        }
        Command::Delete { id } => {
            let properties = PropertyService::new(client);
            match properties.delete(&id).await {
                Ok(_) => println!("Deleted property {}", id),
                Err(e) => bail!(e.notification("Failed to delete property")),
            }
        }
        Command::Submit(args) => submit(&PropertyService::new(client), args).await?,
        Command::Admin(command) => admin(&AdminService::new(client), command).await?,
        Command::Contact(command) => contact(&ContactService::new(client), command).await?,
    }

    Ok(())
}

async fn browse(properties: &PropertyService, args: ListingArgs) -> Result<()> {
    let mut state = ListingState::default();

    if let Some(kind) = args.kind {
        state.dispatch(ListingAction::SetFilter(FilterUpdate::Type(Some(kind.parse::<PropertyType>()?))));
    }
    if let Some(furnished) = args.furnished {
        state.dispatch(ListingAction::SetFilter(FilterUpdate::Furnished(Some(furnished.parse::<Furnished>()?))));
    }
    let sort_by: SortKey = args.sort_by.parse()?;
    let sort_order: SortOrder = args.sort_order.parse()?;
    for update in [
        FilterUpdate::Location(args.location),
        FilterUpdate::MinPrice(args.min_price),
        FilterUpdate::MaxPrice(args.max_price),
        FilterUpdate::Bedrooms(args.bedrooms),
        FilterUpdate::Sort(sort_by, sort_order),
    ] {
        state.dispatch(ListingAction::SetFilter(update));
    }
    state.dispatch(ListingAction::SetPagination(Pagination {
        page: args.page,
        limit: args.limit,
        ..Pagination::default()
    }));

    state.refresh(properties).await;
    if let Some(message) = state.error {
        bail!(message);
    }

    info!(
        "📋 Page {} of {} ({} properties)",
        state.pagination.page, state.pagination.total_pages, state.pagination.total
    );
    print_listings(&state.listings);
    Ok(())
}

async fn submit(properties: &PropertyService, args: SubmitArgs) -> Result<()> {
    let raw = tokio::fs::read_to_string(&args.draft)
        .await
        .with_context(|| format!("Failed to read draft {}", args.draft.display()))?;
    let draft: PropertyDraft =
        serde_json::from_str(&raw).with_context(|| format!("Invalid draft JSON in {}", args.draft.display()))?;

    let mut wizard = Wizard::with_draft(draft);
    for amenity in &args.amenities {
        if !wizard.draft().amenities.contains(amenity) {
            wizard.toggle_amenity(amenity);
        }
    }

    let mut images = Vec::with_capacity(args.images.len());
    for path in &args.images {
        let image = ImageFile::load(path)
            .await
            .with_context(|| format!("Failed to read image {}", path.display()))?;
        images.push(image);
    }
    if let Err(e) = wizard.add_images(images) {
        bail!(e.to_string());
    }

    while wizard.step() != Step::Review {
        let step = wizard.step();
        match wizard.advance() {
            Ok(next) => info!("✔ {} → {}", step.title(), next.title()),
            Err(e) => {
                warn!("Step {} ({}) incomplete", step.number(), step.title());
                bail!(e.to_string());
            }
        }
    }

    info!("📤 Submitting '{}' with {} images", wizard.draft().title, wizard.draft().images.len());
    match wizard.submit(properties).await {
        Ok(_) => {
            println!("{}", SUBMITTED_MESSAGE);
            Ok(())
        }
        Err(e) => bail!(e.notification()),
    }
}

async fn admin(service: &AdminService, command: AdminCommand) -> Result<()> {
    match command {
        AdminCommand::List { status, category } => {
            let query = AdminQuery {
                status: status.map(|s| s.parse::<PropertyStatus>()).transpose()?,
                category: category.map(|c| c.parse::<Category>()).transpose()?,
            };
            let board = ReviewBoard::load(service, &query)
                .await
                .map_err(|e| anyhow::anyhow!(e.notification("Failed to load properties")))?;

            let counts = board.counts();
            info!(
                "📊 {} total, {} pending, {} approved, {} rejected",
                counts.total, counts.pending, counts.approved, counts.rejected
            );
            for (i, listing) in board.listings().iter().enumerate() {
                let status = listing.status.map(|s| s.label()).unwrap_or("Pending");
                println!("{}. [{}] {} ({})", i + 1, status, listing.title, format_currency(listing.price.amount));
                if let Some(owner) = &listing.owner {
                    println!("   Owner: {} <{}>", owner.display_name(), owner.display_email());
                }
                let actions: Vec<String> = board
                    .available_actions(&listing.id)
                    .iter()
                    .map(|a| a.to_string())
                    .collect();
                println!("   ID: {}   Actions: {}", listing.id, actions.join(", "));
                println!();
            }
        }
        AdminCommand::Approve { id } => {
            let mut board = load_board(service).await?;
            board.approve(service, &id).await?;
            println!("Property {} approved", id);
        }
        AdminCommand::Reject { id, reason } => {
            let mut board = load_board(service).await?;
            let reason = reason.unwrap_or_else(|| DEFAULT_REJECT_REASON.to_string());
            board.reject(service, &id, &reason).await?;
            println!("Property {} rejected: {}", id, reason);
        }
        AdminCommand::Delete { id } => {
            let mut board = load_board(service).await?;
            board.delete(service, &id).await?;
            println!("Property {} deleted", id);
        }
        AdminCommand::Dashboard => {
            let stats = service
                .dashboard()
                .await
                .map_err(|e| anyhow::anyhow!(e.notification("Failed to load dashboard")))?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}

async fn load_board(service: &AdminService) -> Result<ReviewBoard> {
    ReviewBoard::load(service, &AdminQuery::default())
        .await
        .map_err(|e| anyhow::anyhow!(e.notification("Failed to load properties")))
}

async fn contact(service: &ContactService, command: ContactCommand) -> Result<()> {
    match command {
        ContactCommand::Types => {
            for kind in load_inquiry_types(service).await {
                println!("{:<20} {}", kind.value, kind.label);
            }
        }
        ContactCommand::Send {
            name,
            email,
            phone,
            subject,
            message,
            kind,
        } => {
            let mut form = ContactForm {
                name,
                email,
                phone,
                subject,
                message,
                kind,
            };
            let confirmation = submit_contact_form(service, &mut form).await?;
            println!("{}", confirmation);
        }
    }
    Ok(())
}

fn print_listings(listings: &[Listing]) {
    let now = Utc::now();
    for (i, listing) in listings.iter().enumerate() {
        println!("{}. {} ({})", i + 1, listing.title, format_currency(listing.price.amount));
        println!("   {} {} in {}", listing.kind, listing.category, listing.location.city);
        println!("   {}", format_area(listing.area.size, &listing.area.unit));
        if let Some(created) = listing.created_at {
            println!("   Listed {}", format_relative_time(created, now));
        }
        println!("   ID: {}", listing.id);
        println!();
    }
}

fn print_details(listing: &Listing) {
    println!("{}", listing.title);
    println!("   {}", truncate(&listing.description, 200));
    println!(
        "   {} ({} per {})",
        format_currency(listing.price.amount),
        format_currency(price_per_unit(listing.price.amount, listing.area.size) as f64),
        listing.area.unit
    );
    println!("   Area: {}", format_area(listing.area.size, &listing.area.unit));
    let location = &listing.location;
    println!("   {}, {}, {} {}", location.address, location.city, location.state, location.pincode);
    if !listing.amenities.is_empty() {
        println!("   Amenities: {}", listing.amenities.join(", "));
    }
    for image in &listing.images {
        println!("   Image: {}", image.url);
    }
    if let Some(owner) = &listing.owner {
        println!("   Owner: {} <{}>", owner.display_name(), owner.display_email());
    }
    println!("   Views: {}", listing.views);
}
