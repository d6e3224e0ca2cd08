use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use hostel_finder::auth::{AuthContext, AuthError, FileStorage, LoginForm, SignupForm};
use hostel_finder::contact::{self, ContactForm};
use hostel_finder::listing::{self, ListingError, ListingForm};
use hostel_finder::map::{map_points, nearby_points, MarkerRenderer, TextMapRenderer};
use hostel_finder::upload::{self, UploadedImage};
use hostel_finder::{Config, Directory, Hostel, UserType};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hostel-finder", version, about = "Find student hostels near you")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search hostels by location text; an empty query lists everything
    Search {
        #[arg(default_value = "")]
        query: String,
    },
    /// List the cities that have hostels
    Cities,
    /// Show hostels in one city
    City { name: String },
    /// Show one hostel
    Hostel { id: u32 },
    /// Search universities by name or location
    Universities {
        #[arg(default_value = "")]
        query: String,
    },
    /// Hostels within a radius of a university
    Near {
        university_id: u32,
        #[arg(long)]
        radius: Option<f64>,
    },
    /// Draw the hostels (optionally around a university) on a text map
    Map {
        #[arg(long)]
        university: Option<u32>,
        #[arg(long, default_value = "")]
        query: String,
        #[arg(long)]
        radius: Option<f64>,
    },
    /// Sign in (any valid email and password is accepted)
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "student")]
        user_type: UserType,
    },
    /// Create an account and sign in
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long, default_value = "student")]
        user_type: UserType,
    },
    /// Sign out and clear the session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Check an image and print its data URL
    Upload { path: PathBuf },
    /// Post a hostel listing (hostel providers only)
    Post(PostArgs),
    /// Send a message to the team
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        subject: String,
        #[arg(long)]
        message: String,
    },
}

#[derive(Args)]
struct PostArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    description: String,
    #[arg(long)]
    address: String,
    #[arg(long)]
    city: String,
    #[arg(long)]
    state: String,
    #[arg(long)]
    pincode: String,
    #[arg(long)]
    nearby_university: Option<String>,
    #[arg(long)]
    room_types: String,
    #[arg(long)]
    price_per_month: u32,
    /// Comma separated, e.g. "WiFi, Laundry"
    #[arg(long)]
    amenities: String,
    #[arg(long)]
    contact_number: String,
    /// Defaults to the signed-in user's email
    #[arg(long, default_value = "")]
    contact_email: String,
    /// Image files to attach
    #[arg(long = "image")]
    images: Vec<PathBuf>,
}

impl PostArgs {
    fn into_parts(self) -> (ListingForm, Vec<PathBuf>) {
        let form = ListingForm {
            name: self.name,
            description: self.description,
            address: self.address,
            city: self.city,
            state: self.state,
            pincode: self.pincode,
            nearby_university: self.nearby_university,
            room_types: self.room_types,
            price_per_month: self.price_per_month,
            amenities: self.amenities,
            contact_number: self.contact_number,
            contact_email: self.contact_email,
        };
        (form, self.images)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so JSON output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env().context("Invalid configuration")?;
    let directory = Directory::new(&config);

    let storage = Arc::new(FileStorage::new(&config.session_file));
    let mut auth = AuthContext::restore(storage, config.simulated_delay)
        .await
        .context("Failed to restore session")?;

    let json = cli.json;

    match cli.command {
        Command::Search { query } => {
            if query.trim().is_empty() {
                info!("No location given, listing every hostel");
            }
            print_hostels(&directory.search(&query), json)?;
        }
        Command::Cities => {
            let cities = directory.cities();
            if json {
                print_json(&cities)?;
            } else {
                println!("{}", cities.join("  "));
            }
        }
        Command::City { name } => print_hostels(&directory.search_by_city(&name), json)?,
        Command::Hostel { id } => match directory.hostel(id) {
            Some(hostel) if json => print_json(hostel)?,
            Some(hostel) => print_hostel_detail(hostel),
            None if json => print_json(&serde_json::Value::Null)?,
            None => println!("Hostel not found. The hostel you're looking for doesn't exist."),
        },
        Command::Universities { query } => {
            let universities = directory.search_universities(&query);
            if json {
                print_json(&universities)?;
            } else {
                for u in &universities {
                    println!("{:>3}. {} ({})", u.id, u.name, u.location);
                }
                if universities.is_empty() {
                    println!("No universities found.");
                }
            }
        }
        Command::Near {
            university_id,
            radius,
        } => {
            let radius = radius.unwrap_or(config.radius_km);
            let nearby = directory.hostels_near(university_id, radius);
            if json {
                print_json(&nearby)?;
            } else {
                match directory.university(university_id) {
                    Some(u) => println!("Hostels within {} km of {}:\n", radius, u.name),
                    None => warn!("University {} not found", university_id),
                }
                let hostels: Vec<Hostel> = nearby.into_iter().map(|n| n.hostel).collect();
                print_hostels(&hostels, false)?;
            }
        }
        Command::Map {
            university,
            query,
            radius,
        } => {
            let focus = university.and_then(|id| directory.university(id));
            let points = match focus {
                Some(u) => {
                    let radius = radius.unwrap_or(config.radius_km);
                    nearby_points(&directory.hostels_near(u.id, radius))
                }
                None => map_points(&directory.search(&query), &mut directory.rng()),
            };
            if json {
                print_json(&points)?;
            } else {
                let mut renderer = TextMapRenderer::default();
                renderer.render_markers(&points, focus);
                print!("{}", renderer.output());
            }
        }
        Command::Login {
            email,
            password,
            user_type,
        } => {
            let result = auth
                .login(LoginForm {
                    email,
                    password,
                    user_type,
                })
                .await;
            report_auth(result, "Login Successful", json)?;
        }
        Command::Signup {
            name,
            email,
            password,
            user_type,
        } => {
            let result = auth
                .signup(SignupForm {
                    name,
                    email,
                    password,
                    user_type,
                })
                .await;
            report_auth(result, "Account Created Successfully", json)?;
        }
        Command::Logout => {
            auth.logout().await?;
            println!("Logged out.");
        }
        Command::Whoami => match auth.user() {
            Some(user) if json => print_json(user)?,
            Some(user) => println!("{} <{}> ({})", user.name, user.email, user.user_type.as_str()),
            None => println!("Not logged in."),
        },
        Command::Upload { path } => match upload::upload_from_path(&path).await {
            Ok(image) if json => print_json(&image)?,
            Ok(image) => println!("{}", image.url),
            Err(e) => anyhow::bail!("Upload failed: {}", e),
        },
        Command::Post(args) => {
            let (form, paths) = args.into_parts();
            let mut images: Vec<UploadedImage> = Vec::with_capacity(paths.len());
            for path in &paths {
                let image = upload::upload_from_path(path)
                    .await
                    .with_context(|| format!("Could not attach {}", path.display()))?;
                images.push(image);
            }

            match listing::submit_listing(&auth, form, images, config.simulated_delay).await {
                Ok(submission) if json => print_json(&submission)?,
                Ok(_) => println!(
                    "Hostel Listed Successfully. It will be visible to students soon."
                ),
                Err(ListingError::Invalid(errors)) => {
                    for (field, messages) in errors.fields() {
                        eprintln!("{}: {}", field, messages.join(", "));
                    }
                    anyhow::bail!("Listing was not submitted");
                }
                Err(e) => anyhow::bail!(e),
            }
        }
        Command::Contact {
            name,
            email,
            subject,
            message,
        } => {
            let form = ContactForm {
                name,
                email,
                subject,
                message,
            };
            let receipt = contact::send_message(form, config.simulated_delay).await?;
            if json {
                print_json(&receipt)?;
            } else {
                println!("Message sent successfully! We'll get back to you soon.");
            }
        }
    }

    Ok(())
}

fn report_auth(
    result: Result<&hostel_finder::SessionUser, AuthError>,
    title: &str,
    json: bool,
) -> Result<()> {
    match result {
        Ok(user) if json => print_json(user),
        Ok(user) => {
            println!("{}: welcome, {}!", title, user.name);
            Ok(())
        }
        Err(AuthError::Invalid(errors)) => {
            for (field, messages) in errors.fields() {
                eprintln!("{}: {}", field, messages.join(", "));
            }
            anyhow::bail!("Authentication failed")
        }
        Err(e) => Err(e.into()),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_hostels(hostels: &[Hostel], json: bool) -> Result<()> {
    if json {
        return print_json(hostels);
    }

    if hostels.is_empty() {
        println!("No hostels found. Try searching for a different location.");
        return Ok(());
    }

    for (i, hostel) in hostels.iter().enumerate() {
        println!("{}. {} (${} / night)", i + 1, hostel.name, hostel.price);
        println!("   {} {:.1}", hostel.stars().render(), hostel.rating);
        println!("   {} · {}", hostel.location, hostel.distance);
        println!("   Amenities: {}", hostel.amenities.join(", "));
        println!("   ID: {}", hostel.id);
        println!();
    }

    Ok(())
}

fn print_hostel_detail(hostel: &Hostel) {
    println!("{}", hostel.name);
    println!("{} {:.1}", hostel.stars().render(), hostel.rating);
    println!("{} · {} from centre", hostel.location, hostel.distance);
    println!("${} per night", hostel.price);
    println!("Image: {}", hostel.image);
    println!("Amenities:");
    for tag in &hostel.amenities {
        let icon = hostel_finder::models::Amenity::recognize(tag)
            .map(|a| a.icon())
            .unwrap_or("•");
        println!("  {} {}", icon, tag);
    }
}
