use std::path::PathBuf;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use photomap::{cli, config, error};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Log in to Photomap
    Login(LoginOptions),

    /// Create a Photomap account
    Register(RegisterOptions),

    /// Forget the stored session
    Logout,

    /// Upgrade the account to premium
    Premium,

    /// Show account, plan and storage quota
    Profile,

    /// List visited countries
    Countries,

    /// List years with photos
    Years(YearsOptions),

    /// List the photos of a country
    Photos(PhotosOptions),

    /// Upload photos for a country and year
    Upload(UploadOptions),

    /// Delete photos of a country
    Delete(DeleteOptions),

    /// Handle albums
    Album(AlbumOptions),

    /// Show facts about a country
    Country(CountryOptions),

    /// Show every photo grouped by year
    Timeline(TimelineOptions),

    /// Manage the photos of a country interactively
    Manage(ManageOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct LoginOptions {
    #[clap(long)]
    email: Option<String>,
    #[clap(long)]
    password: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct RegisterOptions {
    #[clap(long)]
    fullname: Option<String>,
    #[clap(long)]
    email: Option<String>,
    /// At least 6 characters
    #[clap(long)]
    password: Option<String>,
    #[clap(long)]
    country: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct YearsOptions {
    /// Restrict to one country (ISO alpha-2 code)
    #[clap(long)]
    country: Option<String>,
}

#[derive(Parser, Debug, Clone)]
pub struct PhotosOptions {
    /// ISO alpha-2 country code
    country: String,
    #[clap(long, conflicts_with = "album")]
    year: Option<i32>,
    #[clap(long)]
    album: Option<i64>,
    /// Open every photo in the browser
    #[clap(long)]
    open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct UploadOptions {
    /// ISO alpha-2 country code
    country: String,
    /// Year the photos were taken
    #[clap(long)]
    year: i32,
    /// Files to upload (JPG, PNG, WEBP, BMP or HEIC)
    #[clap(required = true)]
    files: Vec<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct DeleteOptions {
    /// ISO alpha-2 country code
    country: String,
    /// Comma separated image ids
    #[clap(long, conflicts_with_all = ["year", "all"])]
    ids: Option<String>,
    /// Delete every photo of this year
    #[clap(long, conflicts_with = "all")]
    year: Option<i32>,
    /// Delete every photo of the country
    #[clap(long)]
    all: bool,
    /// Do not ask for confirmation
    #[clap(long, short)]
    yes: bool,
}

#[derive(Parser, Debug, Clone)]
#[command(about = "Handle albums")]
pub struct AlbumOptions {
    #[command(subcommand)]
    command: AlbumSubcommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum AlbumSubcommand {
    /// List the albums of a country
    List { country: String },

    /// Create an album from image ids (premium)
    Create {
        country: String,
        #[clap(long)]
        name: String,
        /// Comma separated image ids
        #[clap(long)]
        ids: String,
    },

    /// Delete an album and its photos
    Delete {
        country: String,
        album_id: i64,
        #[clap(long, short)]
        yes: bool,
    },
}

#[derive(Parser, Debug, Clone)]
pub struct CountryOptions {
    /// ISO alpha-2 country code
    country: String,
    /// Open a flight search to the capital
    #[clap(long)]
    flights: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct TimelineOptions {
    #[clap(long)]
    year: Option<i32>,
}

#[derive(Parser, Debug, Clone)]
pub struct ManageOptions {
    /// ISO alpha-2 country code
    country: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Login(opt) => cli::login(opt.email, opt.password).await,
        Command::Register(opt) => {
            cli::register(opt.fullname, opt.email, opt.password, opt.country).await
        }
        Command::Logout => cli::logout().await,
        Command::Premium => cli::premium().await,
        Command::Profile => cli::profile().await,
        Command::Countries => cli::countries().await,
        Command::Years(opt) => cli::years(opt.country).await,
        Command::Photos(opt) => cli::photos(opt.country, opt.year, opt.album, opt.open).await,
        Command::Upload(opt) => cli::upload(opt.country, opt.year, opt.files).await,
        Command::Delete(opt) => cli::delete(opt.country, opt.ids, opt.year, opt.all, opt.yes).await,
        Command::Album(opt) => match opt.command {
            AlbumSubcommand::List { country } => cli::list_albums(country).await,
            AlbumSubcommand::Create { country, name, ids } => {
                cli::create_album(country, name, ids).await
            }
            AlbumSubcommand::Delete {
                country,
                album_id,
                yes,
            } => cli::delete_album(country, album_id, yes).await,
        },
        Command::Country(opt) => cli::country(opt.country, opt.flights).await,
        Command::Timeline(opt) => cli::timeline(opt.year).await,
        Command::Manage(opt) => cli::manage(opt.country).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
