use crate::config::toml_config::{TomlConfig, DEFAULT_CONFIG_PATH};
use crate::core::configuration::{BookingChange, Configuration};
use crate::core::contact::{ContactChange, ContactMessage};
use crate::core::url_sync;
use crate::domain::model::{Frequency, ServiceType};
use crate::utils::error::{BookingError, Result};
use crate::utils::validation::Validate;
use clap::{Args, Parser, Subcommand};
use std::path::Path;

#[derive(Debug, Clone, Parser)]
#[command(name = "cleaning-booking")]
#[command(about = "Quote, preview and submit cleaning service bookings")]
pub struct CliConfig {
    /// Path to the TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Booking service base URL, overrides the configuration file
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout, overrides the configuration file
    #[arg(long, global = true)]
    pub timeout_seconds: Option<u64>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the estimated price for a selection
    Quote {
        #[command(flatten)]
        selection: SelectionArgs,

        /// Show how the price is built up
        #[arg(long)]
        breakdown: bool,

        /// Print the breakdown as JSON
        #[arg(long)]
        json: bool,
    },
    /// List services with their rates and starting prices
    Services {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a shareable booking link for a selection
    Link {
        #[command(flatten)]
        selection: SelectionArgs,
    },
    /// Validate and submit a booking request
    Book(BookArgs),
    /// Send a message through the contact form
    Contact(ContactArgs),
}

impl Command {
    pub fn needs_service(&self) -> bool {
        matches!(self, Command::Book(_) | Command::Contact(_))
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct SelectionArgs {
    /// Start from a booking link or query string, e.g. "/booking?service=deep&rooms=3"
    #[arg(long)]
    pub from_link: Option<String>,

    #[arg(long)]
    pub service: Option<ServiceType>,

    #[arg(long)]
    pub rooms: Option<u32>,

    #[arg(long)]
    pub bathrooms: Option<u32>,

    #[arg(long)]
    pub frequency: Option<Frequency>,
}

impl SelectionArgs {
    /// Explicit flags are applied on top of whatever the link selected.
    pub fn to_configuration(&self) -> Configuration {
        let mut configuration = match &self.from_link {
            Some(link) => url_sync::configuration_from_link(link),
            None => Configuration::default(),
        };

        configuration.apply_all(
            [
                self.service.map(BookingChange::ServiceType),
                self.rooms.map(BookingChange::Rooms),
                self.bathrooms.map(BookingChange::Bathrooms),
                self.frequency.map(BookingChange::Frequency),
            ]
            .into_iter()
            .flatten(),
        );
        configuration
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct BookArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Preferred date, YYYY-MM-DD
    #[arg(long)]
    pub date: Option<String>,

    /// Preferred time slot, e.g. "10:00 AM"
    #[arg(long)]
    pub time: Option<String>,

    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub instructions: Option<String>,
}

impl BookArgs {
    pub fn to_configuration(&self) -> Configuration {
        let mut configuration = self.selection.to_configuration();
        let fields = [
            self.date.clone().map(BookingChange::PreferredDate),
            self.time.clone().map(BookingChange::PreferredTime),
            self.first_name.clone().map(BookingChange::FirstName),
            self.last_name.clone().map(BookingChange::LastName),
            self.email.clone().map(BookingChange::Email),
            self.phone.clone().map(BookingChange::Phone),
            self.address.clone().map(BookingChange::Address),
            self.instructions.clone().map(BookingChange::Instructions),
        ];
        configuration.apply_all(fields.into_iter().flatten());
        configuration
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct ContactArgs {
    #[arg(long)]
    pub first_name: Option<String>,

    #[arg(long)]
    pub last_name: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub message: Option<String>,
}

impl ContactArgs {
    pub fn to_message(&self) -> ContactMessage {
        let mut message = ContactMessage::default();
        let fields = [
            self.first_name.clone().map(ContactChange::FirstName),
            self.last_name.clone().map(ContactChange::LastName),
            self.email.clone().map(ContactChange::Email),
            self.phone.clone().map(ContactChange::Phone),
            self.message.clone().map(ContactChange::Message),
        ];
        message.apply_all(fields.into_iter().flatten());
        message
    }
}

impl CliConfig {
    /// Loads the configuration file if there is one, then applies the
    /// command line overrides. Without a file, `--base-url` is required.
    pub fn service_config(&self) -> Result<TomlConfig> {
        let path = self.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        let file_present = self.config.is_some() || Path::new(path).exists();

        let mut config = if file_present {
            tracing::debug!("Loading configuration from {}", path);
            TomlConfig::from_file(path)?
        } else if let Some(base_url) = &self.base_url {
            TomlConfig::from_base_url(base_url.clone())
        } else {
            return Err(BookingError::MissingConfigError {
                field: "service.base_url".to_string(),
            });
        };

        if let Some(base_url) = &self.base_url {
            config.service.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.service.timeout_seconds = Some(timeout);
        }

        config.validate()?;
        Ok(config)
    }
}
