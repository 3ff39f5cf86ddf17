use clap::Parser;
use cleaning_booking::config::cli::{BookArgs, Command, ContactArgs};
use cleaning_booking::core::{catalog, url_sync};
use cleaning_booking::utils::error::ErrorSeverity;
use cleaning_booking::utils::logger;
use cleaning_booking::{
    BookingError, BookingSession, CliConfig, ConfigProvider, ContactSession, HttpGateway,
    SubmissionController, TomlConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // Load the service configuration before logging, the file picks the log format.
    let service_config = if cli.command.needs_service() {
        match cli.service_config() {
            Ok(config) => Some(config),
            Err(e) => exit_with(&e),
        }
    } else {
        None
    };

    if service_config.as_ref().is_some_and(TomlConfig::json_logging) {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    match &cli.command {
        Command::Quote {
            selection,
            breakdown,
            json,
        } => {
            let configuration = selection.to_configuration();
            let quote = configuration.breakdown();
            if *json {
                println!("{}", serde_json::to_string_pretty(&quote)?);
            } else {
                println!(
                    "{} · {} room(s) · {} bathroom(s) · {}",
                    configuration.service_type().label(),
                    configuration.rooms(),
                    configuration.bathrooms(),
                    configuration.frequency().label()
                );
                if *breakdown {
                    println!("  Base price (1 room/1 bath): ${}", quote.base);
                    println!("  Additional rooms:           ${}", quote.rooms_charge);
                    println!("  Additional bathrooms:       ${}", quote.bathrooms_charge);
                    println!("  Subtotal:                   ${}", quote.subtotal);
                    if quote.discount_percent > 0 {
                        println!(
                            "  Frequency discount ({}%):    -${}",
                            quote.discount_percent, quote.discount_amount
                        );
                    }
                }
                println!("💲 Estimated total cost: ${}", configuration.estimated_price());
            }
        }
        Command::Services { json } => {
            let offerings = catalog::service_catalog();
            if *json {
                println!("{}", serde_json::to_string_pretty(&offerings)?);
            } else {
                for offering in offerings {
                    println!(
                        "{:<22} from ${:<4} {}",
                        offering.label, offering.starting_price, offering.description
                    );
                    println!(
                        "{:<22} base ${} · +${}/room · +${}/bathroom",
                        "",
                        offering.rates.base_price,
                        offering.rates.per_room_price,
                        offering.rates.per_bathroom_price
                    );
                    if offering.starting_frequency.is_recurring() {
                        let cadences: Vec<String> =
                            catalog::recurring_price_list(offering.service)
                                .into_iter()
                                .map(|(frequency, price)| format!("{} ${}", frequency.label(), price))
                                .collect();
                        println!("{:<22} {}", "", cadences.join(" · "));
                    }
                }
                println!();
                for option in catalog::frequency_options() {
                    match option.badge {
                        Some(badge) => println!("{:<10} {}", option.label, badge),
                        None => println!("{}", option.label),
                    }
                }
            }
        }
        Command::Link { selection } => {
            println!("{}", url_sync::booking_link(&selection.to_configuration()));
        }
        Command::Book(args) => {
            if let Some(config) = &service_config {
                book(config, args).await;
            }
        }
        Command::Contact(args) => {
            if let Some(config) = &service_config {
                contact(config, args).await;
            }
        }
    }

    Ok(())
}

fn controller(config: &TomlConfig) -> SubmissionController<HttpGateway> {
    match HttpGateway::from_config(config) {
        Ok(gateway) => SubmissionController::new(gateway).with_timeout(config.timeout()),
        Err(e) => exit_with(&e),
    }
}

async fn book(config: &TomlConfig, args: &BookArgs) {
    let mut session = BookingSession::with_form(args.to_configuration(), controller(config));
    tracing::info!("Estimated price: ${}", session.estimate());

    match session.submit().await {
        Ok(()) => {
            println!("✅ Booking submitted successfully!");
            println!("We'll contact you within 2 hours to confirm your appointment.");
        }
        Err(e) => exit_with(&e),
    }
}

async fn contact(config: &TomlConfig, args: &ContactArgs) {
    let mut session = ContactSession::with_form(args.to_message(), controller(config));

    match session.submit().await {
        Ok(()) => {
            println!("✅ Message sent successfully!");
            println!("We'll get back to you within 24 hours.");
        }
        Err(e) => exit_with(&e),
    }
}

fn exit_with(e: &BookingError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );

    if let BookingError::Validation(errors) = e {
        for (field, message) in errors.iter() {
            eprintln!("  • {}: {}", field, message);
        }
    }
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 4,      // form input
        ErrorSeverity::Medium => 2,   // retryable
        ErrorSeverity::High => 1,     // configuration
        ErrorSeverity::Critical => 3, // system
    };
    std::process::exit(exit_code);
}
