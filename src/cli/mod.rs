use crate::{
    config::PlannerConfig, core::TravelPlanner, logging::init_tracing, types::TripRequest,
};
use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use tracing::{error, info};

fn trip_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("destination")
                .short('d')
                .long("destination")
                .value_name("CITY")
                .help("Where the trip goes")
                .required_unless_present("request"),
        )
        .arg(
            Arg::new("departure")
                .short('f')
                .long("departure")
                .value_name("CITY")
                .help("Departure city"),
        )
        .arg(
            Arg::new("start")
                .short('s')
                .long("start-date")
                .value_name("YYYY-MM-DD")
                .help("First day of the trip")
                .required_unless_present("request"),
        )
        .arg(
            Arg::new("end")
                .short('e')
                .long("end-date")
                .value_name("YYYY-MM-DD")
                .help("Last day of the trip")
                .required_unless_present("request"),
        )
        .arg(
            Arg::new("people")
                .short('p')
                .long("people")
                .value_name("COUNT")
                .value_parser(clap::value_parser!(u32))
                .help("Number of travelers"),
        )
        .arg(
            Arg::new("budget")
                .short('b')
                .long("budget")
                .value_name("AMOUNT")
                .value_parser(clap::value_parser!(u32))
                .help("Total budget in units of 10,000 KRW"),
        )
        .arg(
            Arg::new("purpose")
                .long("purpose")
                .value_name("TEXT")
                .help("Purpose of the trip or any special requests"),
        )
        .arg(
            Arg::new("request")
                .short('r')
                .long("request")
                .value_name("FILE")
                .help("Read the trip from a JSON file instead of flags"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .action(ArgAction::SetTrue)
                .help("Print the result as JSON"),
        )
}

fn build_command() -> Command {
    Command::new("trip-agent")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Multi-agent travel planner: weather, transport, hotel, itinerary and food")
        .subcommand_required(true)
        .subcommand(trip_args(
            Command::new("plan").about("Generate the full five-part travel plan"),
        ))
        .subcommand(trip_args(
            Command::new("weather").about("Generate only the weather recommendation"),
        ))
        .subcommand(
            Command::new("serve").about("Run the HTTP API").arg(
                Arg::new("port")
                    .long("port")
                    .value_name("PORT")
                    .value_parser(clap::value_parser!(u16))
                    .help("Port to listen on (or set PORT env var)"),
            ),
        )
        .subcommand(Command::new("schema").about("Print the JSON schema of a trip request"))
}

fn trip_from_matches(matches: &ArgMatches) -> anyhow::Result<TripRequest> {
    let trip = match matches.get_one::<String>("request") {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read trip request from {path}"))?;
            let value: serde_json::Value = serde_json::from_str(&raw)
                .with_context(|| format!("{path} is not valid JSON"))?;
            TripRequest::from_value(&value)
        }
        None => {
            let text = |id: &str| matches.get_one::<String>(id).cloned().unwrap_or_default();
            let mut trip = TripRequest::new(text("destination"), text("start"), text("end"))
                .with_departure(text("departure"))
                .with_purpose(text("purpose"));
            trip.people = matches.get_one::<u32>("people").copied();
            trip.budget = matches.get_one::<u32>("budget").copied();
            trip
        }
    };

    trip.validate()?;
    Ok(trip)
}

/// CLI entry point for the trip-agent binary
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let matches = build_command().get_matches();

    match matches.subcommand() {
        Some(("schema", _)) => {
            let schema = schemars::schema_for!(TripRequest);
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
        Some(("plan", sub)) => {
            let trip = trip_from_matches(sub)?;
            let planner = TravelPlanner::from_config(&PlannerConfig::from_env()?)?;
            info!("Planning trip to {} ({})", trip.destination, trip.period());

            let plan = planner.generate_plan(&trip).await.map_err(|err| {
                error!("Travel plan failed: {}", err);
                err
            })?;

            if sub.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                for (domain, text) in plan.iter() {
                    println!("\n===== {} =====\n{}", domain.agent_name(), text);
                }
            }
        }
        Some(("weather", sub)) => {
            let trip = trip_from_matches(sub)?;
            let planner = TravelPlanner::from_config(&PlannerConfig::from_env()?)?;

            let report = planner.generate_weather_only(&trip).await?;
            if sub.get_flag("json") {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.weather);
            }
        }
        Some(("serve", sub)) => serve(sub).await?,
        Some((other, _)) => anyhow::bail!("unknown subcommand {other}"),
        None => anyhow::bail!("a subcommand is required"),
    }

    Ok(())
}

#[cfg(feature = "server")]
async fn serve(matches: &ArgMatches) -> anyhow::Result<()> {
    let config = PlannerConfig::from_env()?;
    let port = matches.get_one::<u16>("port").copied().unwrap_or(config.port);
    let planner = TravelPlanner::from_config(&config)?;
    crate::server::serve(std::sync::Arc::new(planner), port).await;
    Ok(())
}

#[cfg(not(feature = "server"))]
async fn serve(_matches: &ArgMatches) -> anyhow::Result<()> {
    anyhow::bail!("server feature not enabled. Build with --features server")
}
