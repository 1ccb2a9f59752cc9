extern crate electrometeo;

use clap::{Args, Parser, Subcommand};
use electrometeo::core::codes::Code;
use electrometeo::input::{ingest_scenario, RawFilterForm, ScenarioForm};
use electrometeo::interface::data_source::{DataSource, SampleDataSource};
use electrometeo::interface::department_map::DepartmentMap;
use electrometeo::interface::filters::FilterState;
use electrometeo::interface::scenario::ScenarioSession;
use electrometeo::output::FileOutput;
use electrometeo::request::{error_response, AggregationKind, AggregationRequest};
use electrometeo::run_aggregation;
use serde::Serialize;
use std::ffi::OsStr;
use std::fs;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::fmt::format::FmtSpan;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct ElectroMeteoArgs {
    #[command(subcommand)]
    command: Command,
    #[arg(short, long, action = clap::ArgAction::Count, global = true, help = "Log more detail (-v debug, -vv trace)")]
    verbose: u8,
    #[clap(long, default_value_t = false, global = true, help = "Whether to log out spans")]
    log_spans: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate the consumption of a weather scenario
    Estimate(EstimateArgs),
    /// Show the card and statistics of a department
    Department {
        code: String,
    },
    /// Show the summary of an explorer filter selection
    Summary(SummaryArgs),
    /// Aggregate raw consumption measurements into daily figures
    AggregateConsumption(AggregateArgs),
    /// Aggregate raw weather observations into daily figures
    AggregateWeather(AggregateArgs),
}

#[derive(Args, Debug, Default)]
struct EstimateArgs {
    #[arg(long, short, help = "Path to a scenario in .json format", conflicts_with = "preset")]
    input_file: Option<String>,
    #[arg(long, short, help = "Start from a preset: cold, mild, hot or storm")]
    preset: Option<String>,
    #[arg(long, allow_hyphen_values = true, help = "Temperature in °C")]
    temperature: Option<String>,
    #[arg(long, help = "Wind speed in km/h")]
    wind: Option<String>,
    #[arg(long, help = "Relative humidity in %")]
    humidity: Option<String>,
    #[arg(long, help = "Precipitation in mm")]
    precipitation: Option<String>,
    #[arg(long, help = "Department code, e.g. 57")]
    department: Option<String>,
    #[arg(long, help = "winter, spring, summer or autumn")]
    season: Option<String>,
    #[arg(long, help = "weekday or weekend")]
    day_type: Option<String>,
}

#[derive(Args, Debug, Default)]
struct SummaryArgs {
    #[arg(long, value_delimiter = ',', help = "Checked department codes, e.g. 08,51")]
    departments: Vec<String>,
    #[arg(long, help = "First day, yyyy-mm-dd")]
    start: Option<String>,
    #[arg(long, help = "Last day, yyyy-mm-dd")]
    end: Option<String>,
    #[arg(long, help = "all, winter, spring, summer or autumn")]
    season: Option<String>,
    #[arg(long, help = "all, weekday or weekend")]
    day_type: Option<String>,
}

#[derive(Args, Debug)]
struct AggregateArgs {
    #[arg(help = "Path to the raw records in .csv format")]
    input_file: String,
    #[arg(long, short, help = "Region code for consumption, department code for weather")]
    code: String,
    #[arg(long, short, help = "First day, yyyy-mm-dd")]
    start: String,
    #[arg(long, short, help = "Last day, yyyy-mm-dd")]
    end: String,
    #[arg(long, short, help = "Directory to write results to")]
    output_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = ElectroMeteoArgs::parse();

    // set up basic tracing
    let tracing_subscriber = {
        let level = match args.verbose {
            0 => tracing::Level::INFO,
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };
        let mut builder = tracing_subscriber::fmt::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr);

        if args.log_spans {
            builder = builder.with_span_events(FmtSpan::CLOSE);
        }

        builder.finish()
    };
    tracing::subscriber::set_global_default(tracing_subscriber)?;

    match args.command {
        Command::Estimate(estimate_args) => estimate(estimate_args),
        Command::Department { code } => department(&code),
        Command::Summary(summary_args) => summary(summary_args),
        Command::AggregateConsumption(aggregate_args) => {
            aggregate(AggregationKind::Consumption, aggregate_args)
        }
        Command::AggregateWeather(aggregate_args) => {
            aggregate(AggregationKind::Weather, aggregate_args)
        }
    }
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);

    Ok(())
}

fn estimate(args: EstimateArgs) -> anyhow::Result<()> {
    let mut session = match args.input_file {
        Some(ref file) => ScenarioSession::new(ingest_scenario(BufReader::new(File::open(file)?))?),
        None => ScenarioSession::new(
            ScenarioForm {
                temperature: args.temperature,
                wind: args.wind,
                humidity: args.humidity,
                precipitation: args.precipitation,
                department: args.department,
                season: args.season,
                day_type: args.day_type,
            }
            .to_input(),
        ),
    };

    let calculation = match args.preset {
        Some(ref preset) => match session.load_preset(preset) {
            Some((calculation, notification)) => {
                debug!("{}", notification.message);
                calculation
            }
            None => anyhow::bail!("unknown preset '{preset}', expected cold, mild, hot or storm"),
        },
        None => session.calculate(),
    };

    print_json(&calculation.view)?;
    println!("{}", calculation.view.comparison_text());

    Ok(())
}

fn department(code: &str) -> anyhow::Result<()> {
    let code = Code::parse(code.trim());
    let (card, notification) = DepartmentMap::default().select(&code);
    debug!("{}", notification.message);

    print_json(&card)?;
    print_json(&SampleDataSource.department_stats(&code))
}

fn summary(args: SummaryArgs) -> anyhow::Result<()> {
    let form = RawFilterForm {
        checked_departments: args.departments,
        date_start: args.start,
        date_end: args.end,
        season: args.season,
        day_type: args.day_type,
    };
    let mut filters = FilterState::default();
    filters.apply(form.to_form());

    print_json(&filters.summary())
}

fn aggregate(kind: AggregationKind, args: AggregateArgs) -> anyhow::Result<()> {
    let request = match AggregationRequest::parse(kind, &args.code, &args.start, &args.end) {
        Ok(request) => request,
        Err(error) => {
            print_json(&error_response(&error))?;
            return Err(error.into());
        }
    };

    let input_file = args.input_file.as_str();
    let output_path = match args.output_dir {
        Some(path) => path,
        None => {
            let input_file_ext = Path::new(input_file).extension().and_then(OsStr::to_str);
            let input_file_stem = match input_file_ext {
                Some(ext) => &input_file[..(input_file.len() - ext.len() - 1)],
                None => input_file,
            };
            PathBuf::from(format!("{input_file_stem}__results"))
        }
    };
    fs::create_dir_all(&output_path)?;
    let file_output = FileOutput::new(output_path, "electrometeo__{}.{}".to_string());

    let report = run_aggregation(
        &request,
        BufReader::new(File::open(Path::new(input_file))?),
        &file_output,
    )?;
    debug!("report: {}", serde_json::to_string_pretty(&report)?);

    print_json(&request.success_response())
}
