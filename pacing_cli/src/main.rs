use chrono::Utc;
use clap::{Parser, Subcommand};
use pacing_core::units::{celsius_to_fahrenheit, format_distance_in, format_pace_in};
use pacing_core::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "pacefade")]
#[command(about = "Race pacing and fade projection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Use a specific config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a goal race from a recent result
    Project {
        /// Goal race (5k, 10k, half, marathon)
        #[arg(long)]
        goal_race: String,

        /// Goal time (M:SS or H:MM:SS)
        #[arg(long)]
        goal_time: String,

        /// Recent race (5k, 10k, half, marathon)
        #[arg(long)]
        recent_race: String,

        /// Recent race time (M:SS or H:MM:SS)
        #[arg(long)]
        recent_time: String,

        /// Seconds per mile added to sustainable pace (negative = faster start)
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        adjust: f64,

        /// Display unit (mi, km)
        #[arg(long)]
        unit: Option<String>,

        /// Race-day temperature (°F unless --celsius)
        #[arg(long, allow_hyphen_values = true)]
        temp: Option<f64>,

        /// Interpret --temp as Celsius
        #[arg(long, requires = "temp")]
        celsius: bool,

        /// Humidity (low, moderate, high)
        #[arg(long, requires = "temp")]
        humidity: Option<String>,

        #[command(flatten)]
        output: OutputArgs,

        /// Don't remember these inputs
        #[arg(long)]
        no_save: bool,
    },

    /// Re-run the projection from the last saved inputs (default)
    Last {
        /// Display unit (mi, km)
        #[arg(long)]
        unit: Option<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show equivalent times for every race distance
    Predict {
        /// Race the time was run at (5k, 10k, half, marathon)
        #[arg(long)]
        race: String,

        /// Race time (M:SS or H:MM:SS)
        #[arg(long)]
        time: String,

        /// Display unit (mi, km)
        #[arg(long)]
        unit: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args, Default)]
struct OutputArgs {
    /// Also show aggressive and conservative scenarios
    #[arg(long)]
    compare: bool,

    /// Print JSON instead of a report
    #[arg(long)]
    json: bool,

    /// Write the schedule to a CSV file
    #[arg(long)]
    csv: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.verbose {
        pacing_core::logging::init_with_level("debug");
    } else {
        pacing_core::logging::init();
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let errors = config.validate();
    if !errors.is_empty() {
        eprintln!("Configuration errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::Config("Invalid configuration".into()));
    }

    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| config.data.data_dir.clone());
    tracing::debug!("Using data directory {:?}", data_dir);

    match cli.command {
        Some(Commands::Project {
            goal_race,
            goal_time,
            recent_race,
            recent_time,
            adjust,
            unit,
            temp,
            celsius,
            humidity,
            output,
            no_save,
        }) => {
            let temperature_f = temp.map(|t| if celsius { celsius_to_fahrenheit(t) } else { t });
            let humidity = match humidity {
                Some(h) => Some(h.parse::<Humidity>()?),
                None => None,
            };
            let unit = match unit {
                Some(u) => u.parse::<DistanceUnit>()?,
                None => config.display.unit,
            };

            let record = InputRecord {
                goal_race: goal_race.parse()?,
                goal_time,
                recent_race: recent_race.parse()?,
                recent_time,
                pacing_adjustment: adjust,
                unit,
                temperature_f,
                humidity,
                saved_at: Utc::now(),
            };

            cmd_project(&config, &record, unit, &output)?;

            if !no_save {
                record.save(&InputRecord::path_in(&data_dir))?;
            }
            Ok(())
        }
        Some(Commands::Last { unit, output }) => cmd_last(&config, &data_dir, unit, &output),
        Some(Commands::Predict {
            race,
            time,
            unit,
            json,
        }) => {
            let unit = match unit {
                Some(u) => u.parse::<DistanceUnit>()?,
                None => config.display.unit,
            };
            cmd_predict(&config, &race, &time, unit, json)
        }
        None => cmd_last(&config, &data_dir, None, &OutputArgs::default()),
    }
}

fn cmd_project(
    config: &Config,
    record: &InputRecord,
    unit: DistanceUnit,
    output: &OutputArgs,
) -> Result<()> {
    let goal_seconds = parse_time_field("goal", &record.goal_time)?;
    let recent_seconds = parse_time_field("recent", &record.recent_time)?;

    let request = ProjectionRequest {
        goal_race: record.goal_race,
        goal_seconds,
        recent_race: record.recent_race,
        recent_seconds,
        pacing_adjustment: record.pacing_adjustment,
    };

    let result = project(config, &request)?;
    let comparison = if output.compare {
        Some(compare(config, &request)?)
    } else {
        None
    };
    let weather = record.temperature_f.map(|temp| {
        config.weather.adjust(
            result.projected_finish,
            temp,
            record.humidity.unwrap_or_default(),
        )
    });

    if output.json {
        let value = serde_json::json!({
            "projection": result,
            "comparison": comparison,
            "weather": weather,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        display_projection(&result, recent_seconds, unit);
        if let Some(ref weather) = weather {
            display_weather(weather, result.projected_finish);
        }
        if let Some(ref comparison) = comparison {
            display_comparison(comparison, unit);
        }
    }

    if let Some(ref path) = output.csv {
        let count = write_schedule_csv(path, &result, unit)?;
        if !output.json {
            println!("✓ Wrote {} segments to {}", count, path.display());
        }
    }

    Ok(())
}

fn cmd_last(
    config: &Config,
    data_dir: &Path,
    unit: Option<String>,
    output: &OutputArgs,
) -> Result<()> {
    let path = InputRecord::path_in(data_dir);
    let Some(record) = InputRecord::load(&path)? else {
        println!("No saved inputs yet - run `pacefade project` first.");
        return Ok(());
    };

    let unit = match unit {
        Some(u) => u.parse::<DistanceUnit>()?,
        None => record.unit,
    };

    if !output.json {
        println!(
            "Using inputs saved {}",
            record
                .saved_at
                .with_timezone(&chrono::Local)
                .format("%Y-%m-%d %H:%M")
        );
    }

    cmd_project(config, &record, unit, output)
}

fn cmd_predict(config: &Config, race: &str, time: &str, unit: DistanceUnit, json: bool) -> Result<()> {
    let race: RaceKey = race.parse()?;
    let seconds = parse_time_field("race", time)?;
    let predictions = config.predictor.predict_all(race, seconds)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&predictions)?);
        return Ok(());
    }

    println!("\nEquivalent performances for {} in {}\n", race, format_duration(seconds));
    println!("  {:<15} {:>10} {:>10} {:>10}", "Race", "Distance", "Time", "Pace");
    for prediction in &predictions {
        println!(
            "  {:<15} {:>10} {:>10} {:>10}",
            prediction.race.label(),
            format_distance_in(prediction.race.miles(), unit),
            format_duration(prediction.seconds),
            format_pace_in(prediction.pace_per_mile, unit)
        );
    }
    println!();

    Ok(())
}

/// Validate a time field, reporting which field was rejected
fn parse_time_field(label: &str, text: &str) -> Result<f64> {
    match parse_time(text) {
        Ok(seconds) => Ok(f64::from(seconds)),
        Err(e) => {
            eprintln!("Invalid {} time '{}': {}", label, text, e);
            Err(e.into())
        }
    }
}

fn display_projection(result: &ProjectionResult, recent_seconds: f64, unit: DistanceUnit) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {} PROJECTION", result.goal_race.label().to_uppercase());
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!(
        "  Based on:          {} in {}",
        result.recent_race,
        format_duration(recent_seconds)
    );
    println!(
        "  Sustainable pace:  {}",
        format_pace_in(result.sustainable_pace, unit)
    );
    println!("  Goal pace:         {}", format_pace_in(result.goal_pace, unit));
    println!(
        "  Start pace:        {} ({})",
        format_pace_in(result.start_pace, unit),
        describe_adjustment(result.deviation)
    );
    println!(
        "  Projected finish:  {}",
        format_duration(result.projected_finish)
    );
    println!(
        "  Versus goal:       {} ({})",
        format_delta(result.time_delta),
        if result.time_delta > 0.0 {
            "behind goal"
        } else {
            "on or ahead of goal"
        }
    );
    println!();
    println!("  Risk: {}", result.risk.tier.label().to_uppercase());
    println!("  {}", result.risk.message);
    println!();
    println!(
        "  {:>4} {:>9} {:>10} {:>9} {:>9} {:>6}",
        "Seg", "Dist", "Pace", "Split", "Elapsed", "Fade"
    );
    for segment in &result.segments {
        let fade = if segment.fade_penalty > 0.0 {
            format!("+{:.0}s", segment.fade_penalty)
        } else {
            "-".to_string()
        };
        println!(
            "  {:>4} {:>9} {:>10} {:>9} {:>9} {:>6}",
            segment.index,
            format_distance_in(segment.distance_through, unit),
            format_pace_in(segment.pace, unit),
            format_duration(segment.segment_time),
            format_duration(segment.elapsed),
            fade
        );
    }
    println!();
}

fn describe_adjustment(deviation: f64) -> String {
    let rounded = deviation.round();
    if rounded > 0.0 {
        format!("{}s/mi faster than sustainable", rounded)
    } else if rounded < 0.0 {
        format!("{}s/mi slower than sustainable", -rounded)
    } else {
        "even with sustainable".to_string()
    }
}

fn display_weather(weather: &WeatherAdjustment, finish: f64) {
    println!(
        "  Weather: {:.0}°F, {} humidity → +{:.1}% ({} → {})",
        weather.temperature_f,
        weather.humidity,
        weather.slowdown * 100.0,
        format_duration(finish),
        format_duration(weather.adjusted_finish)
    );
    println!();
}

fn display_comparison(comparison: &ScenarioComparison, unit: DistanceUnit) {
    println!("─────────────────────────────────────────");
    println!("  Scenarios (±{:.0}s/mi)", comparison.delta);
    println!();
    println!(
        "  {:<13} {:>10} {:>9} {:>8} {:<12}",
        "Scenario", "Start", "Finish", "vs Goal", " Risk"
    );
    for (name, scenario) in [
        ("Aggressive", &comparison.aggressive),
        ("Current", &comparison.current),
        ("Conservative", &comparison.conservative),
    ] {
        println!(
            "  {:<13} {:>10} {:>9} {:>8}  {}",
            name,
            format_pace_in(scenario.start_pace, unit),
            format_duration(scenario.projected_finish),
            format_delta(scenario.time_delta),
            scenario.risk.tier
        );
    }
    println!();
}
