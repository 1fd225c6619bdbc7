//! Stepboard CLI
//!
//! Terminal front end for the step challenge:
//! - List participants and activities
//! - Show the leaderboard, once or continuously
//! - Show a participant's totals
//! - Log today's activity with a screenshot

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stepboard::config::generate_default_config;
use stepboard::{
    Activity, ChallengeEndpoint, Config, Controller, HttpEndpoint, LoggingConfig, Podium, Screen,
    Screenshot, DURATION_CHOICES,
};

#[derive(Parser)]
#[command(name = "stepboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Daily step challenge: log activities and follow the leaderboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Endpoint URL (overrides config)
    #[arg(long, global = true)]
    pub endpoint: Option<String>,

    /// Config file (default: ~/.config/stepboard/config.toml or ./stepboard.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List participants
    Participants,

    /// List activities and their rates
    Activities,

    /// Show the top of the leaderboard
    Leaderboard {
        /// Highlight this participant and show their rank
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Show a participant's totals and whether today is already logged
    Status {
        #[arg(short, long)]
        user: String,
    },

    /// Log today's activity
    Submit {
        #[arg(short, long)]
        user: String,
        /// Activity label (e.g. Correr, Ciclismo)
        #[arg(short, long)]
        activity: String,
        /// Duration in minutes
        #[arg(short, long)]
        duration: u32,
        /// Steps counted by a device, added on top of the activity estimate
        #[arg(short, long)]
        steps: String,
        /// Screenshot proving the activity
        #[arg(long)]
        screenshot: PathBuf,
    },

    /// Refresh the leaderboard until interrupted
    Watch {
        #[arg(short, long)]
        user: Option<String>,
    },

    /// Print a default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().or_else(Config::default_path);
    let mut config = Config::load_or_env(config_path.as_deref())?;
    if let Some(url) = &cli.endpoint {
        config.endpoint.url = url.clone();
    }

    init_tracing(&config.logging);
    if let Some(path) = &config_path {
        tracing::info!("Loaded config from {:?}", path);
    }

    let endpoint = HttpEndpoint::new(
        config.endpoint.url.clone(),
        config.endpoint.request_timeout_secs,
    )?;
    let mut app = Controller::new(endpoint);

    match cli.command {
        Commands::Participants => {
            if app.load_participants().await {
                for participant in app.roster() {
                    println!("{}", participant.name);
                }
            }
            flush_notice(&mut app);
        }

        Commands::Activities => {
            println!("{:<24} {:>10} {:>10}", "ACTIVITY", "STEPS/MIN", "CAL/MIN");
            for activity in Activity::catalogue() {
                let rates = activity.rates();
                println!(
                    "{:<24} {:>10} {:>10}",
                    activity.label(),
                    rates.steps_per_minute,
                    rates.calories_per_minute
                );
            }
            let durations: Vec<String> = DURATION_CHOICES.iter().map(|d| d.to_string()).collect();
            println!("\nDurations (min): {}", durations.join(", "));
        }

        Commands::Leaderboard { user } => {
            if let Some(user) = user {
                app.select_user(&user).await;
            }
            app.refresh_leaderboard().await;
            print_board(&app.screen());
            flush_notice(&mut app);
        }

        Commands::Status { user } => {
            app.select_user(&user).await;
            app.refresh_leaderboard().await;
            print_status(&app.screen());
            flush_notice(&mut app);
        }

        Commands::Submit {
            user,
            activity,
            duration,
            steps,
            screenshot,
        } => {
            if Activity::from_label(&activity).is_none() {
                tracing::warn!("Unknown activity {:?}, walking rates apply", activity);
            }

            app.load().await;
            app.select_user(&user).await;
            app.choose_activity(&activity);
            app.choose_duration(duration);
            app.set_manual_steps(&steps);
            app.attach_screenshot(Some(Screenshot::from_path(&screenshot)?));

            let result = app.submit().await;
            flush_notice(&mut app);
            let submission = result?;

            println!(
                "Logged {} for {}: {} steps, {} calories",
                submission.payload.activity,
                submission.payload.user_name,
                submission.derived.steps,
                submission.derived.calories
            );
            print_status(&app.screen());
        }

        Commands::Watch { user } => {
            if let Some(user) = user {
                app.select_user(&user).await;
                flush_notice(&mut app);
            }

            let mut ticker =
                tokio::time::interval(Duration::from_secs(config.client.poll_interval_secs));
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        app.refresh_leaderboard().await;
                        let screen = app.screen();
                        println!("--- {} ---", chrono::Local::now().format("%H:%M:%S"));
                        print_board(&screen);
                        flush_notice(&mut app);
                    }
                    _ = tokio::signal::ctrl_c() => {
                        tracing::info!("Stopping leaderboard watch");
                        break;
                    }
                }
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("stepboard={}", logging.level))
    });
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Print and clear the banner message, if any
fn flush_notice<E: ChallengeEndpoint>(app: &mut Controller<E>) {
    if let Some(message) = app.take_notice() {
        eprintln!("» {}", message);
    }
}

fn print_board(screen: &Screen) {
    match &screen.leaderboard {
        Podium::Empty => println!("{}", stepboard::render::EMPTY_BOARD),
        Podium::Rows(rows) => {
            for row in rows {
                let marker = if row.is_current { "*" } else { " " };
                println!(
                    "{}{}. {:<24} {:>14} {:>16}",
                    marker,
                    row.position,
                    row.user_name,
                    row.steps_text(),
                    row.calories_text()
                );
            }
        }
    }
    if let Some(rank) = &screen.rank_line {
        println!("{}", rank);
    }
}

fn print_status(screen: &Screen) {
    println!("Fecha: {}", screen.date);
    if let Some(greeting) = &screen.greeting {
        println!("{}", greeting);
    }
    println!("Pasos totales: {}", screen.total_steps);
    println!("Calorías totales: {}", screen.total_calories);
    println!("Estado: {}", screen.submit.label);
    if let Some(rank) = &screen.rank_line {
        println!("{}", rank);
    }
}
