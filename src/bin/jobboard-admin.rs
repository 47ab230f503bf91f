use clap::{Parser, Subcommand};
use jobboard_backend::{
    config::{get_config, init_config},
    database::pool::connect,
    services::stats_service::StatsService,
};

#[derive(Parser, Debug)]
#[command(
    name = "jobboard-admin",
    about = "Inspect the job board database from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print how many companies, vacancies, students, resumes and applications exist
    CountObjects,
    /// Print the total number of applications and a count per status
    ApplicationStats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    init_config()?;
    let pool = connect(&get_config().database_url, 2).await?;
    let stats = StatsService::new(pool);

    match cli.command {
        Command::CountObjects => {
            let counts = stats.count_objects().await?;
            println!("Companies: {}", counts.companies);
            println!("Vacancies: {}", counts.vacancies);
            println!("Students: {}", counts.students);
            println!("Resumes: {}", counts.resumes);
            println!("Applications: {}", counts.applications);
            println!("Total objects: {}", counts.total());
        }
        Command::ApplicationStats => {
            let report = stats.application_stats().await?;
            println!("Total applications: {}", report.total);
            for (status, count) in &report.by_status {
                println!("{}: {}", status, count);
            }
        }
    }

    Ok(())
}
