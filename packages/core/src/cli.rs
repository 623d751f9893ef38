use clap::Parser;

/// Medical journal service CLI arguments
#[derive(Debug, Parser)]
#[command(
    name = "medical-journal",
    version,
    about = "Doctors, patients, admissions and journal access checks over HTTP"
)]
pub struct Cli {
    /// SQLite connection URL (overrides DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Address to listen on, e.g. 127.0.0.1:8080 (overrides BIND_ADDR)
    #[arg(long)]
    pub bind_addr: Option<String>,

    /// Skip inserting sample doctors, patients and admissions
    #[arg(long)]
    pub no_seed: bool,
}
