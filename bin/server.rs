// Employee Desk - Web Server
// Form page + JSON API over one in-memory session store

use clap::Parser;
use employee_desk::logging::init_tracing;
use employee_desk::server::{run_server, ServerConfig};

#[derive(Parser, Debug)]
#[command(name = "employee-desk-server")]
#[command(about = "Web form for entering employee records", long_about = None)]
struct Cli {
    /// Enable verbose logging (or set EMPLOYEE_DESK_LOG)
    #[arg(long)]
    verbose: bool,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Disable permissive CORS
    #[arg(long)]
    strict_cors: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    tracing::info!("🌐 Employee Desk {} - Web Server", employee_desk::VERSION);

    let config = ServerConfig {
        host: cli.host,
        port: cli.port,
        cors_permissive: !cli.strict_cors,
    };

    run_server(config).await
}
