mod ui;

use anyhow::Result;
use clap::Parser;
use employee_desk::logging::init_tracing_if_requested;
use employee_desk::{RecordStore, EXPORT_FILE_NAME};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "employee-desk")]
#[command(about = "Terminal form for entering employee records", long_about = None)]
struct Cli {
    /// Verbose logging (only active when EMPLOYEE_DESK_LOG is set)
    #[arg(long)]
    verbose: bool,

    /// Where Ctrl-S writes the CSV export
    #[arg(long, default_value = EXPORT_FILE_NAME)]
    export_path: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing_if_requested(cli.verbose);

    println!("🖥️  Loading Employee Management System...\n");

    let mut app = ui::App::new(RecordStore::new(), cli.export_path);
    ui::run_ui(&mut app)?;

    println!("\n✅ UI closed ({} record(s) in session, not saved)", app.store.len());

    Ok(())
}
