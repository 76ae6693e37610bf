mod cli;
mod config;
mod console_format;
mod report;
mod snapshot;
mod types;
mod ui;

use config::{OutputTarget, RenderConfig};
use console_format::TableWriter;
use log::debug;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use types::ScanSnapshot;

fn main() {
    env_logger::init();

    // Parse CLI arguments
    let args = cli::CliArgs::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        ui::print_error(&e);
        std::process::exit(1);
    }

    let config = match config::build_render_config(&args) {
        Ok(config) => config,
        Err(e) => {
            ui::print_error(&format!("Configuration error: {}", e));
            std::process::exit(1);
        }
    };

    let loaded = if args.reads_stdin() {
        snapshot::read_snapshot(io::stdin().lock())
    } else {
        snapshot::load_snapshot(&args.input)
    };
    let scan = match loaded {
        Ok(scan) => scan,
        Err(e) => {
            ui::print_error(&e.to_string());
            std::process::exit(1);
        }
    };

    if let Err(e) = render_report(&scan, &config) {
        ui::print_error(&format!("Failed to write report: {}", e));
        std::process::exit(1);
    }

    if let OutputTarget::File(ref path) = config.output {
        ui::log_output_file(path);
    }

    if let Some(ref json_path) = args.json {
        match report::export_json_report(json_path, &scan, &config) {
            Ok(()) => ui::status(&format!("JSON summary written to {}", json_path.display())),
            Err(e) => {
                ui::print_error(&format!("Failed to export JSON: {}", e));
                std::process::exit(1);
            }
        }
    }
}

/// Open the configured sink and render the report into it
fn render_report(scan: &ScanSnapshot, config: &RenderConfig) -> io::Result<()> {
    let sink: Box<dyn Write> = match config.output {
        OutputTarget::Stdout => Box::new(io::stdout().lock()),
        OutputTarget::File(ref path) => {
            debug!("Writing report to {:?}", path);
            Box::new(BufWriter::new(File::create(path)?))
        }
    };

    let mut out = TableWriter::new(sink, config.use_colors);
    report::PrettyPrinter::new(config).action_print(&mut out, scan)?;
    out.into_inner().flush()
}
