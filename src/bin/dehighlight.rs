use dehighlight::config::load_config;
use dehighlight::diagnostics::{DehighlightReport, DirectorySink, ImageStatus};
use dehighlight::image::io::{load_raster, save_raster, write_json_file};
use dehighlight::Dehighlighter;
use std::env;
use std::path::Path;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config_path = Path::new(&config_path);
    let base = config_path.parent().unwrap_or_else(|| Path::new(""));
    let config = load_config(config_path)?.rebase(base);

    let captures = config
        .inputs
        .iter()
        .map(|path| load_raster(path))
        .collect::<Result<Vec<_>, _>>()?;

    let sink = config
        .output
        .debug_dir
        .as_ref()
        .map(DirectorySink::new)
        .transpose()?;
    let mut dehighlighter = Dehighlighter::new(config.params.clone());
    if let Some(sink) = &sink {
        dehighlighter = dehighlighter.with_sink(sink);
    }
    let report = dehighlighter.run(&captures).map_err(|e| e.to_string())?;

    save_raster(&report.output, &config.output.image)?;
    print_summary(&report);
    println!("Result written to {}", config.output.image.display());

    if let Some(path) = &config.output.report_json {
        write_json_file(path, &report)?;
        println!("JSON report written to {}", path.display());
    }
    if let Some(sink) = &sink {
        println!("Debug rasters written to {}", sink.dir().display());
    }
    Ok(())
}

fn print_summary(report: &DehighlightReport) {
    println!(
        "Merged {} of {} captures into {}x{} ({:.1} ms)",
        report.merged_indices().len(),
        report.images.len(),
        report.width,
        report.height,
        report.timings.total_ms
    );
    for outcome in &report.images {
        match &outcome.status {
            ImageStatus::Rectified {
                corners,
                width,
                height,
                ..
            } => {
                let pts: Vec<String> = corners
                    .corners()
                    .iter()
                    .map(|p| format!("({:.1}, {:.1})", p.x, p.y))
                    .collect();
                println!(
                    "  #{}: {}x{} at {}",
                    outcome.index,
                    width,
                    height,
                    pts.join(" ")
                );
            }
            ImageStatus::Rejected { reason } => {
                println!("  #{}: skipped, {reason}", outcome.index);
            }
        }
    }
}

fn usage() -> String {
    "Usage: dehighlight <config.json>".to_string()
}
