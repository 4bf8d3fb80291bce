use log::error;
use pvgis_tmy::{run_download, PipelineConfig, RecordOutcome, TmyError};

fn main() -> Result<(), TmyError> {
    // RUST_LOG overrides the default level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = PipelineConfig::default();
    let report = match run_download(&config) {
        Ok(report) => report,
        Err(e) => {
            error!("Download into {} aborted: {}", config.tmy_dir.display(), e);
            return Err(e);
        }
    };

    println!(
        "{} TMY files written, {} already present, {} failed.",
        report.written(),
        report.skipped(),
        report.failed()
    );
    if let Some(reason) = &report.manifest_error {
        println!("Manifest incomplete: {}", reason);
    }
    for record in report.records.iter() {
        if let RecordOutcome::Failed { reason, .. } = &record.outcome {
            println!("  {} ({}): {}", record.code, record.file_name, reason);
        }
    }
    Ok(())
}
