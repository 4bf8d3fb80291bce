use log::error;
use pvgis_tmy::{run_normalize, PipelineConfig, TmyError};

fn main() -> Result<(), TmyError> {
    // RUST_LOG overrides the default level
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = PipelineConfig::default();
    match run_normalize(&config) {
        Ok(records) => {
            println!("Data for {} municipalities loaded.", records.len());
            Ok(())
        }
        Err(e) => {
            error!("Normalization of {} failed: {}", config.raw_table_path.display(), e);
            Err(e)
        }
    }
}
