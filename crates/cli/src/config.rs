use kinemeter_core::SamplingConfig;
use std::path::Path;
use tracing::info;

pub fn run(init: bool, explicit: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let path = crate::config_path(explicit);

    if init {
        SamplingConfig::default().save(&path)?;
        info!("Wrote default config to {}", path.display());
        println!("Default configuration written to {}", path.display());
        return Ok(());
    }

    let config = crate::load_config(explicit)?;
    println!("Configuration file: {}", path.display());
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
