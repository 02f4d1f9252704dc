use config::{Config, File, FileFormat};
use datemath_core::DEFAULT_START_TIME_LEAD_MINUTES;
use serde::{Deserialize, Serialize};
use tracing::Level;

fn default_start_time_lead_minutes() -> i64 {
    DEFAULT_START_TIME_LEAD_MINUTES
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct Settings {
    #[serde(skip_serializing, skip_deserializing)]
    pub(crate) file_name: String,

    #[serde(default = "default_start_time_lead_minutes")]
    pub start_time_lead_minutes: i64,

    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            file_name: String::new(),
            start_time_lead_minutes: default_start_time_lead_minutes(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Missing or unreadable files fall back to the defaults.
    pub fn new(file_name: &str) -> Self {
        let settings = Config::builder()
            .add_source(File::new(file_name, FileFormat::Toml).required(false))
            .build()
            .and_then(|c| c.try_deserialize::<Self>());

        match settings {
            Ok(s) => Self {
                file_name: file_name.to_string(),
                ..s
            },
            Err(e) => {
                eprintln!("Load config from {file_name} error: {e}");
                Self {
                    file_name: file_name.to_string(),
                    ..Settings::default()
                }
            }
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn log_level(&self) -> Level {
        self.log_level.parse::<Level>().unwrap_or(Level::INFO)
    }

    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let s = toml::to_string(self)?;

        std::fs::write(&self.file_name, s)?;

        Ok(())
    }
}
