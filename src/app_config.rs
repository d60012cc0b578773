use config::Config;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    core: Core,
    schools: Schools,
    proximity: Proximity,
    verifier: Verifier,
}

impl AppConfig {
    pub fn load() -> Self {
        Config::builder()
            .add_source(config::File::with_name("config").required(true))
            .add_source(config::File::with_name("config_local").required(false))
            .add_source(config::Environment::default())
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    pub fn core(&self) -> &Core {
        &self.core
    }

    pub fn schools(&self) -> &Schools {
        &self.schools
    }

    pub fn proximity(&self) -> &Proximity {
        &self.proximity
    }

    pub fn verifier(&self) -> &Verifier {
        &self.verifier
    }
}

#[derive(Debug, Deserialize)]
pub struct Core {
    store_buffer_size: usize,
}

impl Core {
    pub fn store_buffer_size(&self) -> usize {
        self.store_buffer_size
    }
}

#[derive(Debug, Deserialize)]
pub struct Schools {
    directory: String,
}

impl Schools {
    pub fn directory(&self) -> &str {
        &self.directory
    }
}

#[derive(Debug, Deserialize)]
pub struct Proximity {
    #[serde(default = "default_threshold_meters")]
    threshold_meters: f64,
}

impl Proximity {
    pub fn threshold_meters(&self) -> f64 {
        self.threshold_meters
    }
}

fn default_threshold_meters() -> f64 {
    crate::proximity::DEFAULT_THRESHOLD_METERS
}

/// Remote verification is opt-in: without a `remote_url` the proximity gate
/// runs in-process.
#[derive(Debug, Deserialize)]
pub struct Verifier {
    remote_url: Option<String>,
    #[serde(with = "humantime_serde")]
    request_timeout: Duration,
}

impl Verifier {
    pub fn remote_url(&self) -> Option<&str> {
        self.remote_url.as_deref()
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

#[cfg(test)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn new() -> Self {
        AppConfigBuilder {
            config: AppConfig {
                core: Core { store_buffer_size: 1 },
                schools: Schools {
                    directory: "schools".to_string(),
                },
                proximity: Proximity { threshold_meters: 100.0 },
                verifier: Verifier {
                    remote_url: None,
                    request_timeout: Duration::from_secs(5),
                },
            },
        }
    }

    pub fn threshold_meters(mut self, threshold_meters: f64) -> Self {
        self.config.proximity.threshold_meters = threshold_meters;
        self
    }

    pub fn remote_url(mut self, url: String) -> Self {
        self.config.verifier.remote_url = Some(url);
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}
