use crate::error::{CliError, CliResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "cribcrack.toml";

/// Struct representing all configurations in the config file.
#[derive(Deserialize, Serialize, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
}

/// Where the files for each case live. `{}` in a template is replaced by the case number.
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct InputConfig {
    pub directory: PathBuf,
    pub encrypted_template: String,
    pub crib_template: String,
}

#[derive(Deserialize, Serialize, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// Bytes of plaintext per printed line
    pub line_width: usize,
}

impl Config {
    /// Read the config file, writing out the defaults if there is none yet.
    pub fn get(config_path: impl AsRef<Path>) -> CliResult<Self> {
        let config_path = config_path.as_ref();

        if !config_path.exists() {
            let config = Config::default();
            if let Err(why) = config.save(config_path) {
                log::warn!(
                    "Could not write default config to {}: {why}",
                    config_path.display()
                );
            }
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(config_path).map_err(|source| CliError::ConfigRead {
                path: config_path.to_path_buf(),
                source,
            })?;

        Self::parse(&contents).map_err(|err| match err {
            CliError::ConfigParse { source, .. } => CliError::ConfigParse {
                path: config_path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Parse and validate config file contents.
    pub fn parse(contents: &str) -> CliResult<Self> {
        let config: Self = toml::from_str(contents).map_err(|source| CliError::ConfigParse {
            path: PathBuf::new(),
            source,
        })?;
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.output.line_width == 0 {
            return Err(CliError::ConfigInvalid(
                "output.line_width must be at least 1".to_string(),
            ));
        }

        for (name, template) in [
            ("input.encrypted_template", &self.input.encrypted_template),
            ("input.crib_template", &self.input.crib_template),
        ] {
            if !template.contains("{}") {
                return Err(CliError::ConfigInvalid(format!(
                    "{name} must contain {{}} for the case number"
                )));
            }
        }

        Ok(())
    }

    pub fn save(&self, config_path: impl AsRef<Path>) -> std::io::Result<()> {
        let contents = toml::to_string(&self).unwrap_or_default();
        std::fs::write(config_path, contents)
    }
}

impl InputConfig {
    pub fn encrypted_path(&self, case: u32) -> PathBuf {
        self.directory.join(expand(&self.encrypted_template, case))
    }

    pub fn crib_path(&self, case: u32) -> PathBuf {
        self.directory.join(expand(&self.crib_template, case))
    }
}

fn expand(template: &str, case: u32) -> String {
    template.replace("{}", &case.to_string())
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            encrypted_template: "Encriptado{}.txt".to_string(),
            crib_template: "pista{}.txt".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { line_width: 120 }
    }
}
