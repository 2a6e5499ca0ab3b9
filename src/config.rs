use crate::digest::DigestAlgorithm;
use crate::errors::Result;
use crate::scrambler::{ReplaceMode, Salt, ScramblerOptions};
use serde::Deserialize;
use std::env;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Directory name used under the user's config directory.
pub const CONFIG_DIR_NAME: &str = "idscramble";

/// Scrambling settings as they appear in a YAML file.
///
/// Every field is optional; missing fields fall back to the defaults. The
/// command line layers its own values on top with [`ScrambleConfig::merge`].
///
/// ```yaml
/// salt: "incident-4711"
/// digest: md5          # or sha256
/// replace_mode: span   # or global
/// ```
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ScrambleConfig {
    /// Fixed salt. When absent a random per-run salt is generated.
    #[serde(default)]
    pub salt: Option<String>,
    /// Digest algorithm name.
    #[serde(default)]
    pub digest: Option<String>,
    /// Replace mode name.
    #[serde(default)]
    pub replace_mode: Option<String>,
}

/// Where the salt of a run came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaltSource {
    /// Pinned by the user, so output is reproducible.
    Configured,
    /// Generated for this run only.
    Random,
}

/// Validated settings, ready to build a `Scrambler`.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub options: ScramblerOptions,
    pub salt_source: SaltSource,
}

impl ScrambleConfig {
    /// Returns a config where every value set in `overrides` wins over `self`.
    pub fn merge(self, overrides: ScrambleConfig) -> ScrambleConfig {
        ScrambleConfig {
            salt: overrides.salt.or(self.salt),
            digest: overrides.digest.or(self.digest),
            replace_mode: overrides.replace_mode.or(self.replace_mode),
        }
    }

    /// Validates every value and fills in defaults.
    ///
    /// This runs before any input is read, so a bad value stops the run
    /// before a single line is written.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let (salt, salt_source) = match &self.salt {
            Some(value) => (Salt::new(value.as_str())?, SaltSource::Configured),
            None => (Salt::random(), SaltSource::Random),
        };

        let algorithm = match &self.digest {
            Some(name) => name.parse::<DigestAlgorithm>()?,
            None => DigestAlgorithm::default(),
        };

        let mode = match &self.replace_mode {
            Some(name) => name.parse::<ReplaceMode>()?,
            None => ReplaceMode::default(),
        };

        Ok(ResolvedConfig {
            options: ScramblerOptions {
                salt,
                algorithm,
                mode,
            },
            salt_source,
        })
    }
}

/// A utility for locating and loading scrambling configuration files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Finds the configuration file by searching in a prioritized list of locations.
    ///
    /// The search order is:
    /// 1. The path as given (absolute, or relative to the current directory).
    /// 2. A path relative to the `working_dir`.
    /// 3. Inside the user's config directory, under `idscramble/`.
    /// 4. Next to the executable.
    pub fn find_config(config_path: &Path, working_dir: &Path) -> Result<PathBuf> {
        if config_path.exists() {
            return Ok(config_path.to_path_buf());
        }

        let mut candidates = vec![working_dir.join(config_path)];

        if let Some(config_dir) = dirs::config_dir() {
            candidates.push(config_dir.join(CONFIG_DIR_NAME).join(config_path));
        }

        if let Ok(exe_path) = env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                candidates.push(exe_dir.join(config_path));
            }
        }

        if let Some(found) = candidates.iter().find(|candidate| candidate.exists()) {
            return Ok(found.clone());
        }

        let mut tried_locations = vec![config_path.display().to_string()];
        tried_locations.extend(candidates.iter().map(|c| c.display().to_string()));

        Err(format!(
            "Config file '{}' not found. Searched in:\n  - {}",
            config_path.display(),
            tried_locations.join("\n  - ")
        )
        .into())
    }

    /// Loads a `ScrambleConfig` from a YAML file.
    pub fn load(path: &Path) -> Result<ScrambleConfig> {
        let file = File::open(path)?;
        Ok(serde_yaml::from_reader(file)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_yaml_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scramble.yaml");
        fs::write(&path, "salt: incident-4711\ndigest: sha256\nreplace_mode: global\n").unwrap();

        let config = ConfigLoader::load(&path).unwrap();
        assert_eq!(config.salt.as_deref(), Some("incident-4711"));

        let resolved = config.resolve().unwrap();
        assert_eq!(resolved.salt_source, SaltSource::Configured);
        assert_eq!(resolved.options.salt.as_str(), "incident-4711");
        assert_eq!(resolved.options.algorithm, DigestAlgorithm::Sha256);
        assert_eq!(resolved.options.mode, ReplaceMode::Global);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scramble.yaml");
        fs::write(&path, "sault: typo\n").unwrap();
        assert!(matches!(ConfigLoader::load(&path), Err(Error::Yaml(_))));
    }

    #[test]
    fn test_defaults_use_random_salt() {
        let resolved = ScrambleConfig::default().resolve().unwrap();
        assert_eq!(resolved.salt_source, SaltSource::Random);
        assert_eq!(resolved.options.algorithm, DigestAlgorithm::Md5);
        assert_eq!(resolved.options.mode, ReplaceMode::Span);
    }

    #[test]
    fn test_invalid_values_fail_resolution() {
        let empty_salt = ScrambleConfig {
            salt: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(empty_salt.resolve(), Err(Error::Config(_))));

        let bad_digest = ScrambleConfig {
            digest: Some("crc32".into()),
            ..Default::default()
        };
        assert!(matches!(bad_digest.resolve(), Err(Error::Config(_))));

        let bad_mode = ScrambleConfig {
            replace_mode: Some("sometimes".into()),
            ..Default::default()
        };
        assert!(matches!(bad_mode.resolve(), Err(Error::Config(_))));
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let file = ScrambleConfig {
            salt: Some("from-file".into()),
            digest: Some("sha256".into()),
            replace_mode: None,
        };
        let cli = ScrambleConfig {
            salt: Some("from-cli".into()),
            digest: None,
            replace_mode: Some("global".into()),
        };
        let merged = file.merge(cli);
        assert_eq!(merged.salt.as_deref(), Some("from-cli"));
        assert_eq!(merged.digest.as_deref(), Some("sha256"));
        assert_eq!(merged.replace_mode.as_deref(), Some("global"));
    }

    #[test]
    fn test_find_config_in_working_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("idscramble-test-config.yaml"), "salt: x\n").unwrap();

        let found =
            ConfigLoader::find_config(Path::new("idscramble-test-config.yaml"), dir.path()).unwrap();
        assert_eq!(found, dir.path().join("idscramble-test-config.yaml"));
    }

    #[test]
    fn test_find_config_reports_locations() {
        let dir = TempDir::new().unwrap();
        let err = ConfigLoader::find_config(Path::new("missing-idscramble.yaml"), dir.path())
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("missing-idscramble.yaml"));
        assert!(message.contains("Searched in"));
    }
}
