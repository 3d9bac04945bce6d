//! cubemaps.toml batch manifest
//!
//! ```toml
//! [defaults]
//! format = "half"
//! packed = true
//!
//! [[cubemap]]
//! input = "panoramas/sky.hdr"
//! output = "build/sky"
//!
//! [[cubemap]]
//! input = "panoramas/studio.png"
//! packed = false
//! ```

use anyhow::{Context, Result};
use cubemap_core::{ConvertOptions, MAX_CONCURRENCY, OutputFormat, Progress};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Batch manifest structure
#[derive(Debug, Deserialize)]
pub struct CubemapManifest {
    #[serde(default)]
    pub defaults: DefaultsSection,
    #[serde(default, rename = "cubemap")]
    pub cubemaps: Vec<CubemapEntry>,
}

/// Options applied to every entry unless overridden
#[derive(Debug, Default, Deserialize)]
pub struct DefaultsSection {
    /// unspecified, half, or single
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub raw: bool,
    #[serde(default)]
    pub packed: bool,
    /// Render workers per conversion (1-6).
    /// Default: 6
    #[serde(default)]
    pub threads: Option<usize>,
}

/// Single conversion entry
#[derive(Debug, Deserialize)]
pub struct CubemapEntry {
    /// Panorama path, relative to the manifest
    pub input: String,

    /// Output base, relative to the manifest.
    /// If not specified, the input path without its extension.
    #[serde(default)]
    pub output: Option<String>,

    #[serde(default)]
    pub format: Option<OutputFormat>,
    #[serde(default)]
    pub raw: Option<bool>,
    #[serde(default)]
    pub packed: Option<bool>,
    #[serde(default)]
    pub threads: Option<usize>,
}

impl CubemapEntry {
    /// Effective options after applying manifest defaults
    pub fn options(&self, defaults: &DefaultsSection) -> ConvertOptions {
        ConvertOptions {
            output_format: self.format.unwrap_or(defaults.format),
            raw_output: self.raw.unwrap_or(defaults.raw),
            packed: self.packed.unwrap_or(defaults.packed),
            threads: self
                .threads
                .or(defaults.threads)
                .unwrap_or(MAX_CONCURRENCY),
        }
    }

    pub fn input_path(&self, manifest_dir: &Path) -> PathBuf {
        manifest_dir.join(&self.input)
    }

    pub fn output_base(&self, manifest_dir: &Path) -> PathBuf {
        match &self.output {
            Some(output) => manifest_dir.join(output),
            None => self.input_path(manifest_dir).with_extension(""),
        }
    }
}

impl CubemapManifest {
    /// Load manifest from file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read manifest: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse manifest from string
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse cubemaps.toml")
    }

    /// Validate manifest fields
    pub fn validate(&self) -> Result<()> {
        if self.cubemaps.is_empty() {
            anyhow::bail!("No [[cubemap]] entries in cubemaps.toml");
        }

        if self.defaults.threads == Some(0) {
            anyhow::bail!("Invalid defaults.threads 0 in cubemaps.toml (must be 1-6)");
        }

        let mut outputs = std::collections::HashSet::new();
        for entry in &self.cubemaps {
            if entry.input.trim().is_empty() {
                anyhow::bail!("Cubemap entry with empty input path");
            }
            if entry.threads == Some(0) {
                anyhow::bail!("Invalid threads 0 for {} (must be 1-6)", entry.input);
            }
            let base = entry.output_base(Path::new(""));
            if !outputs.insert(base.clone()) {
                anyhow::bail!(
                    "Output {} is produced by more than one entry",
                    base.display()
                );
            }
        }

        Ok(())
    }
}

/// Convert every entry; relative paths resolve against `manifest_dir`.
///
/// Returns the number of files written.
pub fn build_all(
    manifest: &CubemapManifest,
    manifest_dir: &Path,
    progress: &dyn Progress,
) -> Result<usize> {
    manifest.validate()?;

    let mut written = 0;
    for entry in &manifest.cubemaps {
        let input = entry.input_path(manifest_dir);
        let output = entry.output_base(manifest_dir);
        tracing::info!("Converting {:?} -> {:?}", input, output);

        let files = crate::convert_file(&input, &output, &entry.options(&manifest.defaults), progress)
            .with_context(|| format!("Failed to convert {}", entry.input))?;
        written += files.len();
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_minimal() {
        let manifest = CubemapManifest::parse(
            r#"
[[cubemap]]
input = "sky.png"
"#,
        )
        .unwrap();

        assert_eq!(manifest.cubemaps.len(), 1);
        let options = manifest.cubemaps[0].options(&manifest.defaults);
        assert_eq!(options, ConvertOptions::default());
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn test_defaults_and_overrides() {
        let manifest = CubemapManifest::parse(
            r#"
[defaults]
format = "half"
packed = true
threads = 2

[[cubemap]]
input = "a.hdr"

[[cubemap]]
input = "b.hdr"
format = "single"
packed = false
raw = true
"#,
        )
        .unwrap();

        let a = manifest.cubemaps[0].options(&manifest.defaults);
        assert_eq!(a.output_format, OutputFormat::Half);
        assert!(a.packed);
        assert!(!a.raw_output);
        assert_eq!(a.threads, 2);

        let b = manifest.cubemaps[1].options(&manifest.defaults);
        assert_eq!(b.output_format, OutputFormat::Single);
        assert!(!b.packed);
        assert!(b.raw_output);
    }

    #[test]
    fn test_unknown_format_rejected_at_parse() {
        let result = CubemapManifest::parse(
            r#"
[[cubemap]]
input = "a.hdr"
format = "bc6h"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_output_base_defaults_to_input_stem() {
        let manifest = CubemapManifest::parse(
            r#"
[[cubemap]]
input = "panoramas/sky.png"

[[cubemap]]
input = "panoramas/studio.png"
output = "build/studio"
"#,
        )
        .unwrap();

        let dir = Path::new("/assets");
        assert_eq!(
            manifest.cubemaps[0].output_base(dir),
            PathBuf::from("/assets/panoramas/sky")
        );
        assert_eq!(
            manifest.cubemaps[1].output_base(dir),
            PathBuf::from("/assets/build/studio")
        );
    }

    #[test]
    fn test_empty_manifest_invalid() {
        let manifest = CubemapManifest::parse("").unwrap();
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn test_zero_threads_invalid() {
        let manifest = CubemapManifest::parse(
            r#"
[[cubemap]]
input = "a.png"
threads = 0
"#,
        )
        .unwrap();
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn test_duplicate_outputs_invalid() {
        let manifest = CubemapManifest::parse(
            r#"
[[cubemap]]
input = "a.png"
output = "out/sky"

[[cubemap]]
input = "b.png"
output = "out/sky"
"#,
        )
        .unwrap();
        assert!(manifest.validate().is_err());
    }
}
