//! CLI runner - executes commands

use crate::cli::commands::{BuildArgs, Cli, Commands, OutputFormat};
use crate::config::{BuildOptions, Config};
use crate::decode::DecoderFormat;
use crate::error::{Error, Result, ResultExt};
use crate::registry::SharedRegistry;
use crate::render::{GoRenderer, JsonRenderer, Renderer};
use crate::schema::Node;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// One decoded input waiting to be built
#[derive(Debug)]
struct Job {
    path: PathBuf,
    options: BuildOptions,
    tree: Node,
}

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Generate {
                build,
                output,
                package,
            } => self.generate(build, output.as_deref(), package.as_deref()).await,
            Commands::Levels { build } => self.levels(build).await,
            Commands::ValidateConfig => self.validate_config(),
        }
    }

    /// Load the configuration file, or defaults when none is given
    fn load_config(&self) -> Result<Config> {
        match &self.cli.config {
            Some(path) => Config::from_file(path),
            None => Ok(Config::default()),
        }
    }

    /// Decode every input and build them into one registry
    pub async fn build_inputs(&self, args: &BuildArgs, config: &Config) -> Result<SharedRegistry> {
        let registry = SharedRegistry::new(config.new_registry());

        // Inputs are read and decoded concurrently
        let mut handles = Vec::with_capacity(args.inputs.len());
        for path in &args.inputs {
            let path = path.clone();
            let format = args
                .input_format
                .map_or_else(|| DecoderFormat::from_path(&path), DecoderFormat::from);
            let options = build_options(args, config, &path);
            handles.push(tokio::spawn(async move {
                let tree = decode_file(&path, format).await?;
                Ok::<_, Error>(Job {
                    path,
                    options,
                    tree,
                })
            }));
        }

        // Builds run in input order so the output is deterministic
        for handle in handles {
            let job = handle
                .await
                .map_err(|e| Error::Other(format!("Decode task failed: {e}")))??;
            let root = registry
                .build(&job.tree, &job.options)
                .await
                .with_context(|| format!("Failed to build {}", job.path.display()))?;
            info!(
                input = %job.path.display(),
                root = %root.name,
                fields = root.fields.len(),
                "Built input"
            );
        }

        Ok(registry)
    }

    /// Generate struct definitions
    async fn generate(
        &self,
        args: &BuildArgs,
        output: Option<&Path>,
        package: Option<&str>,
    ) -> Result<()> {
        let mut config = self.load_config()?;
        if let Some(package) = package {
            config.render.package = package.to_string();
            config.validate()?;
        }

        let registry = self.build_inputs(args, &config).await?;
        let renderer: Box<dyn Renderer> = match self.cli.format {
            OutputFormat::Go => Box::new(GoRenderer::new(config.render.package.clone())),
            OutputFormat::Json => Box::new(JsonRenderer),
        };
        let (rendered, count) = registry
            .read(|r| renderer.render(r).map(|text| (text, r.len())))
            .await?;

        match output {
            Some(path) => {
                tokio::fs::write(path, &rendered)
                    .await
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                info!(records = count, output = %path.display(), "Wrote records");
            }
            None => print!("{rendered}"),
        }

        Ok(())
    }

    /// Print the emission level of every record
    async fn levels(&self, args: &BuildArgs) -> Result<()> {
        let config = self.load_config()?;
        let registry = self.build_inputs(args, &config).await?;

        let rows = registry
            .read(|r| {
                r.iter()
                    .map(|record| record.map(|record| (record.level, record.name.clone())))
                    .collect::<Result<Vec<_>>>()
            })
            .await?;

        match self.cli.format {
            OutputFormat::Json => {
                let levels: Vec<_> = rows
                    .iter()
                    .map(|(level, name)| json!({"level": level, "name": name}))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&levels)?);
            }
            OutputFormat::Go => {
                for (level, name) in rows {
                    println!("{level}\t{name}");
                }
            }
        }

        Ok(())
    }

    /// Validate the configuration file
    fn validate_config(&self) -> Result<()> {
        let path = self
            .cli
            .config
            .as_ref()
            .ok_or_else(|| Error::config("Config file not specified (use -C flag)"))?;
        let config = Config::from_file(path)?;

        match self.cli.format {
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&json!({"valid": true, "config": config}))?
                );
            }
            OutputFormat::Go => {
                println!(
                    "Config '{}' is valid (root '{}', package '{}')",
                    path.display(),
                    config.build.root_name,
                    config.render.package
                );
            }
        }

        Ok(())
    }
}

/// Build options for one input
///
/// `--root-name` wins. With a single input the configured root name is used;
/// with several, each root is named after its file stem so the roots stay
/// apart.
fn build_options(args: &BuildArgs, config: &Config, path: &Path) -> BuildOptions {
    let mut options = config.build.clone();
    if args.unique {
        options.enforce_unique_name = true;
    }

    if let Some(root_name) = &args.root_name {
        options.root_name = root_name.clone();
    } else if args.inputs.len() > 1 {
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            options.root_name = stem.to_string();
        }
    }
    options
}

async fn decode_file(path: &Path, format: DecoderFormat) -> Result<Node> {
    let body = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    debug!(input = %path.display(), ?format, bytes = body.len(), "Decoding input");
    format
        .decoder()
        .decode(&body)
        .with_context(|| format!("Failed to decode {}", path.display()))
}
