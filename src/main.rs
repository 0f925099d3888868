use clap::Parser;
use clap::builder::NonEmptyStringValueParser;
use gallery_manifest::config::{self, DEFAULT_CONFIG_FILE, ManifestConfig};
use gallery_manifest::url::{UrlSource, VersionTemplate};
use gallery_manifest::{generate, manifest, output};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "gallery-manifest")]
#[command(about = "Generate the image/category constants module for the avatar gallery")]
#[command(long_about = "\
Generate the image/category constants module for the avatar gallery

Walks the image directory, builds the sorted list of image URLs and the set
of category tags, and writes them as an ES module:

  src/img/                          src/js/constants.js
  ├── animals/                      export const constants = {
  │   ├── fox-1.png        ──▶          srcImages: [\"<base>animals/fox-1.png\", ...],
  │   └── fox-2.png                     options: [\"fox\"]
  └── ...                           }

The base URL comes from the subcommand:
  static              url.base from the config file (the default when no
                      subcommand is given)
  url <BASE_URL>      the argument, verbatim
  version <VERSION>   url.template with {version}, and {ref} = tags|heads

Run 'gallery-manifest gen-config' to print a documented manifest.toml.")]
#[command(version)]
struct Cli {
    /// Config file (stock defaults are used when it does not exist)
    #[arg(long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Image directory, overrides `images_dir`
    #[arg(long, global = true)]
    images_dir: Option<PathBuf>,

    /// Generated module path, overrides `output.path`
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Generate using the configured static base URL
    Static,
    /// Generate using BASE_URL verbatim as the prefix
    Url {
        /// Prefix prepended to every image path (should end with '/')
        base_url: String,
    },
    /// Generate using a base URL derived from VERSION
    Version {
        /// Release tag (v1.2.3 → refs/tags) or branch (main → refs/heads)
        #[arg(value_parser = NonEmptyStringValueParser::new())]
        version: String,
    },
    /// Scan and print the manifest without writing anything (URLs use url.base)
    Check,
    /// Print a stock manifest.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    // Usage errors exit with 1, not clap's default 2.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let Cli {
        config: config_path,
        images_dir,
        output: output_path,
        command,
    } = cli;
    let load = || -> Result<ManifestConfig, config::ConfigError> {
        let mut config = config::load_config(&config_path)?;
        apply_overrides(&mut config, images_dir.clone(), output_path.clone());
        Ok(config)
    };

    match command.unwrap_or(Command::Static) {
        Command::Static => {
            let config = load()?;
            let source = UrlSource::Static(config.url.base.clone());
            run_generate(&config, source)?;
        }
        Command::Url { base_url } => {
            let config = load()?;
            run_generate(&config, UrlSource::Verbatim(base_url))?;
        }
        Command::Version { version } => {
            let config = load()?;
            let source = UrlSource::Version {
                template: VersionTemplate::new(config.url.template.clone()),
                version,
            };
            run_generate(&config, source)?;
        }
        Command::Check => {
            let config = load()?;
            let manifest =
                manifest::assemble(&config, &UrlSource::Static(config.url.base.clone()))?;
            output::print_warnings(&manifest.warnings);
            output::print_check_output(&manifest, &config.images_dir);
        }
        Command::GenConfig => print!("{}", config::stock_config_toml()),
    }

    Ok(())
}

fn run_generate(
    config: &ManifestConfig,
    source: UrlSource,
) -> Result<(), Box<dyn std::error::Error>> {
    let generated = generate::generate(config, &source)?;
    output::print_warnings(&generated.manifest.warnings);
    output::print_generate_output(&generated);
    Ok(())
}

/// CLI flags win over the config file.
fn apply_overrides(
    config: &mut ManifestConfig,
    images_dir: Option<PathBuf>,
    output: Option<PathBuf>,
) {
    if let Some(dir) = images_dir {
        config.images_dir = dir;
    }
    if let Some(path) = output {
        config.output.path = path;
    }
}
