/*!
 * composer_spec CLI
 *
 * Prints the Composer completion tree as JSON, and answers generator
 * callbacks from the completion host.
 */

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use composer_spec::completions::Generator;
use composer_spec::config::SpecConfig;
use composer_spec::executor::SystemExecutor;
use composer_spec::generators::{FileManifestReader, GeneratorContext};
use composer_spec::loader::generate_spec;
use composer_spec::logging::{init_logging, LogFormat};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "composer_spec")]
#[command(about = "Composer completion spec generator", long_about = None)]
struct Cli {
    /// YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Project directory (defaults to the current directory)
    #[arg(short = 'd', long, global = true)]
    working_dir: Option<PathBuf>,

    /// More logging on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the completion tree
    Spec {
        /// Indent the JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Run a value generator for the word being completed
    Suggest {
        #[arg(value_enum)]
        generator: GeneratorArg,

        /// Current token (may be empty, may start with `-`)
        #[arg(default_value = "", allow_hyphen_values = true)]
        token: String,
    },

    /// Show version information
    Version,
}

#[derive(Clone, Copy, ValueEnum)]
enum GeneratorArg {
    PackageSearch,
    ManifestDependencies,
}

impl From<GeneratorArg> for Generator {
    fn from(arg: GeneratorArg) -> Self {
        match arg {
            GeneratorArg::PackageSearch => Generator::PackageSearch,
            GeneratorArg::ManifestDependencies => Generator::ManifestDependencies,
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet, cli.log_format);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref(), cli.working_dir)?;
    let executor = SystemExecutor::from_config(&config);

    match cli.command {
        Commands::Spec { pretty } => {
            let spec = generate_spec(&executor, &config).await;
            println!("{}", spec.to_json(pretty).context("Failed to serialize spec")?);
        }
        Commands::Suggest { generator, token } => {
            let manifest = FileManifestReader::from_config(&config);
            let ctx = GeneratorContext {
                executor: &executor,
                manifest: &manifest,
                config: &config,
            };
            let suggestions = Generator::from(generator).suggest(&token, &ctx).await;
            println!(
                "{}",
                serde_json::to_string(&suggestions).context("Failed to serialize suggestions")?
            );
        }
        Commands::Version => {
            println!("composer_spec v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}

fn load_config(path: Option<&std::path::Path>, working_dir: Option<PathBuf>) -> Result<SpecConfig> {
    let config = match path {
        Some(path) => SpecConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SpecConfig::default(),
    };
    let mut config = config.with_env_overrides()?;
    if working_dir.is_some() {
        config.working_dir = working_dir;
    }
    Ok(config)
}
