use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use seahorse::cli;
use seahorse::domain::Action;
use seahorse::infrastructure::config::{ConfigStore, DEFAULT_CONFIG_FILE};
use seahorse::infrastructure::tracing::{TracingOutput, init_tracing};

#[derive(Parser)]
#[command(name = "seahorse")]
#[command(about = "Manage docker-compose containers from the browser")]
#[command(version)]
struct Cli {
    /// Path to the config file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct ActionArgs {
    /// Container name
    name: String,

    /// Server URL [default: http://localhost:<port from config>]
    #[arg(long)]
    url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web server (the default when no command is given)
    Serve,

    /// Render compose templates into the configured output directory
    ///
    /// Templates use Tera syntax and read their values from `values.toml`
    /// in the templates root. Trees written for `values.yml` need that file
    /// converted to TOML; `{{ .Values.key }}` references keep working since
    /// the `.Values.` prefix is dropped before rendering.
    Render {
        /// Directory containing template files
        #[arg(short, long, conflicts_with = "file", required_unless_present = "file")]
        dir: Option<PathBuf>,

        /// Single template file to process
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// List containers known to a running server
    List {
        /// Server URL [default: http://localhost:<port from config>]
        #[arg(long)]
        url: Option<String>,
    },

    /// Start a container
    Start(ActionArgs),

    /// Stop a container
    Stop(ActionArgs),

    /// Stop a container, then start it again
    Restart(ActionArgs),

    /// Re-render and re-apply a container's compose template
    Update(ActionArgs),

    /// Render and bring up a container's compose template
    Install(ActionArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let output = match cli.log_file {
        Some(path) => TracingOutput::File(path),
        None => TracingOutput::Stderr,
    };
    init_tracing(cli.verbose, output)?;

    let settings = ConfigStore::new(cli.config).load_or_default();

    let (action, args) = match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => return cli::serve::execute(settings),
        Commands::Render { dir, file } => return cli::render::execute(dir, file, &settings),
        Commands::List { url } => return cli::list::execute(url, &settings),
        Commands::Completions { shell } => {
            cli::completions::execute::<Cli>(shell);
            return Ok(());
        }
        Commands::Start(args) => (Action::Start, args),
        Commands::Stop(args) => (Action::Stop, args),
        Commands::Restart(args) => (Action::Restart, args),
        Commands::Update(args) => (Action::Update, args),
        Commands::Install(args) => (Action::Install, args),
    };

    cli::action::execute(action, args.name, args.url, &settings)
}
