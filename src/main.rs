use clap::{Parser, Subcommand};
use logiflow_landing::config::{self, SiteConfig};
use logiflow_landing::controller::Controller;
use logiflow_landing::form::SimulatedSubmission;
use logiflow_landing::server::{self, ServerState};
use logiflow_landing::{generate, output};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "logiflow-landing")]
#[command(about = "Landing page generator and static server for LogiFlow Pro")]
#[command(long_about = "\
Landing page generator and static server for LogiFlow Pro

The site directory holds optional configuration and content:

  site/
  ├── config.toml      # Server, site, timings, layout and colors (optional)
  ├── content.toml     # Page content; the built-in page is used when absent
  └── assets/          # Screenshots and images → copied to <output>/assets

Typical use:

  logiflow-landing --site site generate --output dist
  logiflow-landing --site site serve --root dist

Run 'logiflow-landing gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Site directory holding config.toml, content.toml and assets/
    #[arg(long, default_value = ".", global = true)]
    site: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve a directory over HTTP until interrupted
    Serve {
        /// Port to listen on (overrides [server] port)
        #[arg(long)]
        port: Option<u16>,
        /// Directory to serve (overrides [server] root)
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// Render the landing page and copy its assets
    Generate {
        /// Output directory
        #[arg(long, default_value = "dist")]
        output: PathBuf,
    },
    /// Render the page and mount the interaction controller against it
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { port, root } => {
            let site_config = load_site(&cli.site)?;
            let port = port.unwrap_or(site_config.server.port);
            let root = root.unwrap_or_else(|| cli.site.join(&site_config.server.root));
            let state = Arc::new(ServerState::new(
                root.clone(),
                site_config.server.default_document.clone(),
            ));

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()?;
            runtime.block_on(async {
                let listener = server::bind(&site_config.server.host, port).await?;
                let addr = listener.local_addr()?;
                output::print_server_banner(
                    &site_config.site.name,
                    &format!("http://{addr}"),
                    &site_config.site.app_url,
                    &root.display().to_string(),
                );
                server::serve(listener, state, server::shutdown_signal()).await?;
                Ok::<_, Box<dyn std::error::Error>>(())
            })?;
            output::print_shutdown();
        }
        Command::Generate { output: output_dir } => {
            let site_config = load_site(&cli.site)?;
            let page = generate::load_content(&cli.site, &site_config)?;
            let summary = generate::generate(&page, &site_config, &cli.site, &output_dir)?;
            output::print_generate_output(&page, &summary);
        }
        Command::Check => {
            let site_config = load_site(&cli.site)?;
            let page = generate::load_content(&cli.site, &site_config)?;
            let controller = Controller::mount(
                &generate::page_layout(&page),
                &site_config,
                Box::new(SimulatedSubmission::default()),
            )?;
            output::print_check_output(&controller);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load `config.toml` from the site directory and start logging.
fn load_site(site_dir: &Path) -> Result<SiteConfig, config::ConfigError> {
    let site_config = config::load_config(site_dir)?;
    init_tracing(&site_config.server.log_level);
    Ok(site_config)
}

/// `RUST_LOG` wins; otherwise the configured `[server] log_level`.
fn init_tracing(log_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();
}
