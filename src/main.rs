use clap::{Parser, Subcommand};
use shopwindow::config::{self, SiteConfig};
use shopwindow::detail::{DetailViewer, ViewerEvent};
use shopwindow::fetch::{self, HttpSource};
use shopwindow::generate::{self, TRIMMED_LOGO};
use shopwindow::imaging::{self, RustBackend};
use shopwindow::output;
use shopwindow::types::CatalogState;
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "shopwindow")]
#[command(about = "Product catalog page builder")]
#[command(long_about = "\
Product catalog page builder

Fetches a product list from a JSON API once and writes a static page with a
product table, an image carousel and a detail popup. The brand logo is
stripped of its black background and cropped for the page header.

Output structure:

  dist/
  ├── index.html      # Status line, table, carousel, popup
  └── logo.png        # Trimmed logo (original copied if trimming fails)

A failed fetch still produces a page, with placeholders instead of products.

Run 'shopwindow gen-config' to generate a documented shopwindow.toml.")]
#[command(version)]
struct Cli {
    /// Config file (missing file means stock defaults)
    #[arg(long, default_value = "shopwindow.toml", global = true)]
    config: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (fetched catalog)
    #[arg(long, default_value = ".shopwindow-temp", global = true)]
    temp_dir: PathBuf,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the catalog once and store it in the temp directory
    Fetch,
    /// Remove the black background from a logo and crop it
    TrimLogo {
        /// Logo image (defaults to logo.source from the config)
        source: Option<PathBuf>,
        /// Where to write the PNG (defaults to <output>/logo.png)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Write the page from the stored catalog
    Generate,
    /// Fetch and trim in parallel, then write the page
    Build,
    /// Print the detail view of one stored product
    Show {
        /// Product id
        id: u64,
    },
    /// Print a stock shopwindow.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let catalog_path = cli.temp_dir.join("catalog.json");

    match cli.command {
        Command::Fetch => {
            let config = config::load_config(&cli.config)?;
            let state = fetch_once(&config)?;
            generate::save_catalog(&state, &catalog_path)?;
            output::print_fetch_output(&state);
        }
        Command::TrimLogo { source, out } => {
            let config = config::load_config(&cli.config)?;
            let source = source
                .or(config.logo.source.clone())
                .ok_or("no logo given and logo.source is not set")?;
            let out = out.unwrap_or_else(|| cli.output.join(TRIMMED_LOGO));
            let outcome = imaging::trim_logo(
                &RustBackend::new(),
                &source,
                &out,
                &config.logo.trim_params(),
            );
            output::print_trim_output(&source, &out, &outcome);
        }
        Command::Generate => {
            let config = config::load_config(&cli.config)?;
            let state = generate::load_catalog(&catalog_path)?;
            let logo = prepare_logo(&config, &cli.output);
            let summary = generate::generate(&state, &config, logo.as_deref(), &cli.output)?;
            output::print_generate_output(&summary);
        }
        Command::Build => {
            let config = config::load_config(&cli.config)?;
            let source = HttpSource::new(&config.api.endpoint, config.api.timeout())?;

            println!("==> Fetching {} and trimming logo", config.api.endpoint);
            let (state, logo) = rayon::join(
                || fetch::fetch_catalog(&source),
                || prepare_logo(&config, &cli.output),
            );
            generate::save_catalog(&state, &catalog_path)?;
            output::print_fetch_output(&state);

            println!("==> Generating HTML → {}", cli.output.display());
            let summary = generate::generate(&state, &config, logo.as_deref(), &cli.output)?;
            output::print_generate_output(&summary);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Show { id } => {
            let state = generate::load_catalog(&catalog_path)?;
            let Some((index, _)) = state.find(id) else {
                return Err(format!("product {id} not in {}", catalog_path.display()).into());
            };
            let mut viewer = DetailViewer::new(output::TerminalSurface::default());
            viewer.handle(ViewerEvent::Activate(index), state.products());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Log to stderr; `RUST_LOG` overrides the `-v` level.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "shopwindow=debug"
    } else {
        "shopwindow=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn fetch_once(config: &SiteConfig) -> Result<CatalogState, Box<dyn std::error::Error>> {
    let source = HttpSource::new(&config.api.endpoint, config.api.timeout())?;
    Ok(fetch::fetch_catalog(&source))
}

/// Trim the configured logo, if any, and return the href for the page.
fn prepare_logo(config: &SiteConfig, output_dir: &Path) -> Option<String> {
    let source = config.logo.source.as_deref()?;
    let (outcome, href) = generate::prepare_logo(
        &RustBackend::new(),
        source,
        &config.logo.trim_params(),
        output_dir,
    );
    output::print_trim_output(source, &output_dir.join(TRIMMED_LOGO), &outcome);
    href
}
