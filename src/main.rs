use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use photomosaic::api;
use photomosaic::assets::{AssetLoader, InitOutcome};
use photomosaic::models::{AppConfig, SwatchSpec};
use photomosaic::server;
use photomosaic::services::{HttpTileResolver, MosaicPipeline, SwatchCache, TileResolver};

#[derive(Parser)]
#[command(name = "photomosaic")]
#[command(about = "Photomosaic - turns an image into a grid of solid-color tiles")]
struct Cli {
    /// Config file (overrides CONFIG_FILE)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Print the color grid of an image, one row per line
    Grid {
        /// Source image (PNG, JPEG, GIF, BMP or WebP)
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        tile: TileArgs,
    },
    /// Render an image as a mosaic PNG
    Render {
        /// Source image (PNG, JPEG, GIF, BMP or WebP)
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file path
        #[arg(short, long)]
        output: PathBuf,

        /// Fetch tiles from this swatch server instead of rendering them locally
        #[arg(long)]
        resolver_url: Option<String>,

        #[command(flatten)]
        tile: TileArgs,
    },
    /// Write the embedded config.yaml for customization
    Init {
        /// Destination path
        #[arg(default_value = "config.yaml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long, short)]
        force: bool,
    },
}

/// Tile size overrides
#[derive(Args)]
struct TileArgs {
    /// Tile width in pixels (overrides config)
    #[arg(long)]
    tile_width: Option<u32>,

    /// Tile height in pixels (overrides config)
    #[arg(long)]
    tile_height: Option<u32>,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Photomosaic API",
        description = "Turns an image into a grid of solid-color tiles",
        version = "0.1.0",
        license(name = "MIT")
    ),
    paths(
        api::handle_color,
        api::handle_mosaic_grid,
        api::handle_mosaic_render,
    ),
    components(schemas(api::MosaicGridResponse)),
    tags(
        (name = "Tiles", description = "Solid-color tile swatches"),
        (name = "Mosaic", description = "Color grids and rendered mosaics")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let loader = match cli.config {
        Some(path) => AssetLoader::new(Some(path)),
        None => AssetLoader::from_env(),
    };

    match cli.command {
        Some(Commands::Serve) => run_server(&loader).await,
        Some(Commands::Grid { input, tile }) => run_grid_command(&loader, &input, tile).await,
        Some(Commands::Render {
            input,
            output,
            resolver_url,
            tile,
        }) => run_render_command(&loader, &input, &output, resolver_url, tile).await,
        Some(Commands::Init { path, force }) => run_init_command(&path, force),
        None => {
            run_status_command(&loader);
            Ok(())
        }
    }
}

/// Minimal logging for CLI
fn init_cli_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "photomosaic=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Load config, apply CLI tile overrides and validate
fn load_config(loader: &AssetLoader, tile: TileArgs) -> anyhow::Result<AppConfig> {
    let config =
        AppConfig::load_from_assets(loader).with_tile_size(tile.tile_width, tile.tile_height);
    config.validate()?;
    Ok(config)
}

/// Print the color grid of an image (no server needed)
async fn run_grid_command(loader: &AssetLoader, input: &Path, tile: TileArgs) -> anyhow::Result<()> {
    init_cli_tracing();

    let config = load_config(loader, tile)?;
    let resolver = server::build_resolver(&config, Arc::new(SwatchCache::new()))?;
    let pipeline = MosaicPipeline::new(&config, resolver)?;

    let bytes = std::fs::read(input)?;
    let grid = pipeline.grid(bytes).await?;

    for row in grid.rows() {
        let line: Vec<&str> = row.iter().map(|code| code.as_str()).collect();
        println!("{}", line.join(" "));
    }

    Ok(())
}

/// Render an image to a mosaic PNG file
async fn run_render_command(
    loader: &AssetLoader,
    input: &Path,
    output: &Path,
    resolver_url: Option<String>,
    tile: TileArgs,
) -> anyhow::Result<()> {
    init_cli_tracing();

    let config = load_config(loader, tile)?;
    let resolver: Arc<dyn TileResolver> = match resolver_url {
        Some(url) => Arc::new(HttpTileResolver::new(
            &url,
            SwatchSpec::for_tile(config.geometry()?),
            config.resolver.timeout(),
        )?),
        None => server::build_resolver(&config, Arc::new(SwatchCache::new()))?,
    };
    let pipeline = MosaicPipeline::new(&config, resolver)?;

    let bytes = std::fs::read(input)?;
    let result = pipeline.generate(bytes).await?;

    std::fs::write(output, &result.png)?;
    println!(
        "Rendered {} ({} bytes, {}x{} tiles, {} placeholders)",
        output.display(),
        result.png.len(),
        result.grid.column_count(),
        result.grid.row_count(),
        result.mosaic.placeholder_count()
    );

    Ok(())
}

/// Write the embedded config to disk
fn run_init_command(path: &Path, force: bool) -> anyhow::Result<()> {
    match AssetLoader::write_default_config(path, force)? {
        InitOutcome::Written => println!("  + {}", path.display()),
        InitOutcome::Skipped => println!(
            "  - {} exists (use --force to overwrite)",
            path.display()
        ),
    }
    Ok(())
}

/// Display status and configuration information
fn run_status_command(loader: &AssetLoader) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let bind_addr = std::env::var("BIND_ADDR").ok();

    // Header
    println!("Photomosaic v{VERSION}");
    println!("Turns an image into a grid of solid-color tiles\n");

    // Environment variables section
    println!("Environment Variables:");
    println!(
        "  BIND_ADDR   = {}",
        bind_addr.as_deref().unwrap_or("0.0.0.0:3000 (default)")
    );
    let config_source = match loader.config_file() {
        Some(path) if path.exists() => path.display().to_string(),
        Some(path) => format!("{} (not found, using embedded)", path.display()),
        None => "embedded".to_string(),
    };
    println!("  CONFIG_FILE = {config_source}");

    // Effective configuration section
    let config = AppConfig::load_from_assets(loader);
    println!("\nConfiguration:");
    println!("  Tile:        {}x{}", config.tile.width, config.tile.height);
    println!("  Sampling:    {:?}", config.sampling);
    println!("  Placeholder: {}", config.placeholder);
    println!(
        "  Resolver:    {}",
        config
            .resolver
            .base_url
            .as_deref()
            .unwrap_or("in-process swatches")
    );
    println!("  Max upload:  {} bytes", config.max_upload_bytes);
    if let Err(e) = config.validate() {
        println!("  ! {e}");
    }

    // Commands section
    println!("\nCommands:");
    println!("  photomosaic serve    Start the HTTP server");
    println!("  photomosaic grid     Print the color grid of an image");
    println!("  photomosaic render   Render an image as a mosaic PNG");
    println!("  photomosaic init     Write the default config.yaml");
    println!("\nRun 'photomosaic --help' for more details.");
}

/// Run the HTTP server
async fn run_server(loader: &AssetLoader) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "photomosaic=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

    tracing::info!(
        config = %loader
            .config_file()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "embedded".to_string()),
        "Config source"
    );

    // Create application state using shared server module
    let state = server::create_app_state(AppConfig::load_from_assets(loader))?;

    // Build router: start with shared API routes, add production-only routes
    let app = server::build_router(state)
        // OpenAPI documentation (production only)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "Photomosaic server listening");

    axum::serve(listener, app).await?;

    Ok(())
}
