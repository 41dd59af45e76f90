use clap::{Parser, Subcommand, ValueEnum};
use site_adapters::config::{self, ThemeResolver};
use site_adapters::links::{self, WcmMode};
use site_adapters::node::{ContentNode, ContentTree};
use site_adapters::output::{self, ContentSummary};
use site_adapters::rewrite::UrlRewriter;
use site_adapters::stylesheet::{self, RequestPath};
use site_adapters::{models, theme};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "site-adapters")]
#[command(about = "Link rewriting, component models and theme stylesheets for site content")]
#[command(long_about = "\
Link rewriting, component models and theme stylesheets for site content

Inputs:

  adapters.toml                    # Rewrite rules (optional)
  content.json                     # JSON export of the content tree
  conf/
  ├── theme.toml                   # Site-wide theme overrides
  └── site/
      └── en/
          └── theme.toml           # Overrides for /content/site/en and below

Rewrite resolution (first rule wins):
  edit / preview mode   → path unchanged
  skip prefix matches   → path unchanged
  first mapping in file order whose internal prefix matches
                        → external prefix + remainder

Run 'site-adapters gen-config' for a documented adapters.toml, or
'site-adapters gen-config --theme' for every theme key and its default.")]
#[command(version)]
struct Cli {
    /// Adapter configuration file
    #[arg(long, default_value = "adapters.toml", global = true)]
    config: PathBuf,

    /// JSON export of the content tree
    #[arg(long, default_value = "content.json", global = true)]
    content: PathBuf,

    /// Root of the per-site theme configuration tree
    #[arg(long, global = true)]
    conf: Option<PathBuf>,

    /// Log activity at info level (overrides RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Edit,
    Preview,
    Disabled,
}

impl From<ModeArg> for WcmMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Edit => WcmMode::Edit,
            ModeArg::Preview => WcmMode::Preview,
            ModeArg::Disabled => WcmMode::Disabled,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Show the public form of a repository link
    Rewrite {
        /// Repository path, e.g. /content/dam/site/logo.svg
        path: String,
        /// Authoring mode of the simulated request
        #[arg(long, value_enum, default_value = "disabled")]
        mode: ModeArg,
        /// Property name the link is stored under
        #[arg(long, default_value = "link")]
        property: String,
    },
    /// Serve the theme stylesheet for a request path
    ThemeCss {
        /// e.g. /content/site/en.theme-variables.css
        request_path: String,
        /// Resource type of the requested page
        #[arg(long, default_value = "adobexp/components/global/pages/page/v1/page")]
        resource_type: String,
    },
    /// Print the component model of a content node
    Model {
        /// Absolute path of the component node
        resource_path: String,
    },
    /// Validate configuration and content without rendering
    Check,
    /// Print a stock adapters.toml with all options documented
    GenConfig {
        /// Print a stock theme.toml instead
        #[arg(long)]
        theme: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Rewrite {
            ref path,
            mode,
            ref property,
        } => {
            let app = config::load_config(&cli.config)?;
            let rewriter = UrlRewriter::activate(&app.url_rewriter);
            let pages = load_content_if_present(&cli.content)?.unwrap_or_default();
            let mode = WcmMode::from(mode);
            let transformed = links::transform_property(
                property,
                Some(&serde_json::Value::String(path.clone())),
                mode,
                &rewriter,
                &pages,
            );
            let resolved = transformed
                .value
                .as_ref()
                .and_then(|v| v.as_str())
                .unwrap_or_default();
            output::print_rewrite_output(&rewriter.rules(), path, mode, resolved);
        }
        Command::ThemeCss {
            ref request_path,
            ref resource_type,
        } => {
            let app = config::load_config(&cli.config)?;
            let resolver = ThemeResolver::new(conf_root(&cli, &app));
            let request = RequestPath::parse(request_path);
            let response = stylesheet::serve(stylesheet::METHOD, &request, resource_type, &resolver)
                .ok_or_else(|| format!("{request_path} is not a theme stylesheet request for {resource_type}"))?;
            output::print_css_response(&response);
        }
        Command::Model { ref resource_path } => {
            let tree = ContentTree::load(&cli.content)?;
            let node = tree.require(resource_path)?;
            let model = models::adapt(&node).ok_or_else(|| {
                format!(
                    "{resource_path} has no component model (resource type: {})",
                    node.resource_type().as_deref().unwrap_or("none")
                )
            })?;
            output::print_model_output(resource_path, &model)?;
        }
        Command::Check => {
            let app = config::load_config(&cli.config)?;
            let rewriter = UrlRewriter::activate(&app.url_rewriter);
            let resolver = ThemeResolver::new(conf_root(&cli, &app));
            resolver.validate("/")?;

            let tree = load_content_if_present(&cli.content)?;
            let components = tree
                .as_ref()
                .map(|t| models::adapt_all(&t.root()))
                .unwrap_or_default();
            let summary = tree.as_ref().map(|t| ContentSummary {
                path: &cli.content,
                node_count: t.node_count(),
                components: &components,
            });
            output::print_check_output(
                &cli.config,
                cli.config.exists(),
                &rewriter.rules(),
                summary.as_ref(),
            );
            println!("==> Configuration is valid");
        }
        Command::GenConfig { theme: theme_file } => {
            if theme_file {
                print!("{}", theme::stock_theme_toml());
            } else {
                print!("{}", config::stock_config_toml());
            }
        }
    }

    Ok(())
}

/// `--conf` wins over `conf_root` from the config file.
fn conf_root(cli: &Cli, app: &config::AppConfig) -> PathBuf {
    cli.conf
        .clone()
        .unwrap_or_else(|| PathBuf::from(&app.conf_root))
}

fn load_content_if_present(path: &Path) -> Result<Option<ContentTree>, Box<dyn std::error::Error>> {
    if path.exists() {
        Ok(Some(ContentTree::load(path)?))
    } else {
        tracing::info!(path = %path.display(), "no content export, page lookups disabled");
        Ok(None)
    }
}
