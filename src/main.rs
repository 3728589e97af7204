use anyhow::Context;
use clap::Parser;
use obsidian_zola::{Config, Pipeline, SiteEnv, SiteVar, SortBy};
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    name = "obsidian-zola",
    version,
    author,
    about = "Convert an Obsidian vault export into Zola content",
    long_about = "Convert an Obsidian vault export into Zola content, in place.\n\n\
    Every note gets fresh frontmatter, site-absolute links, no %% comments %% \
    and KaTeX-friendly math. Every directory gets a regenerated _index.md, and \
    the site variables are substituted into config.toml.\n\n\
    USAGE EXAMPLES:\n  \
      # Convert ./content and ./config.toml\n  \
      obsidian-zola\n\n  \
      # Convert another site\n  \
      obsidian-zola --site-dir ./site\n\n  \
      # Pass site variables explicitly instead of through the environment\n  \
      obsidian-zola --site-url https://notes.example --site-title \"My Notes\""
)]
struct Cli {
    /// Zola site root
    #[arg(long, default_value = ".", value_name = "PATH")]
    site_dir: PathBuf,

    /// Content directory to convert [default: <SITE_DIR>/content]
    #[arg(long, value_name = "PATH")]
    content_dir: Option<PathBuf>,

    /// Config file receiving the site variables [default: <SITE_DIR>/config.toml]
    #[arg(long, value_name = "FILE")]
    config_file: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(flatten)]
    site: SiteArgs,
}

/// Site variables, each also read from the environment variable of the same name.
#[derive(clap::Args, Debug)]
#[command(next_help_heading = "Site variables")]
struct SiteArgs {
    /// Public base URL of the site
    #[arg(long, env = "SITE_URL")]
    site_url: Option<String>,

    /// Site title
    #[arg(long, env = "SITE_TITLE")]
    site_title: Option<String>,

    /// Time zone used by the theme
    #[arg(long, env = "TIMEZONE")]
    timezone: Option<String>,

    /// Repository backing the vault
    #[arg(long, env = "REPO_URL")]
    repo_url: Option<String>,

    /// Path of the landing page note
    #[arg(long, env = "LANDING_PAGE")]
    landing_page: Option<String>,

    /// Landing page heading
    #[arg(long, env = "LANDING_TITLE")]
    landing_title: Option<String>,

    /// Landing page description
    #[arg(long, env = "LANDING_DESCRIPTION")]
    landing_description: Option<String>,

    /// Landing page button text
    #[arg(long, env = "LANDING_BUTTON")]
    landing_button: Option<String>,

    /// Section sort order; "date" sorts by date, anything else by title
    #[arg(long, env = "SORT_BY")]
    sort_by: Option<String>,
}

impl From<SiteArgs> for SiteEnv {
    fn from(args: SiteArgs) -> Self {
        Self::new()
            .with(SiteVar::SiteUrl, args.site_url)
            .with(SiteVar::SiteTitle, args.site_title)
            .with(SiteVar::Timezone, args.timezone)
            .with(SiteVar::RepoUrl, args.repo_url)
            .with(SiteVar::LandingPage, args.landing_page)
            .with(SiteVar::LandingTitle, args.landing_title)
            .with(SiteVar::LandingDescription, args.landing_description)
            .with(SiteVar::LandingButton, args.landing_button)
            .sort_by(SortBy::from_flag(args.sort_by.as_deref()))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose)?;

    let mut builder = Config::builder()
        .site_dir(cli.site_dir)
        .site_env(cli.site.into());

    if let Some(content_dir) = cli.content_dir {
        builder = builder.content_dir(content_dir);
    }

    if let Some(config_file) = cli.config_file {
        builder = builder.config_file(config_file);
    }

    let config = builder.build().context("Failed to build configuration")?;

    let stats = Pipeline::new(config)
        .context("Failed to create pipeline")?
        .run()
        .context("Conversion failed")?;

    stats.print_summary();

    Ok(())
}

fn setup_tracing(verbosity: u8) -> anyhow::Result<()> {
    let filter = match verbosity {
        0 => EnvFilter::new("obsidian_zola=info"),
        1 => EnvFilter::new("obsidian_zola=debug"),
        _ => EnvFilter::new("obsidian_zola=trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}
