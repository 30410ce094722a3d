use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use topalcli::{cli, config, error, types::TimeRange};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Authorize with Spotify API
    Auth,

    /// Show your top albums derived from your top tracks
    Albums(AlbumsOptions),

    /// Show your raw top tracks
    Tracks(TracksOptions),

    /// Show the cached user profile
    Whoami,

    /// Clear the stored session
    Logout,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AlbumsOptions {
    /// Time range of the underlying top tracks
    #[clap(long, value_enum, default_value = "medium_term")]
    pub time_range: TimeRange,

    /// Number of top tracks to fetch
    #[clap(long, default_value_t = 250)]
    pub tracks: usize,

    /// Release year to filter on, or "all" (defaults to the current year)
    #[clap(long)]
    pub year: Option<String>,

    /// Print a copyable plain-text list instead of a table
    #[clap(long)]
    pub share: bool,

    /// Explain how the ranking is computed
    #[clap(long)]
    pub methodology: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct TracksOptions {
    /// Time range of the top tracks
    #[clap(long, value_enum, default_value = "medium_term")]
    pub time_range: TimeRange,

    /// Number of top tracks to fetch
    #[clap(long, default_value_t = 50)]
    pub tracks: usize,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Auth => cli::auth().await,
        Command::Albums(opt) => {
            cli::albums(opt.time_range, opt.tracks, opt.year, opt.share, opt.methodology).await
        }
        Command::Tracks(opt) => cli::tracks(opt.time_range, opt.tracks).await,
        Command::Whoami => cli::whoami().await,
        Command::Logout => cli::logout().await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
