use std::sync::Arc;

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotsnap::{
    cli,
    config::{self, Config},
    error,
    management::SessionManager,
    spotify::gateway::ApiGateway,
};

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
    /// Authorize with the Spotify API
    Auth(AuthOptions),

    /// Run the snapshot scheduler, or a single task
    Run(RunOptions),

    /// List the configured snapshot tasks
    Tasks,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct AuthOptions {
    /// Skip the silent refresh and force the interactive flow
    #[clap(long)]
    pub force: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct RunOptions {
    /// Run a single task by name (or kind) immediately and exit
    #[clap(long)]
    pub task: Option<String>,
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
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout());
        }
        Command::Tasks => cli::list_tasks(),
        Command::Auth(opt) => {
            let config = Arc::new(Config::from_env());
            let sessions = Arc::new(SessionManager::new(config));
            cli::auth(sessions, opt.force).await;
        }
        Command::Run(opt) => {
            let config = Arc::new(Config::from_env());
            let sessions = Arc::new(SessionManager::new(Arc::clone(&config)));
            let gateway = Arc::new(ApiGateway::new(&config, sessions));
            cli::run(gateway, opt.task).await;
        }
    }
}
