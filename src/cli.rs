use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Args as ClapArgs, Parser, Subcommand};
use ethio_football::content::Resource;

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Whether logs should also go to stdout. `serve` is a long-running process
/// whose output is its log; other commands print data to stdout and keep logs
/// in the file unless debugging.
pub fn logs_to_stdout(args: &Args) -> bool {
    args.debug || matches!(args.command, Command::Serve { .. })
}

/// Ethiopian football content service
///
/// Serves the content JSON API in front of the hosted provider, and reads
/// validated collections back from it.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    /// Also write logs to stdout.
    #[arg(long = "debug", global = true, help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", global = true, help_heading = "Debug")]
    pub log_file: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the JSON API.
    Serve {
        /// Address to listen on, e.g. 0.0.0.0:8080. Overrides the config file.
        #[arg(long)]
        bind: Option<String>,
    },

    /// Fetch a collection from the content API, validate it and print it as JSON.
    List(ListArgs),

    /// Show or update the persisted configuration.
    Config(ConfigArgs),
}

#[derive(ClapArgs, Debug)]
pub struct ListArgs {
    /// Collection to list: leagues, matches, teams, players, top-scorers,
    /// seasons, users or authors.
    pub resource: Resource,

    /// Only records belonging to this league. Historical slugs such as
    /// `premier` or `league1` are resolved to their league.
    #[arg(long, short = 'l')]
    pub league: Option<String>,

    /// With `seasons`: only the current season.
    #[arg(long)]
    pub current: bool,

    /// Reject records with missing timestamps instead of defaulting them.
    #[arg(long)]
    pub strict: bool,
}

#[derive(ClapArgs, Debug)]
pub struct ConfigArgs {
    /// List current configuration settings
    #[arg(long = "list", short = 'l')]
    pub list: bool,

    /// Update the content API base URL.
    #[arg(long = "set-api-base-url", value_name = "URL")]
    pub api_base_url: Option<String>,

    /// Update the provider URL.
    #[arg(long = "set-provider-url", value_name = "URL")]
    pub provider_url: Option<String>,

    /// Update log file path in config. This sets a persistent custom log file location.
    #[arg(long = "set-log-file", value_name = "PATH")]
    pub log_file_path: Option<String>,

    /// Clear the custom log file path from config. This reverts to using the default log location.
    #[arg(long = "clear-log-file", conflicts_with = "log_file_path")]
    pub clear_log_file_path: bool,
}

impl ConfigArgs {
    pub fn has_updates(&self) -> bool {
        self.api_base_url.is_some()
            || self.provider_url.is_some()
            || self.log_file_path.is_some()
            || self.clear_log_file_path
    }
}
