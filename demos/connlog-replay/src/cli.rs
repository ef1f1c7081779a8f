use connlog::config::{Config, OutputConfig};
use std::path::{Path, PathBuf};

#[derive(clap::Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Args {
    /// Log format string (overrides the configuration file)
    #[clap(short, long, env = "CONNLOG_FORMAT")]
    pub format: Option<String>,

    /// JSON configuration file
    #[clap(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Pipe each record into this shell command instead of printing it
    #[clap(short = 'x', long, value_name = "COMMAND")]
    pub exec: Option<String>,

    /// Run the command as this user
    #[clap(short, long, requires = "exec")]
    pub user: Option<String>,

    /// Event trace to replay, one JSON event per line (default: stdin)
    #[clap(short, long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Print the available keywords and exit.
    #[clap(long)]
    pub list_keywords: bool,

    /// Enable verbose informational messages.
    #[clap(long)]
    pub verbose: bool,
}

impl Args {
    pub fn input(&self) -> Option<&Path> {
        self.input.as_deref()
    }

    /// The configuration file, if any, with command line options applied on top.
    pub fn config(&self) -> Result<Config, connlog::Error> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if let Some(format) = &self.format {
            config.format = format.clone();
        }
        if let Some(command) = &self.exec {
            config.output = OutputConfig::command(command.as_str(), self.user.clone());
        }
        Ok(config)
    }
}
