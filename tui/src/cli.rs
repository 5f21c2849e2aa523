use std::path::PathBuf;

use clap::Parser;

use crate::config::ConfigOverrides;
use crate::style::Platform;

/// Target platform for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PlatformArg {
    Terminal,
    Web,
    Ios,
    Android,
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Terminal => Platform::Terminal,
            PlatformArg::Web => Platform::Web,
            PlatformArg::Ios => Platform::Ios,
            PlatformArg::Android => Platform::Android,
        }
    }
}

#[derive(Parser, Debug, Default)]
#[command(version, about = "Browse the listings served by the anuncios backend")]
pub struct Cli {
    /// Config file to read instead of ~/.anuncios/config.toml.
    #[arg(long = "config", short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Backend root, e.g. http://localhost:3000.
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Styling profile; controls mid-word wrapping in table cells.
    #[arg(long = "platform", value_enum)]
    pub platform: Option<PlatformArg>,

    /// Fetch once, print the rendered table to stdout and exit.
    #[arg(long = "dump", default_value_t = false)]
    pub dump: bool,

    /// With --dump, print the normalized records as JSON instead.
    #[arg(long = "json", default_value_t = false, requires = "dump")]
    pub json: bool,

    /// Column count for --dump output.
    #[arg(long = "width", value_name = "COLUMNS", default_value_t = 120)]
    pub width: u16,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_path: self.config.clone(),
            base_url: self.base_url.clone(),
            platform: self.platform.map(Platform::from),
        }
    }
}
