use crate::config::Config;
use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(
    name = "travelsrv",
    about = "HTTP server that serves travel destinations and points of interest",
    version,
    author
)]
pub struct Args {
    /// Overrides SERVER_PORT
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Prefetch the popular destination queries before serving
    #[arg(long)]
    pub warm_cache: bool,

    /// Keep preferences in memory instead of the data directory
    #[arg(long)]
    pub in_memory_preferences: bool,
}

impl Args {
    pub fn apply(&self, config: &mut Config) {
        if let Some(port) = self.port {
            config.server_port = port;
        }
    }

    pub fn should_warm_cache(&self) -> bool {
        self.warm_cache
    }

    pub fn should_persist_preferences(&self) -> bool {
        !self.in_memory_preferences
    }
}
