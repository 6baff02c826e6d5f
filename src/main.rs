use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cfg = ft_mixer::config::Config::parse();
    ft_mixer::app::run(cfg)
}
