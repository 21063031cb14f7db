use anyhow::{Context, Result};
use dynrec::csv::{self, ReadOptions};
use itertools::Itertools;
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .context("usage: dynrec <delimited file>")?;
    let table = csv::read_path(&path, &ReadOptions::default())
        .with_context(|| format!("could not load {path}"))?;

    for record in &table {
        println!("{record}");
    }
    println!("fields: {}", table.schema().names().iter().join(", "));

    Ok(())
}
