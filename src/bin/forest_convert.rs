//! Convert a jforest XML ensemble into a breadth-first slot layout or C evaluators.
//!
//! ```text
//! forest-convert -input model.xml -mode tree    > model.trees
//! forest-convert -input model.xml -mode codegen > model.c
//! ```
//!
//! Output goes to stdout; logs go to stderr and are filtered with `RUST_LOG`.

use std::io::{self, BufWriter, Write};

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use forest_convert::cli::{CliOptions, USAGE};
use forest_convert::compat::Ensemble;
use forest_convert::convert_ensemble;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(opts) = CliOptions::parse(&args)? else {
        println!("{USAGE}");
        return Ok(());
    };

    let ensemble = Ensemble::from_file(&opts.input)
        .with_context(|| format!("failed to load ensemble {}", opts.input.display()))?;

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let summary = convert_ensemble(&ensemble, &opts.config, &mut out)?;
    out.flush()?;

    tracing::info!(
        trees = summary.trees,
        max_depth = summary.max_depth,
        slots = summary.slots,
        "conversion finished"
    );
    Ok(())
}
