use clap::{Args, ValueEnum};
use once_cell::sync::{Lazy, OnceCell};
use std::path::PathBuf;

static INIT_SYNC: std::sync::Once = std::sync::Once::new();
static GLOBAL_OPTS: OnceCell<GlobalOpts> = OnceCell::new();
static DEFAULT_OPTS: Lazy<GlobalOpts> = Lazy::new(GlobalOpts::default);

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum OutputFormat {
    Pretty,
    Json,
    Yaml,
}

#[derive(Args, Debug)]
pub struct GlobalOpts {
    // write output to a file instead of stdout
    #[arg(short = 'o', long, value_name = "PATH", global = true)]
    pub output: Option<PathBuf>,

    // pretty | json | yaml
    #[arg(
        short = 'F',
        long,
        value_enum,
        default_value = "pretty",
        value_name = "FMT",
        global = true
    )]
    pub format: OutputFormat,

    /// Disable ANSI cell colors in pretty output
    #[arg(long, global = true)]
    pub plain: bool,

    #[arg(short = 't', long, help = "Number of threads (optional)", global = true)]
    pub threads: Option<usize>,

    // verbosity (-v, -vv, etc.)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl Default for GlobalOpts {
    fn default() -> Self {
        Self {
            output: None,
            format: OutputFormat::Pretty,
            plain: false,
            threads: None,
            verbose: 0,
        }
    }
}

/// Log filter for a `-v` count.
pub fn log_filter(level: u8) -> String {
    let level = match level {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    format!("attnviz={}", level)
}

// -v flags pick the default filter; an explicit RUST_LOG still wins
pub fn setup_logging(level: u8) {
    let env = env_logger::Env::default().default_filter_or(log_filter(level));
    let _ = env_logger::Builder::from_env(env).try_init();
}

pub fn setup_rayon(threads: Option<usize>) {
    INIT_SYNC.call_once(|| {
        let mut builder = rayon::ThreadPoolBuilder::new();
        if let Some(n) = threads {
            builder = builder.num_threads(n);
        }
        // the pool may already exist if something touched rayon first
        if let Err(e) = builder.build_global() {
            log::warn!("rayon global pool not rebuilt: {}", e);
        }
    });
}

pub fn init_globals(opts: GlobalOpts) -> anyhow::Result<()> {
    if GLOBAL_OPTS.set(opts).is_err() {
        anyhow::bail!("Global options already initialized");
    }

    let opts = get_globals();

    // logging
    setup_logging(opts.verbose);
    // threading
    setup_rayon(opts.threads);

    log::debug!("globals: {:?}", opts);
    Ok(())
}

/// Options stored by `init_globals`, or the defaults if nothing was stored
/// yet (library callers and tests).
pub fn get_globals() -> &'static GlobalOpts {
    GLOBAL_OPTS.get().unwrap_or(&*DEFAULT_OPTS)
}
