use clap::Parser;
use log::LevelFilter;
use miette::Result;
use mfgsim::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE to default behavior (terminate silently) so piping to
    // `head` or `grep -q` does not panic on a broken pipe.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;

    let level = match (global.quiet, global.verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Info,
        (false, _) => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Run(args) => mfgsim::cli::commands::run::run(args, &global),
        Commands::Inventory(args) => mfgsim::cli::commands::inventory::run(args, &global),
        Commands::Bom(args) => mfgsim::cli::commands::bom::run(args, &global),
        Commands::Template(args) => mfgsim::cli::commands::template::run(args),
        Commands::Completions(args) => mfgsim::cli::commands::completions::run(args),
    }
}
