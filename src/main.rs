use clap::Parser;
use tracing_subscriber::EnvFilter;

use securevault::cli::commands::add::AddArgs;
use securevault::cli::{commands, output, Cli, Commands, Context};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = Context::load(&cli).and_then(|ctx| run(&cli, &ctx));

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: &Cli, ctx: &Context) -> securevault::errors::Result<()> {
    match cli.command {
        Commands::Generate {
            length,
            no_uppercase,
            no_digits,
            no_symbols,
        } => commands::generate::execute(ctx, length, no_uppercase, no_digits, no_symbols),
        Commands::Memorable {
            words,
            ref separator,
        } => commands::memorable::execute(ctx, words, separator.as_deref()),
        Commands::Init => commands::init::execute(ctx),
        Commands::Add {
            ref name,
            ref username,
            ref url,
            ref notes,
            ref category,
            ref password,
            generate,
        } => commands::add::execute(
            ctx,
            &AddArgs {
                name,
                username,
                url,
                notes,
                category,
                password: password.as_deref(),
                generate,
            },
        ),
        Commands::List {
            ref category,
            show_passwords,
        } => commands::list::execute(ctx, category.as_deref(), show_passwords),
        Commands::Get { ref name, show } => commands::get::execute(ctx, name, show),
        Commands::Search {
            ref query,
            show_passwords,
        } => commands::search::execute(ctx, query, show_passwords),
        Commands::Completions { shell } => {
            commands::completions::execute(shell);
            Ok(())
        }
    }
}

/// Diagnostics go to stderr so they never mix with command output.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` turns on debug logs
/// for this crate and everything else stays at `warn`.
fn init_logging(verbose: bool) {
    let default = if verbose { "securevault=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
