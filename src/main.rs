use clap::Parser;
use miette::Result;
use redress::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Install miette's fancy error handler for readable diagnostics
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

    match cli.command {
        Commands::Init(args) => args.run(&cli.global),
        Commands::Submit(args) => args.run(&cli.global),
        Commands::Review(args) => args.run(&cli.global),
        Commands::Resolve(args) => args.run(&cli.global),
        Commands::Reject(args) => args.run(&cli.global),
        Commands::Show(args) => args.run(&cli.global),
        Commands::List(args) => args.run(&cli.global),
        Commands::Assign(args) => args.run(&cli.global),
        Commands::Comment(args) => args.run(&cli.global),
        Commands::Escalate(args) => args.run(&cli.global),
        Commands::User(cmd) => redress::cli::commands::user::run(cmd, &cli.global),
    }
}
