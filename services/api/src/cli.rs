use crate::demo::{print_categories, run_demo, DemoArgs};
use crate::server;
use aid_intake::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Assistance Intake",
    about = "Serve and demonstrate the social-assistance request wizard",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the assistance categories with their caps and default urgency
    Categories,
    /// Walk a request through every wizard step and submit it in-process
    Demo(DemoArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Categories => {
            print_categories();
            Ok(())
        }
        Command::Demo(args) => run_demo(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::try_parse_from(["aid-intake-api"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_demo_arguments() {
        let cli = Cli::try_parse_from([
            "aid-intake-api",
            "demo",
            "--category",
            "medical_assistance",
            "--amount",
            "1200",
            "--attach",
            "a.pdf",
            "--attach",
            "b.png",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Demo(args)) => {
                assert_eq!(args.category.as_deref(), Some("medical_assistance"));
                assert_eq!(args.amount, 1200);
                assert_eq!(args.attach.len(), 2);
            }
            other => panic!("expected demo command, got {other:?}"),
        }
    }
}
