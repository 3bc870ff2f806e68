use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "caprouter",
    about = "Inspect provider modules and open services through the capability router"
)]
pub struct CliArgs {
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
    /// Print listings as JSON
    #[arg(long, global = true)]
    pub json: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List every service with its provider and load status
    Services,
    /// List providers with their install hints
    Providers,
    /// Show which provider owns a service, without loading it
    Resolve { service: String },
    /// Open a service and probe it
    Create {
        service: String,
        #[arg(long = "option", short = 'o', value_parser = parse_option)]
        options: Vec<(String, String)>,
        #[arg(long = "async")]
        use_async: bool,
    },
}

fn parse_option(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_create_options() {
        let args = CliArgs::parse_from([
            "caprouter", "create", "fs", "-o", "root=/tmp", "--option", "x=a=b",
        ]);
        let Command::Create {
            service,
            options,
            use_async,
        } = args.command
        else {
            panic!("expected create");
        };
        assert_eq!(service, "fs");
        assert!(!use_async);
        assert_eq!(
            options,
            vec![
                ("root".to_string(), "/tmp".to_string()),
                ("x".to_string(), "a=b".to_string())
            ]
        );
    }

    #[test]
    fn rejects_option_without_equals() {
        assert!(parse_option("root").is_err());
        assert!(parse_option("=value").is_err());
    }
}
