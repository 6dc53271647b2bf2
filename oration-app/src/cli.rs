use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Collect annual-message speeches and draw word-budgeted samples from them.
#[derive(Debug, Parser)]
#[command(name = "oration", version)]
pub struct Cli {
    /// YAML config file; defaults to ./oration.yaml when present.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scrape the archive listing and every linked speech.
    Collect,
    /// Build sentence-bounded samples from the collected speeches.
    Sample(SampleArgs),
}

#[derive(Debug, Clone, Default, Args)]
pub struct SampleArgs {
    /// Word budget per excerpt; also names the output file.
    #[arg(long = "chunk_size")]
    pub chunk_size: Option<usize>,

    /// Leave records with an empty excerpt out of the output.
    #[arg(long = "skip_empty")]
    pub skip_empty: bool,
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
    fn parses_sample_flags_with_underscores() {
        let cli = Cli::try_parse_from(["oration", "sample", "--chunk_size", "50", "--skip_empty"])
            .unwrap();
        match cli.command {
            Command::Sample(args) => {
                assert_eq!(args.chunk_size, Some(50));
                assert!(args.skip_empty);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn config_flag_is_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["oration", "collect", "--config", "alt.yaml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("alt.yaml")));
        assert!(matches!(cli.command, Command::Collect));
    }

    #[test]
    fn sample_defaults_leave_settings_to_config() {
        let cli = Cli::try_parse_from(["oration", "sample"]).unwrap();
        let Command::Sample(args) = cli.command else {
            panic!("expected sample");
        };
        assert_eq!(args.chunk_size, None);
        assert!(!args.skip_empty);
    }

    #[test]
    fn rejects_non_numeric_chunk_size() {
        assert!(Cli::try_parse_from(["oration", "sample", "--chunk_size", "many"]).is_err());
    }
}
