use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the sigtree binary.
#[derive(Parser, Debug)]
#[command(
    name = "sigtree",
    version,
    about = "Parse generic type descriptors and grade how they relate"
)]
pub struct CliArgs {
    /// Path to a hierarchy config file (defaults to the nearest sigtree.json).
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Parse a descriptor and print its canonical form.
    Parse {
        descriptor: String,

        /// Print the tree as JSON instead.
        #[arg(long)]
        json: bool,
    },

    /// Grade how LEFT relates to RIGHT (-1, 0, 1, 2 or 3).
    Compare {
        left: String,
        right: String,

        /// Fail unless the two descriptors are identical.
        #[arg(long)]
        strict: bool,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the first immediate parameter of DESCRIPTOR whose name matches PATTERN.
    Find { descriptor: String, pattern: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_compare_with_global_config() {
        let args = CliArgs::parse_from([
            "sigtree",
            "compare",
            "F<Object>",
            "F<Integer>",
            "--strict",
            "-c",
            "types.json",
        ]);
        assert_eq!(args.config, Some(PathBuf::from("types.json")));
        assert_eq!(
            args.command,
            Command::Compare {
                left: "F<Object>".to_string(),
                right: "F<Integer>".to_string(),
                strict: true,
                json: false,
            }
        );
    }

    #[test]
    fn parses_parse_subcommand() {
        let args = CliArgs::parse_from(["sigtree", "parse", "--json", "Map<K, V>"]);
        assert!(args.config.is_none());
        assert_eq!(
            args.command,
            Command::Parse {
                descriptor: "Map<K, V>".to_string(),
                json: true,
            }
        );
    }

    #[test]
    fn missing_subcommand_is_an_error() {
        assert!(CliArgs::try_parse_from(["sigtree"]).is_err());
    }
}
