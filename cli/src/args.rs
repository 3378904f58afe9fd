use clap::builder::{OsStringValueParser, TypedValueParser};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "tubegraph", version, about = "Convert a recommendation crawl to GEXF")]
pub struct Cli {
    /// JSON array of crawled videos, e.g. --filename=data/video-infos.json
    // Empty values parse; main treats them as absent.
    #[arg(long, value_name = "PATH", value_parser = OsStringValueParser::new().map(PathBuf::from))]
    pub filename: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equals_form() {
        let cli = Cli::try_parse_from(["tubegraph", "--filename=data/crawl.json"]).unwrap();
        assert_eq!(cli.filename, Some(PathBuf::from("data/crawl.json")));
    }

    #[test]
    fn test_space_form_with_spaces_in_path() {
        let cli =
            Cli::try_parse_from(["tubegraph", "--filename", "data/Bernie Sanders.json"]).unwrap();
        assert_eq!(cli.filename, Some(PathBuf::from("data/Bernie Sanders.json")));
    }

    #[test]
    fn test_flag_is_optional_at_parse_time() {
        let cli = Cli::try_parse_from(["tubegraph"]).unwrap();
        assert!(cli.filename.is_none());
    }

    #[test]
    fn test_empty_value_parses() {
        let cli = Cli::try_parse_from(["tubegraph", "--filename="]).unwrap();
        assert_eq!(cli.filename, Some(PathBuf::new()));
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["tubegraph", "--output=x.gexf"]).is_err());
    }
}
