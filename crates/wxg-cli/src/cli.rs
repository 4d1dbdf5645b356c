//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;
use wxg_codegen::ConvertOptions;

/// Convert a wxGlade `.wxg` document into Go source for wxGo.
#[derive(Debug, Parser)]
#[command(name = "wxg-to-go", version, about)]
pub struct Cli {
    /// wxGlade document to convert.
    #[arg(long = "in", value_name = "FILE")]
    pub input: PathBuf,

    /// Go file to write.
    #[arg(long = "out", value_name = "FILE", required_unless_present = "dump_units")]
    pub output: Option<PathBuf>,

    /// Replace the output file if it already exists.
    #[arg(short, long)]
    pub force: bool,

    /// Package clause of the generated file.
    #[arg(long, value_name = "NAME", default_value = "main")]
    pub package_name: String,

    /// Import path of the wxGo `wx` package.
    #[arg(long, value_name = "PATH", default_value = wxg_codegen::emit::WXGO_IMPORT)]
    pub wx_import: String,

    /// Print the resolved windows as JSON instead of writing Go.
    #[arg(long)]
    pub dump_units: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            package_name: self.package_name.clone(),
            wx_import: self.wx_import.clone(),
            ..ConvertOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let cli = Cli::try_parse_from(["wxg-to-go", "--in", "a.wxg", "--out", "a.go"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("a.wxg"));
        assert_eq!(cli.output, Some(PathBuf::from("a.go")));
        assert!(!cli.force);
        assert_eq!(cli.verbose, 0);

        let options = cli.convert_options();
        assert_eq!(options.package_name, "main");
        assert_eq!(options.wx_import, "github.com/dontpanic92/wxGo/wx");
    }

    #[test]
    fn test_parse_all_flags() {
        let cli = Cli::try_parse_from([
            "wxg-to-go",
            "--in",
            "a.wxg",
            "--out",
            "ui.go",
            "-f",
            "--package-name",
            "ui",
            "--wx-import",
            "example.com/wx",
            "-vv",
        ])
        .unwrap();
        assert!(cli.force);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.convert_options().package_name, "ui");
        assert_eq!(cli.convert_options().wx_import, "example.com/wx");
    }

    #[test]
    fn test_output_required_unless_dumping() {
        assert!(Cli::try_parse_from(["wxg-to-go", "--in", "a.wxg"]).is_err());

        let cli = Cli::try_parse_from(["wxg-to-go", "--in", "a.wxg", "--dump-units"]).unwrap();
        assert!(cli.dump_units);
        assert_eq!(cli.output, None);
    }
}
