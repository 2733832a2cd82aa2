use clap::Parser;
use std::path::PathBuf;

/// Run the no-floating-promises lint without adopting its configuration
#[derive(Parser, Debug)]
#[command(
    name = "nofp",
    about = "Detect floating promises in a TypeScript/JavaScript project",
    version,
    long_about = "nofp temporarily writes eslint.config.mjs and tsconfig.json into the project, \
                  runs ESLint's @typescript-eslint/no-floating-promises rule through Deno, and \
                  removes every file it created afterwards, whether the lint passes, fails, or \
                  is interrupted. It refuses to run if either file already exists.\n\n\
                  Examples:\n  \
                  nofp\n  \
                  nofp -C path/to/project\n  \
                  nofp --install"
)]
pub struct CliArgs {
    #[arg(
        long,
        help = "Write the configuration and install type declarations, then exit without linting or cleaning up"
    )]
    pub install: bool,

    #[arg(
        short = 'C',
        long,
        value_name = "PATH",
        help = "Project root (defaults to current directory)"
    )]
    pub project: Option<PathBuf>,

    #[arg(long, help = "Do not install type declarations when node_modules is missing")]
    pub no_bootstrap: bool,

    #[arg(long, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, help = "Verbose logging (debug level)")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_args_verify() {
        CliArgs::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = CliArgs::parse_from(["nofp"]);

        assert!(!args.install);
        assert!(args.project.is_none());
        assert!(!args.no_bootstrap);
        assert!(args.log_level.is_none());
        assert!(!args.verbose);
        assert!(!args.quiet);
    }

    #[test]
    fn test_install_mode() {
        let args = CliArgs::parse_from(["nofp", "--install"]);
        assert!(args.install);
    }

    #[test]
    fn test_project_path() {
        let args = CliArgs::parse_from(["nofp", "-C", "/tmp/project", "--no-bootstrap"]);

        assert_eq!(args.project, Some(PathBuf::from("/tmp/project")));
        assert!(args.no_bootstrap);
    }

    #[test]
    fn test_verbose_conflicts_with_quiet() {
        let result = CliArgs::try_parse_from(["nofp", "--verbose", "--quiet"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_argument_rejected() {
        let result = CliArgs::try_parse_from(["nofp", "--fix"]);
        assert!(result.is_err());
    }
}
