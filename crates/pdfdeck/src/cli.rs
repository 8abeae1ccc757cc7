use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pdfdeck")]
#[command(author, version, about)]
#[command(long_about = "Present PDF slides with a presenter view.\n\n\
    Import one or more PDFs, rearrange and delete slides, keep speaker notes\n\
    per slide and present with a timer on one screen and the slides on another.\n\n\
    Examples:\n  \
    pdfdeck talk.pdf                     Open talk.pdf in the organizer\n  \
    pdfdeck talk.pdf --present           Start presenting right away\n  \
    pdfdeck intro.pdf talk.pdf           Combine two PDFs into one deck\n  \
    pdfdeck export talk.pdf -o out.pdf --order 3,1,2\n  \
    pdfdeck notes show talk.pdf          Print the speaker notes")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// PDF files to import (paths or file:// URLs)
    pub files: Vec<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Start in presentation mode
    #[arg(long, global = false)]
    pub present: bool,

    /// Open the projector in a window instead of fullscreen
    #[arg(long, global = false)]
    pub windowed: bool,

    /// Start on a specific slide (1-indexed)
    #[arg(long, global = false)]
    pub slide: Option<usize>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// View and modify configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Write the slides of one or more PDFs into a new PDF
    Export {
        /// PDF files, imported in this order
        #[arg(required = true)]
        files: Vec<String>,

        /// Output PDF file
        #[arg(short, long)]
        output: PathBuf,

        /// Slide positions (1-indexed, comma separated) in output order
        #[arg(long, value_delimiter = ',')]
        order: Vec<usize>,

        /// Slide positions (1-indexed, comma separated) to leave out
        #[arg(long, value_delimiter = ',')]
        drop: Vec<usize>,
    },

    /// List the slides of one or more PDFs
    Pages {
        /// PDF files, imported in this order
        #[arg(required = true)]
        files: Vec<String>,
    },

    /// Show the speaker notes stored next to a PDF
    Notes {
        #[command(subcommand)]
        command: NotesCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Display current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. defaults.theme, defaults.fit, pdfium.library_dir)
        key: String,

        /// Value to set
        value: String,
    },

    /// Print the location of the config file
    Path,
}

#[derive(Subcommand)]
pub enum NotesCommands {
    /// Print every note with its slide number
    Show {
        /// The PDF the notes belong to
        file: String,
    },

    /// Print the location of the notes file
    Path {
        /// The PDF the notes belong to
        file: String,
    },
}

#[derive(Clone, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        match self.command {
            Some(Commands::Config { command }) => crate::commands::config::run(command),
            Some(Commands::Completion { shell }) => {
                crate::commands::completion::run(shell);
                Ok(())
            }
            Some(Commands::Export {
                files,
                output,
                order,
                drop,
            }) => crate::commands::export::run(&files, &output, &order, &drop, self.quiet),
            Some(Commands::Pages { files }) => crate::commands::pages::run(&files),
            Some(Commands::Notes { command }) => crate::commands::notes::run(command),
            Some(Commands::Version) => {
                crate::commands::version::run();
                Ok(())
            }
            None => {
                let options = crate::app::LaunchOptions {
                    files: self.files,
                    present: self.present,
                    windowed: self.windowed,
                    slide: self.slide,
                };
                crate::app::run(options)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn files_without_subcommand_launch_the_gui() {
        let cli = Cli::try_parse_from(["pdfdeck", "a.pdf", "b.pdf", "--present", "--slide", "3"])
            .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.files, vec!["a.pdf", "b.pdf"]);
        assert!(cli.present);
        assert_eq!(cli.slide, Some(3));
    }

    #[test]
    fn export_takes_comma_separated_positions() {
        let cli = Cli::try_parse_from([
            "pdfdeck", "export", "a.pdf", "b.pdf", "-o", "out.pdf", "--order", "3,1,2", "--drop",
            "2",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Export {
                files,
                output,
                order,
                drop,
            }) => {
                assert_eq!(files.len(), 2);
                assert_eq!(output, PathBuf::from("out.pdf"));
                assert_eq!(order, vec![3, 1, 2]);
                assert_eq!(drop, vec![2]);
            }
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn verbosity_is_global() {
        let cli = Cli::try_parse_from(["pdfdeck", "pages", "a.pdf", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }
}
