use clap::{Parser, Subcommand, ValueEnum};

/// Shell types for completion generation
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

#[derive(Parser)]
#[command(name = "seoaio")]
#[command(author, version, about = "SEO and AI-search (AIO) page analyzer", long_about = None)]
#[command(after_help = r#"Examples:
  seoaio analyze https://example.com                    Full SEO + AIO report
  seoaio analyze example.com --industry 不動産 --balance 70
  seoaio analyze https://example.com --no-ai --json     Offline scoring as JSON
  seoaio classify --file page.txt                       Score saved page text
  seoaio industries                                     List known industries

Quick Start:
  1. seoaio doctor
  2. seoaio config set-industry 不動産
  3. seoaio analyze https://example.com
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a web page for SEO and AIO
    #[command(after_help = r#"Examples:
  seoaio analyze https://example.com
  seoaio analyze example.com                       # https:// is added
  seoaio analyze https://example.com --industry 医療 # Frame the report around an industry
  seoaio analyze https://example.com --balance 80  # Weight AIO at 80%
  seoaio analyze https://example.com --no-ai       # Skip the AI evaluation
  seoaio analyze https://example.com --json > report.json
"#)]
    Analyze {
        /// Page URL
        url: String,

        /// Industry of the site (overrides the configured one)
        #[arg(long)]
        industry: Option<String>,

        /// AIO weight in percent, 0-100 (default from config)
        #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
        balance: Option<u8>,

        /// Score AIO from content fit only, without the AI oracle
        #[arg(long)]
        no_ai: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify and score local text
    #[command(after_help = r#"Examples:
  seoaio classify "当店のメニューと予約方法のご案内"
  seoaio classify --file page.txt --title "会社概要"
  cat page.txt | seoaio classify --json
"#)]
    Classify {
        /// Text to analyze (reads --file or stdin when omitted)
        text: Option<String>,

        /// Read text from a file
        #[arg(long, conflicts_with = "text")]
        file: Option<std::path::PathBuf>,

        /// Page title
        #[arg(long, default_value = "")]
        title: String,

        /// Meta description
        #[arg(long, default_value = "")]
        meta: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List industries and content profiles
    Industries {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or change configuration
    #[command(subcommand, after_help = r#"Examples:
  seoaio config show                 Show current settings
  seoaio config set-balance 70       Weight AIO at 70% by default
  seoaio config set-industry 不動産   Default industry for analyze
  seoaio config set-ai off           Never call the AI oracle
"#)]
    Config(ConfigCommands),

    /// Check that the AI oracle and config are usable
    Doctor,

    /// Generate shell completions
    #[command(after_help = r#"Examples:
  seoaio completions bash >> ~/.bashrc           Add bash completions
  seoaio completions zsh >> ~/.zshrc             Add zsh completions
  seoaio completions fish > ~/.config/fish/completions/seoaio.fish
  seoaio completions powershell >> $PROFILE      Add PowerShell completions
"#)]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current settings
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the config file path
    Path,

    /// Set the default AIO weight in percent
    SetBalance {
        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        balance: u8,
    },

    /// Set the default industry ("none" clears it)
    SetIndustry { industry: String },

    /// Enable or disable the AI oracle
    SetAi {
        #[arg(value_enum)]
        state: Toggle,
    },
}
