use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "d2c")]
#[command(
    version,
    about = "Design-to-code inference - turn an extracted design selection into component JSX",
    long_about = "d2c\n\nModes:\n- generate: JSX with utility classes, recognized components and animation hints.\n- context: the lossless plain-text context document for a selection.\n- detect: component matches only.\n- watch: newline-delimited selections on stdin, debounced, one result per settled change.\n\nInput is a JSON array of nodes or an object with a \"nodes\" array; pass - to read stdin."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional config file (TOML) for color/detection/animation/pipeline defaults; CLI flags override config"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate JSX for a selection
    Generate {
        #[arg(long, short, default_value = "-", help = "Selection JSON file (- for stdin)")]
        input: PathBuf,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Write the markup to this file (envelope still printed)")]
        output: Option<PathBuf>,

        #[arg(long, help = "Compute animation suggestions but leave them all disabled")]
        no_animations: bool,

        #[arg(
            long,
            value_name = "NODE_ID:KIND",
            help = "Disable one suggestion, e.g. 12:3:hero-fade (repeatable)"
        )]
        disable: Vec<String>,

        #[arg(
            long,
            default_value = "60",
            help = "Minimum classifier confidence (0-100) for a component match"
        )]
        threshold: u8,
    },

    /// Print the plain-text context document for a selection
    Context {
        #[arg(long, short, default_value = "-", help = "Selection JSON file (- for stdin)")]
        input: PathBuf,

        #[arg(
            long,
            value_enum,
            help = "Wrap the document in an output envelope (raw text if omitted)"
        )]
        format: Option<OutputFormat>,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,
    },

    /// Detect components without generating markup
    Detect {
        #[arg(long, short, default_value = "-", help = "Selection JSON file (- for stdin)")]
        input: PathBuf,

        #[arg(long, value_enum, default_value = "json", help = "Output format")]
        format: OutputFormat,

        #[arg(long, short, help = "Output file path (stdout if omitted)")]
        output: Option<PathBuf>,

        #[arg(
            long,
            default_value = "60",
            help = "Minimum classifier confidence (0-100) for a component match"
        )]
        threshold: u8,

        #[arg(long, help = "Include animation suggestions for the matches")]
        animations: bool,
    },

    /// Regenerate on every settled selection read from stdin
    Watch {
        #[arg(
            long,
            default_value = "150",
            value_name = "MS",
            help = "Quiet period before a changed selection is processed"
        )]
        debounce_ms: u64,

        #[arg(long, help = "Compute animation suggestions but leave them all disabled")]
        no_animations: bool,
    },
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Pretty,
}

pub fn parse() -> Cli {
    Cli::parse()
}
