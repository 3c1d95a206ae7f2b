//! Command-line interface for xsd-automata

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::Write;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
use xsd_automata::{compile, write_record, ContentNode, ExportFormat, Limits};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "xsd-automata")]
#[command(author, version, about = "Compile XSD content models into minimal DFAs", long_about = None)]
struct Cli {
    /// Log pipeline stages to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a JSON content model into an automaton record
    Build {
        /// Path to the content model JSON file
        #[arg(value_name = "MODEL")]
        model: PathBuf,

        /// Output format: json, pretty-json, dot
        #[arg(short, long, default_value = "json")]
        format: String,

        /// Pretty print JSON output
        #[arg(short, long)]
        pretty: bool,

        /// Maximum number of particles in an xs:all group
        #[arg(long, value_name = "N")]
        max_all_group_size: Option<usize>,

        /// Print per-stage state counts to stderr
        #[arg(long)]
        stats: bool,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "xsd_automata=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Build {
            model,
            format,
            pretty,
            max_all_group_size,
            stats,
            output,
        } => cmd_build(model, format, pretty, max_all_group_size, stats, output),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn cmd_build(
    model_path: PathBuf,
    format: String,
    pretty: bool,
    max_all_group_size: Option<usize>,
    show_stats: bool,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut format: ExportFormat = format.parse()?;
    if pretty && format == ExportFormat::Json {
        format = ExportFormat::PrettyJson;
    }

    let text = fs::read_to_string(&model_path)?;
    let model = ContentNode::from_json_str(&text)?;

    let mut limits = Limits::default();
    if let Some(size) = max_all_group_size {
        limits = limits.with_max_all_group_size(size);
    }

    let compilation = compile(&model, &limits)?;

    if show_stats {
        let stats = compilation.stats;
        eprintln!("NFA states:      {}", stats.nfa_states);
        eprintln!("DFA states:      {}", stats.dfa_states);
        eprintln!("Minimal states:  {}", stats.minimal_states);
        eprintln!("Record states:   {}", compilation.record.num_states());
        eprintln!("All orderings:   {}", stats.permutations);
    }

    match output {
        Some(path) => {
            let mut writer = std::io::BufWriter::new(fs::File::create(&path)?);
            write_record(&compilation.record, format, &mut writer)?;
            writer.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            write_record(&compilation.record, format, stdout.lock())?;
        }
    }

    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
