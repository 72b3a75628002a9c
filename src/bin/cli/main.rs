mod app;
mod commands;

use std::path::PathBuf;

use clap::Parser;

use enex2text_lib::StripMode;

const USAGE_ERROR: &str = "can't execute over 2 in a single mode. when you want to convert multiple files, put target files in input directory and don't put any arguments.";

#[derive(Parser)]
#[command(
    name = "enex2text",
    about = "Convert Evernote .enex exports to plain-text files",
    version
)]
struct Cli {
    /// .enex file to convert (default: every .enex file in the input directory)
    paths: Vec<PathBuf>,

    /// TOML configuration file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory scanned for .enex files (default: input_files)
    #[arg(long, value_name = "DIR")]
    input_dir: Option<PathBuf>,

    /// Directory receiving the text files (default: output_files)
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Directory receiving converted .enex files (default: extracted_files)
    #[arg(long, value_name = "DIR")]
    archive_dir: Option<PathBuf>,

    /// How note markup is reduced to text
    #[arg(long, value_enum)]
    strip: Option<StripArg>,

    /// Show what would be written without touching any file
    #[arg(long)]
    dry_run: bool,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum StripArg {
    /// <div> and <br> become line breaks
    TagAware,
    /// All tags are removed
    Generic,
}

impl From<StripArg> for StripMode {
    fn from(arg: StripArg) -> Self {
        match arg {
            StripArg::TagAware => StripMode::TagAware,
            StripArg::Generic => StripMode::Generic,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if cli.paths.len() > 1 {
        eprintln!("{}", USAGE_ERROR);
        std::process::exit(1);
    }

    let app = app::App::new(&cli)?;

    let ok = match cli.paths.first() {
        Some(path) => {
            if !path.is_file() {
                eprintln!("Error: File '{}' not found.", path.display());
                std::process::exit(1);
            }
            app.prepare()?;
            commands::convert::run(&app, path)?
        }
        None => {
            app.prepare()?;
            commands::batch::run(&app)?
        }
    };

    println!("Finish!");

    if !ok {
        std::process::exit(1);
    }

    Ok(())
}
