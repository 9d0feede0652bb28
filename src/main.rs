use anyhow::Result;
use clap::{CommandFactory, Parser};

use image_to_text::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "image-to-text",
    version,
    about = "Extract text from an image with Tesseract after Otsu binarization"
)]
struct Cli {
    /// Image file to read
    image_path: Option<String>,

    /// Tesseract language(s), e.g. eng or eng+deu (default: eng)
    #[arg(short = 'l', long = "lang")]
    lang: Option<String>,

    /// Path to the tesseract binary (default: tesseract on PATH)
    #[arg(long = "tesseract-path")]
    tesseract_path: Option<String>,

    /// Read extra settings from a local TOML file
    #[arg(short = 'r', long = "read-settings")]
    read_settings: Option<String>,

    /// Print the outcome as a JSON object
    #[arg(long = "json")]
    json: bool,

    /// Exit with 2 (not found), 3 (decode) or 4 (recognition) on failure
    #[arg(long = "exit-code")]
    exit_code: bool,

    /// Show installed Tesseract languages and exit
    #[arg(long = "list-langs")]
    list_langs: bool,

    /// Enable verbose logging
    #[arg(long = "verbose")]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    image_to_text::logging::init(cli.verbose)?;

    if cli.image_path.is_none() && !cli.list_langs {
        eprintln!("{}", Cli::command().render_usage());
        std::process::exit(1);
    }

    let output = image_to_text::run(image_to_text::Config {
        image_path: cli.image_path,
        tesseract_path: cli.tesseract_path,
        lang: cli.lang,
        settings_path: cli.read_settings,
        format: if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        },
        exit_code: cli.exit_code,
        list_langs: cli.list_langs,
    })?;

    println!("{}", output.text);
    if output.exit_code != 0 {
        std::process::exit(output.exit_code);
    }
    Ok(())
}
