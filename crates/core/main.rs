#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![allow(clippy::as_conversions, clippy::mod_module_files)]

use std::{path::PathBuf, process};

mod file;
mod interact;

use refconv::format::{Compose, EndNote, FormatKind, Writer};

use clap::{Args, Parser};
use eyre::{eyre, WrapErr};
use log::{error, info, trace};

const DEFAULT_OUTPUT: &str = "output.xml";

fn main() {
    if let Err(err) = try_main() {
        error!("{:#}", err);
        process::exit(2);
    }
}

fn try_main() -> eyre::Result<()> {
    let Cli {
        input,
        format,
        output,
        global_opts:
            GlobalOpts {
                interact,
                verbosity,
                quiet,
            },
    } = Cli::parse();

    setup_errlog(verbosity as usize, quiet)?;

    // `quiet` and `interact` cannot be set at the same time
    let interact = interact && !quiet;

    if interact {
        trace!("Interact mode enabled");
    }

    let input = match input {
        Some(path) => Some(path),
        None if interact => Some(PathBuf::from(interact::user_input(
            "Enter the path of the reference file",
            None,
        )?)),
        None => None,
    };

    let kind = match (format, &input) {
        (Some(tag), _) => tag.parse::<FormatKind>()?,
        (None, Some(path)) if !interact => file::infer_format(path)?,
        (None, Some(path)) => match file::infer_format(path) {
            Ok(kind) => kind,
            Err(_) => interact::user_select_format()?,
        },
        (None, None) => {
            return Err(eyre!(
                "No input file or format given - use --format to search the current directory"
            ))
        }
    };

    let input = match input {
        Some(path) => path,
        None => file::find_format_file_in_current_directory(kind)?,
    };

    let output = match output {
        Some(path) => path,
        None if interact => PathBuf::from(interact::user_input(
            "Enter the output path for the EndNote file",
            Some(DEFAULT_OUTPUT),
        )?),
        None => PathBuf::from(DEFAULT_OUTPUT),
    };

    info!("Reading {} as {}", input.display(), kind.name());
    let content = file::read_input_file(&input)?;
    let biblio = kind
        .parse(&content)
        .wrap_err_with(|| format!("Cannot read references from '{}'", input.display()))?;
    trace!("Found {} references", biblio.len());

    // the output file is only created once composing has succeeded
    let xml = EndNote::compose(&biblio)?;
    file::create_output_file(&output)?.write(xml)?;

    if !quiet {
        println!("Conversion complete! EndNote file saved at: {}", output.display());
    }
    Ok(())
}

fn setup_errlog(verbosity: usize, quiet: bool) -> eyre::Result<()> {
    // if quiet then ignore verbosity but still show errors
    let verbosity = if quiet { 0 } else { verbosity + 1 };

    stderrlog::new().verbosity(verbosity).init()?;
    Ok(())
}

#[derive(Parser)]
#[clap(name = "refconv")]
#[clap(about = "Convert BibTeX, RIS, YAML or JSON reference files to EndNote XML")]
#[clap(version, author)]
struct Cli {
    /// The reference file to convert
    ///
    /// When omitted the current directory is searched for a single file with the extension of
    /// the selected format.
    #[clap(parse(from_os_str))]
    input: Option<PathBuf>,

    /// The format of the input file: bibtex, json, ris or yaml
    ///
    /// Inferred from the extension of the input file when omitted.
    #[clap(short, long)]
    format: Option<String>,

    /// Where to save the EndNote XML file
    #[clap(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    #[clap(flatten)]
    global_opts: GlobalOpts,
}

#[derive(Debug, Args)]
struct GlobalOpts {
    /// Enables interactive mode, which prompts for the input, format, and output when missing.
    #[clap(short, long)]
    interact: bool,

    /// How chatty the program is when performing commands
    ///
    /// The number of times this flag is used will increase how chatty
    /// the program is.
    #[clap(short, long, parse(from_occurrences))]
    verbosity: u8,

    /// Prevents the program from writing to stdout, errors will still be printed to stderr.
    #[clap(short, long)]
    quiet: bool,
}
