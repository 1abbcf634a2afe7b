use std::{
    fs::{File, OpenOptions},
    io::{Read, Write},
    path::{Path, PathBuf},
};

use refconv::{
    format::{EndNote, Format, FormatKind, Writer},
    Error, ErrorKind,
};

use eyre::{eyre, Context};
use glob::glob;
use log::trace;

const BOM: char = '\u{feff}';

/// The file the composed `EndNote` XML is written to.
pub struct EndNoteFile {
    file: File,
}

impl Writer for EndNoteFile {
    type Format = EndNote;

    fn write(&mut self, format: EndNote) -> Result<(), Error> {
        self.file
            .write_all(format.raw().as_bytes())
            .and_then(|()| self.file.flush())
            .map_err(|e| Error::wrap(ErrorKind::IO, e))
    }
}

/// Open `path` for writing, replacing any existing content.
pub fn create_output_file(path: &Path) -> eyre::Result<EndNoteFile> {
    trace!("Opening {} for the {} output", path.display(), EndNote::name());
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .map(|file| EndNoteFile { file })
        .wrap_err_with(|| format!("Failed to open the '{}' file for writing.", path.display()))
}

pub fn read_input_file(path: &Path) -> eyre::Result<String> {
    if !path.is_file() {
        return Err(eyre!("Input file does not exist: '{}'", path.display()));
    }

    let mut content = String::new();
    File::open(path)
        .and_then(|mut file| file.read_to_string(&mut content))
        .wrap_err_with(|| format!("Cannot read contents of the '{}' file", path.display()))?;

    // a leading byte order mark is not part of the text
    match content.strip_prefix(BOM) {
        Some(text) => {
            trace!("Skipping the byte order mark at the start of {}", path.display());
            Ok(text.to_owned())
        }
        None => Ok(content),
    }
}

/// Work out the format of a file from its extension.
pub fn infer_format(path: &Path) -> eyre::Result<FormatKind> {
    let kind = path
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(FormatKind::from_ext)
        .ok_or_else(|| {
            eyre!(
                "Cannot infer the format of '{}' - use the --format option to select one",
                path.display()
            )
        })?;
    trace!("Inferred {} from the extension of {}", kind.name(), path.display());
    Ok(kind)
}

#[inline]
pub fn find_format_file_in_current_directory(kind: FormatKind) -> eyre::Result<PathBuf> {
    find_format_file_in_directory(kind, ".")
}

fn find_format_file_in_directory<P>(kind: FormatKind, dir: P) -> eyre::Result<PathBuf>
where
    P: AsRef<Path>,
{
    let path = dir.as_ref();
    if !path.is_dir() {
        return Err(eyre!("Path entered is not a directory"));
    }

    let pattern = format!("{}/*.{}", path.to_string_lossy(), kind.ext());
    trace!("Searching for input files matching {pattern}");

    let mut iter = glob(&pattern).wrap_err("Cannot build a search pattern for the directory")?;

    let path_buf = iter
        .next()
        .ok_or_else(|| {
            eyre!(
                "No .{} file found in the '{}' directory",
                kind.ext(),
                path.display()
            )
        })?
        .wrap_err("Cannot determine a file path - Do you have the correct permissions?")?;

    if iter.next().is_some() {
        return Err(eyre!(
            "More than one .{} file found - pass the input file to select one",
            kind.ext()
        ));
    }

    Ok(path_buf)
}
