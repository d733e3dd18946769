//! Input and output stream selection for the binary.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

/// Path that selects the standard stream instead of a file.
const STDIO_PATH: &str = "-";

fn file_path(path: Option<&str>) -> Option<&str> {
    path.filter(|p| !p.is_empty() && *p != STDIO_PATH)
}

/// Name used in diagnostics for an optional path.
pub fn display_name<'a>(path: Option<&'a str>, stdio: &'a str) -> &'a str {
    file_path(path).unwrap_or(stdio)
}

/// Open the input file, or stdin when no path is given.
pub fn open_input(path: Option<&str>) -> Result<Box<dyn BufRead>, String> {
    match file_path(path) {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| format!("Failed to open '{}': {}", path, e))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}

/// Create the output file, or use stdout when no path is given.
pub fn open_output(path: Option<&str>) -> Result<Box<dyn Write>, String> {
    match file_path(path) {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| format!("Failed to create '{}': {}", path, e))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}
