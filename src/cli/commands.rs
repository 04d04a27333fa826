//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::{Path, PathBuf};

use lucent_syntax::diagnostics::CompileError;
use lucent_syntax::{lexer, parse_source, printer};

use super::{CliError, CliResult, ExitCode};

/// Maximum source file size (100 MB)
///
/// Files larger than this are rejected to prevent out-of-memory conditions.
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Read source file contents.
///
/// ## Errors
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE` (100 MB)
pub fn read_source(file_path: &str) -> CliResult<String> {
    let metadata = fs::metadata(file_path)
        .map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", file_path, e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            file_path,
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(file_path)
        .map_err(|e| CliError::failure(format!("Error reading file '{}': {}", file_path, e)))
}

/// Render collected errors as miette reports with source context.
fn render_errors(file_path: &str, source: &str, errors: Vec<CompileError>) -> String {
    let mut out = String::new();
    for error in errors {
        let report = miette::Report::new(error.into_report(file_path, source));
        out.push_str(&format!("{:?}", report));
    }
    out
}

/// Parse a file and report diagnostics. `lucent check <file>` and the
/// default no-subcommand action.
pub fn check_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let (program, errors) = parse_source(&source);

    if !errors.is_empty() {
        let count = errors.len();
        let mut message = render_errors(file_path, &source, errors);
        message.push_str(&format!(
            "{} error{} in {}",
            count,
            if count == 1 { "" } else { "s" },
            file_path
        ));
        return Err(CliError::failure(message));
    }

    tracing::info!(items = program.items.len(), file = file_path, "check passed");
    Ok(ExitCode::SUCCESS)
}

/// Parse a file and dump the syntax tree. `lucent parse <file>`.
pub fn parse_file(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let (program, errors) = parse_source(&source);

    // The tree is printed even with errors; failed constructs appear as
    // explicit Error nodes.
    println!("{:#?}", program);

    if !errors.is_empty() {
        eprint!("{}", render_errors(file_path, &source, errors));
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Tokenize a file and dump the token stream. `lucent --tokens <file>`.
pub fn dump_tokens(file_path: &str) -> CliResult<ExitCode> {
    let source = read_source(file_path)?;
    let (tokens, errors) = lexer::lex(&source);

    for token in &tokens {
        println!(
            "{:>5}..{:<5} {:?}",
            token.span.start, token.span.end, token.kind
        );
    }

    if !errors.is_empty() {
        eprint!("{}", render_errors(file_path, &source, errors));
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Format a file or directory of files. `lucent fmt <path> [--check]`.
///
/// With `--check`, no file is modified; the exit code reports whether any
/// file would change.
pub fn format_files(path: &str, check: bool) -> CliResult<ExitCode> {
    let files = collect_source_files(Path::new(path))?;
    if files.is_empty() {
        return Err(CliError::failure(format!(
            "No .lc files found under '{}'",
            path
        )));
    }

    let mut changed = 0usize;
    for file in &files {
        let file_path = file.to_string_lossy();
        let source = read_source(&file_path)?;
        let (program, errors) = parse_source(&source);
        if !errors.is_empty() {
            let mut message = render_errors(&file_path, &source, errors);
            message.push_str(&format!("cannot format '{}': file has errors", file_path));
            return Err(CliError::failure(message));
        }

        let formatted = printer::print(&program);
        if formatted == source {
            continue;
        }
        changed += 1;
        if check {
            eprintln!("would reformat: {}", file_path);
        } else {
            fs::write(file, formatted)
                .map_err(|e| CliError::failure(format!("Error writing '{}': {}", file_path, e)))?;
            eprintln!("reformatted: {}", file_path);
        }
    }

    if check && changed > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Collect `.lc` files under `path`, recursively. A file path is returned
/// as-is regardless of extension so explicit arguments always work.
fn collect_source_files(path: &Path) -> CliResult<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut files = Vec::new();
    let mut stack = vec![path.to_path_buf()];
    while let Some(dir) = stack.pop() {
        let entries = fs::read_dir(&dir).map_err(|e| {
            CliError::failure(format!("Error reading directory '{}': {}", dir.display(), e))
        })?;
        for entry in entries {
            let entry = entry.map_err(|e| {
                CliError::failure(format!("Error reading directory '{}': {}", dir.display(), e))
            })?;
            let entry_path = entry.path();
            if entry_path.is_dir() {
                stack.push(entry_path);
            } else if entry_path.extension().is_some_and(|ext| ext == "lc") {
                files.push(entry_path);
            }
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_a_cli_error() {
        let err = read_source("definitely/not/a/file.lc").unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(err.message.contains("file.lc"));
    }

    #[test]
    fn render_errors_includes_the_message() {
        let source = "fn f(:\n";
        let (_, errors) = parse_source(source);
        assert!(!errors.is_empty());
        let rendered = render_errors("bad.lc", source, errors);
        assert!(rendered.contains("bad.lc"));
    }
}
