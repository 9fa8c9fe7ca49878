use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use typemirror_lib::SourceMap;

/// Schema file extension picked up from directories.
pub const SCHEMA_EXTENSION: &str = "tm";

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("schema is required: use positional arguments or -s/--schema")]
    Missing,

    #[error("failed to read stdin: {0}")]
    Stdin(io::Error),

    #[error("stdin can only be given once")]
    StdinTwice,

    #[error("failed to read '{}': {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("no .tm files found in '{}'", .0.display())]
    EmptyDirectory(PathBuf),
}

/// Collects schema text from inline text, files, directories or stdin (`-`).
pub fn load_schema_sources(
    paths: &[PathBuf],
    text: Option<&str>,
) -> Result<SourceMap, LoadError> {
    if let Some(text) = text {
        return Ok(SourceMap::inline(text));
    }
    if paths.is_empty() {
        return Err(LoadError::Missing);
    }

    let mut map = SourceMap::new();
    let mut stdin_used = false;
    for path in paths {
        if path.as_os_str() == "-" {
            if stdin_used {
                return Err(LoadError::StdinTwice);
            }
            stdin_used = true;
            load_stdin(&mut map)?;
        } else if path.is_dir() {
            load_directory(&mut map, path)?;
        } else {
            load_file(&mut map, path)?;
        }
    }
    Ok(map)
}

fn load_stdin(map: &mut SourceMap) -> Result<(), LoadError> {
    let mut buf = String::new();
    io::stdin()
        .read_to_string(&mut buf)
        .map_err(LoadError::Stdin)?;
    map.add_stdin(&buf);
    Ok(())
}

fn load_file(map: &mut SourceMap, path: &Path) -> Result<(), LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    map.add_file(&path.to_string_lossy(), &content);
    Ok(())
}

fn load_directory(map: &mut SourceMap, dir: &Path) -> Result<(), LoadError> {
    let entries = fs::read_dir(dir).map_err(|source| LoadError::Read {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == SCHEMA_EXTENSION))
        .collect();

    if files.is_empty() {
        return Err(LoadError::EmptyDirectory(dir.to_path_buf()));
    }

    // Package resolution and declaration order depend on file order.
    files.sort();

    for path in files {
        load_file(map, &path)?;
    }
    Ok(())
}
