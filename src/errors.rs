use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum GopdepsError {
    #[error("No Go or Go+ source files found in {path}")]
    #[diagnostic(code(gopdeps::no_files))]
    NoFiles { path: PathBuf },

    #[error("Could not read {file}: {source}")]
    #[diagnostic(code(gopdeps::read))]
    Read {
        file: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{file}:{line}:{column}: {message}")]
    #[diagnostic(code(gopdeps::syntax))]
    Syntax {
        file: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("{file}: expected 'package' clause before imports")]
    #[diagnostic(code(gopdeps::missing_package))]
    MissingPackageClause { file: PathBuf },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(gopdeps::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(gopdeps::io))]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(code(gopdeps::json))]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(code(gopdeps::glob))]
    Glob(#[from] globset::Error),
}

impl GopdepsError {
    /// The source file this error is about, if it concerns a single file.
    pub fn file(&self) -> Option<&std::path::Path> {
        match self {
            GopdepsError::Read { file, .. }
            | GopdepsError::Syntax { file, .. }
            | GopdepsError::MissingPackageClause { file } => Some(file),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GopdepsError>;
