use std::fmt;

#[derive(Debug)]
pub enum TypeLinkError {
    ManifestError(String),
    NotDeclared(String),
    NotInstallable(String, String),
    DownloadFailed(String, String),
    ExtractFailed(String, String),
    CloneFailed(String, String),
    CheckoutFailed(String, String),
    SourceMissing(String, String),
    InvalidPattern(String, String),
    NetworkError(String),
    IoError(String),
}

impl fmt::Display for TypeLinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ManifestError(msg) => {
                write!(f, "Package.json error: {msg}")
            }
            Self::NotDeclared(name) => {
                write!(
                    f,
                    "cannot link unless '{name}' is saved in dependencies or devDependencies in the package.json file"
                )
            }
            Self::NotInstallable(name, reason) => {
                write!(f, "'{name}' is not installable: {reason}")
            }
            Self::DownloadFailed(url, msg) => {
                write!(f, "Failed to download {url}: {msg}")
            }
            Self::ExtractFailed(path, msg) => {
                write!(f, "Failed to extract {path}: {msg}")
            }
            Self::CloneFailed(url, msg) => {
                write!(f, "Failed to clone {url}: {msg}")
            }
            Self::CheckoutFailed(reference, msg) => {
                write!(f, "Failed to checkout '{reference}': {msg}")
            }
            Self::SourceMissing(name, path) => {
                write!(f, "Source for '{name}' not found at {path}")
            }
            Self::InvalidPattern(pattern, msg) => {
                write!(f, "Invalid ignore pattern '{pattern}': {msg}")
            }
            Self::NetworkError(msg) => {
                write!(f, "Network error: {msg}")
            }
            Self::IoError(msg) => {
                write!(f, "IO error: {msg}")
            }
        }
    }
}

impl std::error::Error for TypeLinkError {}

impl From<anyhow::Error> for TypeLinkError {
    fn from(err: anyhow::Error) -> Self {
        Self::ManifestError(err.to_string())
    }
}

impl From<std::io::Error> for TypeLinkError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TypeLinkError>;
