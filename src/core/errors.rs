use thiserror::Error;

#[derive(Error, Debug)]
pub enum ZukanError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("HTTP error {status} from {url}")]
    Status { status: u16, url: String },

    #[error("Unexpected response shape from {url}: {source}")]
    Schema {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid URL: {0}")]
    Url(String),

    #[error("Catalog returned no entries")]
    EmptyCatalog,

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Invalid id range {min}..={max}")]
    InvalidIdRange { min: u32, max: u32 },

    #[error("ZukanError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for ZukanError {
    fn from(error: std::io::Error) -> Self {
        ZukanError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for ZukanError {
    fn from(error: reqwest::Error) -> Self {
        ZukanError::Reqwest(Box::new(error))
    }
}
