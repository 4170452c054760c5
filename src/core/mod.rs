pub mod chart;
pub mod errors;
pub mod fetch;
pub mod http;
pub mod localization;
pub mod models;
pub mod pipeline;
pub mod state;
pub mod tasks;

pub use errors::ZukanError;
pub use models::{
    CatalogKind,
    DisplayRecord,
    LocalizedName,
    Selection,
};
