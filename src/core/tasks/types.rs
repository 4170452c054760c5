use crate::core::{
    CatalogKind,
    DisplayRecord,
    ZukanError,
};

pub type RecordResult = Result<DisplayRecord, ZukanError>;

#[derive(Debug)]
pub enum TaskResult {
    RecordFetched { catalog: CatalogKind, generation: u64, result: RecordResult },
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::RecordFetched { .. } => "record_fetched",
        }
    }
}
