use std::path::PathBuf;

/// CollectRequest - Internal request DTO for collecting JSON exports
#[derive(Debug, Clone)]
pub struct CollectRequest {
    /// Directory holding the `.json` export files
    pub input_dir: PathBuf,
}

impl CollectRequest {
    pub fn new(input_dir: PathBuf) -> Self {
        Self { input_dir }
    }
}
