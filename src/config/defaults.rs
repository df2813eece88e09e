use std::path::PathBuf;

pub fn default_version() -> u32 {
    1
}

pub fn default_concurrency() -> usize {
    6
}

pub fn default_report_dir() -> PathBuf {
    PathBuf::from("reports")
}

pub fn default_dataset() -> PathBuf {
    PathBuf::from("dataset.yaml")
}

pub fn default_endpoint() -> String {
    "http://localhost:8080/summarize".to_string()
}

pub fn default_timeout_sec() -> u64 {
    60
}
