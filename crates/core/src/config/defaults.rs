//! Default values for `ScanConfig`, split out with one `fn default_x() -> T`
//! per field so `serde(default = "...")` and `Default for ScanConfig` can
//! share a single source of truth.

pub fn default_exclude() -> Vec<String> {
    vec![
        "**/node_modules/**".to_string(),
        "**/.venv/**".to_string(),
        "**/venv/**".to_string(),
        "**/target/**".to_string(),
        "**/vendor/**".to_string(),
        "**/.git/**".to_string(),
        "**/dist/**".to_string(),
        "**/build/**".to_string(),
    ]
}

pub fn default_di_decorators() -> Vec<String> {
    vec![
        "Injectable".to_string(),
        "Component".to_string(),
        "Controller".to_string(),
        "Module".to_string(),
        "Service".to_string(),
    ]
}

pub fn default_di_container_patterns() -> Vec<String> {
    vec![
        r"Container\.get<(\w+)>\(".to_string(),
        r"services\.AddScoped<(\w+)>\(".to_string(),
        r"services\.AddSingleton<(\w+)>\(".to_string(),
        r"services\.AddTransient<(\w+)>\(".to_string(),
    ]
}

pub fn default_dynamic_package_fields() -> Vec<String> {
    vec!["plugins".to_string(), "extensions".to_string()]
}

pub fn default_max_parse_workers() -> usize {
    8
}

pub fn default_progress_chunk_size() -> usize {
    200
}
