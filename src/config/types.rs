use serde::Deserialize;

/// Main configuration structure for Bookmark-Sweep
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub files: FilesConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub health: HealthConfig,
    #[serde(default)]
    pub classifier: ClassifierConfig,
}

/// Input and output file locations
#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
    /// Path to the exported bookmark HTML file
    #[serde(rename = "input-path", default = "default_input_path")]
    pub input_path: String,

    /// Path to the JSON progress report (checkpoint)
    #[serde(rename = "report-path", default = "default_report_path")]
    pub report_path: String,

    /// Path to the cleaned bookmark HTML output
    #[serde(rename = "output-path", default = "default_output_path")]
    pub output_path: String,
}

/// Pipeline behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Maximum number of links in flight at once
    #[serde(rename = "concurrent-limit", default = "default_concurrent_limit")]
    pub concurrent_limit: usize,

    /// Maximum retries for transient classification failures
    #[serde(rename = "max-retries", default = "default_max_retries")]
    pub max_retries: u32,

    /// Delay before each classification retry (milliseconds)
    #[serde(rename = "retry-delay-ms", default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// Flush the checkpoint every N completed links (0 disables)
    #[serde(rename = "checkpoint-every", default)]
    pub checkpoint_every: usize,
}

/// Health checker configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HealthConfig {
    /// Per-request timeout for health checks (milliseconds)
    #[serde(rename = "timeout-ms", default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// User agent presented to checked sites
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Body keywords that mark a page as parked/spam (case-insensitive)
    #[serde(rename = "spam-keywords", default = "default_spam_keywords")]
    pub spam_keywords: Vec<String>,
}

/// Classification service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    /// Chat-completions endpoint URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model identifier sent with each request
    #[serde(default = "default_model")]
    pub model: String,

    /// Name of the environment variable holding the bearer credential
    #[serde(rename = "api-key-env", default = "default_api_key_env")]
    pub api_key_env: String,

    /// Per-request timeout for classification calls (milliseconds)
    #[serde(rename = "timeout-ms", default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Category used when the service returns an empty answer
    #[serde(rename = "fallback-category", default = "default_fallback_category")]
    pub fallback_category: String,

    /// Candidate categories offered to the service
    #[serde(default = "default_categories")]
    pub categories: Vec<String>,
}

fn default_input_path() -> String {
    "./bookmarks.html".to_string()
}

fn default_report_path() -> String {
    "./bookmarks_report.json".to_string()
}

fn default_output_path() -> String {
    "./bookmarks_new.html".to_string()
}

fn default_concurrent_limit() -> usize {
    5
}

fn default_max_retries() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_user_agent() -> String {
    "Mozilla/5.0 Chrome/120.0.0.0 Safari/537.36".to_string()
}

fn default_spam_keywords() -> Vec<String> {
    [
        "domain for sale",
        "buy this domain",
        "parked free",
        "godaddy",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_api_key_env() -> String {
    "SWEEP_API_KEY".to_string()
}

fn default_fallback_category() -> String {
    "Misc".to_string()
}

fn default_categories() -> Vec<String> {
    [
        "Tech/Frontend",
        "Tech/Backend",
        "Tech/AI",
        "Tech/DevOps",
        "Tools/Online Services",
        "Design/UI & Assets",
        "Reading/News & Blogs",
        "Learning/Tutorials & Docs",
        "Life/Entertainment & Shopping",
        "Finance/Investing",
        "Misc",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            report_path: default_report_path(),
            output_path: default_output_path(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrent_limit: default_concurrent_limit(),
            max_retries: default_max_retries(),
            retry_delay_ms: default_retry_delay_ms(),
            checkpoint_every: 0,
        }
    }
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
            spam_keywords: default_spam_keywords(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_ms: default_timeout_ms(),
            fallback_category: default_fallback_category(),
            categories: default_categories(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            files: FilesConfig::default(),
            pipeline: PipelineConfig::default(),
            health: HealthConfig::default(),
            classifier: ClassifierConfig::default(),
        }
    }
}
