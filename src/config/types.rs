use serde::Deserialize;

/// Default per-request timeout for page fetches, in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default word budget per stored chunk
pub const DEFAULT_MAX_WORDS: usize = 500_000;

/// Main configuration structure for docs-mirror
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub sink: SinkConfig,

    /// Documentation trees to mirror, processed in order
    #[serde(rename = "target", alias = "targets", alias = "documentacoes")]
    pub targets: Vec<Target>,
}

/// HTTP fetch configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Per-request timeout (seconds)
    #[serde(
        rename = "timeout-secs",
        alias = "timeout_secs",
        default = "default_timeout_secs"
    )]
    pub timeout_secs: u64,

    /// User-Agent header sent with every page request
    #[serde(
        rename = "user-agent",
        alias = "user_agent",
        default = "default_user_agent"
    )]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// How targets are written to the destination store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SinkMode {
    /// `destination-id` is a Google Doc whose whole body is replaced
    Document,
    /// `destination-id` is a Drive file whose content is overwritten
    DriveFile,
    /// `destination-id` is a Drive folder; output is upserted as named files
    DriveFolder,
}

/// Destination configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SinkConfig {
    #[serde(default = "default_sink_mode")]
    pub mode: SinkMode,

    /// Maximum words per stored file; longer output is split into parts
    #[serde(rename = "max-words", alias = "max_words", default = "default_max_words")]
    pub max_words: usize,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            mode: default_sink_mode(),
            max_words: default_max_words(),
        }
    }
}

/// One documentation tree to mirror
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Target {
    /// Human-readable name, also used as the destination file name
    #[serde(alias = "nome")]
    pub name: String,

    /// Base URL; only pages under this prefix are crawled
    #[serde(rename = "source-url", alias = "source_url", alias = "url_base")]
    pub source_url: String,

    /// Document id or folder id, depending on the sink mode
    #[serde(
        rename = "destination-id",
        alias = "destination_id",
        alias = "doc_id_destino",
        alias = "drive_file_id",
        alias = "drive_folder_id"
    )]
    pub destination_id: String,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_user_agent() -> String {
    format!("docs-mirror/{}", env!("CARGO_PKG_VERSION"))
}

fn default_sink_mode() -> SinkMode {
    SinkMode::DriveFolder
}

fn default_max_words() -> usize {
    DEFAULT_MAX_WORDS
}
