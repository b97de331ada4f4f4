use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub console: ConsoleConfig,
    #[serde(default)]
    pub prompts: PromptConfig,
    #[serde(default)]
    pub worker: WorkerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Input framing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Columns added by one indentation level (default: 4).
    #[serde(default = "default_indent_size")]
    pub indent_size: usize,
    /// Distance between tab stops (default: 8).
    #[serde(default = "default_tab_size")]
    pub tab_size: usize,
    /// Fill auto-indent with tabs where possible (default: false).
    #[serde(default)]
    pub use_tabs: bool,
    /// Number of executed commands kept in history (default: 500).
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

/// Prompt text per prompt state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptConfig {
    #[serde(default = "default_ordinary_prompt")]
    pub ordinary: String,
    #[serde(default = "default_continuation_prompt")]
    pub continuation: String,
    #[serde(default)]
    pub executing: String,
    #[serde(default = "default_input_prompt")]
    pub input: String,
    #[serde(default = "default_paging_prompt")]
    pub paging: String,
    #[serde(default = "default_help_prompt")]
    pub help: String,
}

/// Interpreter worker process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Executable to spawn (e.g., "python3").
    #[serde(default = "default_worker_command")]
    pub command: String,
    /// Arguments passed to the worker.
    #[serde(default = "default_worker_args")]
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is not set (e.g., "info", "replframe=debug").
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_indent_size() -> usize {
    4
}

fn default_tab_size() -> usize {
    8
}

fn default_history_size() -> usize {
    500
}

fn default_ordinary_prompt() -> String {
    ">>> ".to_string()
}

fn default_continuation_prompt() -> String {
    "... ".to_string()
}

fn default_input_prompt() -> String {
    ">? ".to_string()
}

fn default_paging_prompt() -> String {
    "--More-- ".to_string()
}

fn default_help_prompt() -> String {
    "help> ".to_string()
}

fn default_worker_command() -> String {
    "python3".to_string()
}

fn default_worker_args() -> Vec<String> {
    vec!["-m".to_string(), "replframe_worker".to_string()]
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            indent_size: default_indent_size(),
            tab_size: default_tab_size(),
            use_tabs: false,
            history_size: default_history_size(),
        }
    }
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            ordinary: default_ordinary_prompt(),
            continuation: default_continuation_prompt(),
            executing: String::new(),
            input: default_input_prompt(),
            paging: default_paging_prompt(),
            help: default_help_prompt(),
        }
    }
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            command: default_worker_command(),
            args: default_worker_args(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
