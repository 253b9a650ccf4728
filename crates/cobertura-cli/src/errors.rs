use console::style;
use std::fmt;
use std::path::Path;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Source directory missing; rebuilding would empty the category
pub fn source_dir_not_found(path: &Path) -> CliError {
    let current_dir = std::env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    CliError::new("Source directory not found")
        .with_context(format!(
            "The GeoJSON source directory does not exist.\n\nPath: {}\nCurrent directory: {}",
            path.display(),
            current_dir
        ))
        .with_suggestion("Run from the project root, where data/geojson lives")
        .with_suggestion("Or pass --source-dir <DIR>")
        .with_suggestion("Or set COBERTURA_SOURCE_DIR")
        .with_help("Run: cobertura index --help")
}

pub fn unknown_dataset(name: &str, known: &[&str]) -> CliError {
    CliError::new(format!("Unknown dataset: {}", name))
        .with_context(format!("Configured datasets: {}", known.join(", ")))
        .with_suggestion("Check the name against the [[datasets]] entries in cobertura.toml")
        .with_suggestion("Or omit --dataset to trim every dataset")
        .with_help("Run: cobertura inspect --show-config")
}

pub fn config_file_not_found(path: &Path) -> CliError {
    CliError::new("Configuration file not found")
        .with_context(format!("Path: {}", path.display()))
        .with_suggestion("Check the --config path")
        .with_suggestion("Or omit --config to use ./cobertura.toml when present")
}

pub fn invalid_config(message: &str) -> CliError {
    CliError::new("Invalid configuration")
        .with_context(message.to_string())
        .with_suggestion("Check cobertura.toml for syntax errors")
        .with_suggestion("Or remove the file to run with the built-in defaults")
        .with_help("Run: cobertura inspect --show-config")
}

/// The output could not be written
pub fn write_failed(path: &Path, error: &str) -> CliError {
    CliError::new(format!("Cannot write {}", path.display()))
        .with_context(format!("Error: {}", error))
        .with_suggestion("Check that the output directory is writable")
        .with_suggestion("Or choose another location with --output-dir / --index-path")
}
