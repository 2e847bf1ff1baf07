// Configuration
// Selects which database the store opens. Only main.rs reads the process environment.

use std::path::PathBuf;

use directories::ProjectDirs;

/// Environment variable selecting the target database ("test" or anything else).
pub const ENV_VAR: &str = "EXPENSES_ENV";

/// Environment variable overriding the database file path.
pub const DB_PATH_VAR: &str = "EXPENSES_DB";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Production,
    Test,
}

impl Environment {
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("test") {
            Environment::Test
        } else {
            Environment::Production
        }
    }

    pub fn database_file(&self) -> &'static str {
        match self {
            Environment::Production => "expense.db",
            Environment::Test => "expenses_test.db",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub environment: Environment,
    /// Explicit database path; wins over the environment's default file.
    pub database_path: Option<PathBuf>,
}

impl Config {
    pub fn new(environment: Environment) -> Self {
        Config {
            environment,
            database_path: None,
        }
    }

    /// Builder: pin the database to a specific file
    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = Some(path.into());
        self
    }

    /// Build a config from `EXPENSES_ENV` and `EXPENSES_DB`.
    pub fn from_env() -> Self {
        let environment = std::env::var(ENV_VAR)
            .map(|v| Environment::parse(&v))
            .unwrap_or_default();
        let database_path = std::env::var_os(DB_PATH_VAR)
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        Config {
            environment,
            database_path,
        }
    }

    /// Resolved database file.
    ///
    /// Order: explicit path, then the platform data directory
    /// (e.g. `~/.local/share/expense-tracker/`), then the working directory.
    pub fn database_path(&self) -> PathBuf {
        if let Some(path) = &self.database_path {
            return path.clone();
        }

        let file = self.environment.database_file();
        match ProjectDirs::from("", "", "expense-tracker") {
            Some(dirs) => dirs.data_dir().join(file),
            None => PathBuf::from(file),
        }
    }
}
