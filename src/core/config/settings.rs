use std::path::PathBuf;

use time::UtcOffset;

use super::parsing::{
    env_optional, env_or_default, parse_bool, parse_cors_origins, parse_environment,
    parse_utc_offset,
};
use super::types::{
    ApiSettings, ConfigError, CorpusSettings, CorsSettings, DisplaySettings, RuntimeSettings,
    ServerHost, ServerPort, ServerSettings, Settings, TelemetrySettings,
};

const DEFAULT_SUBMISSIONS_PATH: &str = "data/submissions.json";
const DEFAULT_QUIZZES_PATH: &str = "data/quizzes.json";

impl Settings {
    pub(crate) fn load() -> Result<Self, ConfigError> {
        let host = env_or_default("QUIZBOARD_HOST", "0.0.0.0");
        let port = env_or_default("QUIZBOARD_PORT", "8000");

        let environment = parse_environment(
            env_optional("QUIZBOARD_ENV").or_else(|| env_optional("ENVIRONMENT")),
        );

        let project_name = env_or_default("PROJECT_NAME", "Quizboard API");
        let version = env_or_default("VERSION", env!("CARGO_PKG_VERSION"));
        let api_v1_str = env_or_default("API_V1_STR", "/api/v1");

        let cors_origins = parse_cors_origins(env_optional("BACKEND_CORS_ORIGINS"))?;

        let submissions_path = env_optional("QUIZBOARD_SUBMISSIONS_PATH");
        let quizzes_path = env_optional("QUIZBOARD_QUIZZES_PATH");
        let explicit = submissions_path.is_some() && quizzes_path.is_some();

        let utc_offset = parse_utc_offset(
            "QUIZBOARD_DISPLAY_UTC_OFFSET",
            env_or_default("QUIZBOARD_DISPLAY_UTC_OFFSET", "+00:00"),
        )?;

        let log_level = env_or_default("QUIZBOARD_LOG_LEVEL", "info");
        let json = env_optional("QUIZBOARD_LOG_JSON").map(|value| parse_bool(&value)).unwrap_or(false);
        let prometheus_enabled =
            env_optional("PROMETHEUS_ENABLED").map(|value| parse_bool(&value)).unwrap_or(false);

        let settings = Self {
            server: ServerSettings { host: ServerHost::parse(host)?, port: ServerPort::parse(port)? },
            runtime: RuntimeSettings { environment },
            api: ApiSettings { project_name, version, api_v1_str },
            cors: CorsSettings { origins: cors_origins },
            corpus: CorpusSettings {
                submissions_path: PathBuf::from(
                    submissions_path.unwrap_or_else(|| DEFAULT_SUBMISSIONS_PATH.to_string()),
                ),
                quizzes_path: PathBuf::from(
                    quizzes_path.unwrap_or_else(|| DEFAULT_QUIZZES_PATH.to_string()),
                ),
                explicit,
            },
            display: DisplaySettings { utc_offset },
            telemetry: TelemetrySettings { log_level, json, prometheus_enabled },
        };

        settings.validate()?;

        Ok(settings)
    }

    pub(crate) fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host.0, self.server.port.0)
    }

    pub(crate) fn server_host(&self) -> &str {
        &self.server.host.0
    }

    pub(crate) fn server_port(&self) -> u16 {
        self.server.port.0
    }

    pub(crate) fn api(&self) -> &ApiSettings {
        &self.api
    }

    pub(crate) fn cors(&self) -> &CorsSettings {
        &self.cors
    }

    pub(crate) fn corpus(&self) -> &CorpusSettings {
        &self.corpus
    }

    pub(crate) fn display_offset(&self) -> UtcOffset {
        self.display.utc_offset
    }

    pub(crate) fn telemetry(&self) -> &TelemetrySettings {
        &self.telemetry
    }

    pub(crate) fn runtime(&self) -> &RuntimeSettings {
        &self.runtime
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !self.runtime.environment.is_production() {
            return Ok(());
        }

        if !self.corpus.explicit {
            return Err(ConfigError::MissingSetting(
                "QUIZBOARD_SUBMISSIONS_PATH/QUIZBOARD_QUIZZES_PATH",
            ));
        }

        Ok(())
    }

    #[cfg(test)]
    pub(crate) fn for_tests() -> Self {
        Self {
            server: ServerSettings {
                host: ServerHost("127.0.0.1".to_string()),
                port: ServerPort(8000),
            },
            runtime: RuntimeSettings { environment: super::types::Environment::Test },
            api: ApiSettings {
                project_name: "Quizboard API".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                api_v1_str: "/api/v1".to_string(),
            },
            cors: CorsSettings { origins: vec!["http://localhost:5173".to_string()] },
            corpus: CorpusSettings {
                submissions_path: PathBuf::from(DEFAULT_SUBMISSIONS_PATH),
                quizzes_path: PathBuf::from(DEFAULT_QUIZZES_PATH),
                explicit: false,
            },
            display: DisplaySettings { utc_offset: UtcOffset::UTC },
            telemetry: TelemetrySettings {
                log_level: "error".to_string(),
                json: false,
                prometheus_enabled: false,
            },
        }
    }

    #[cfg(test)]
    pub(crate) fn with_corpus_paths(mut self, submissions: PathBuf, quizzes: PathBuf) -> Self {
        self.corpus.submissions_path = submissions;
        self.corpus.quizzes_path = quizzes;
        self.corpus.explicit = true;
        self
    }

    #[cfg(test)]
    pub(crate) fn with_prometheus_enabled(mut self) -> Self {
        self.telemetry.prometheus_enabled = true;
        self
    }
}
