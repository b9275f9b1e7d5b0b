use serde::Serialize;

pub const NATIVE_API_URL: &str = "https://puce.estudioika.com/api/examen.php";
pub const WEB_API_PATH: &str = "/ika/examen.php";
pub const DEFAULT_WEB_ORIGIN: &str = "http://localhost:5173";

/// Where the client is running. Packaged builds talk to the absolute HTTPS
/// endpoint; the web build goes through the dev server's relative path.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum Platform {
    #[default]
    Native,
    Web,
}

impl Platform {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "native" | "nativo" => Some(Platform::Native),
            "web" => Some(Platform::Web),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    pub platform: Platform,
    pub native_url: String,
    pub web_origin: String,
    pub web_path: String,
    /// Replaces the platform endpoint entirely when set.
    pub api_url_override: Option<String>,
    pub debug: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            platform: Platform::default(),
            native_url: NATIVE_API_URL.into(),
            web_origin: DEFAULT_WEB_ORIGIN.into(),
            web_path: WEB_API_PATH.into(),
            api_url_override: None,
            debug: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(platform) = lookup("ASISTENCIAS_PLATFORM").as_deref().and_then(Platform::parse) {
            config.platform = platform;
        }
        if let Some(origin) = lookup("ASISTENCIAS_WEB_ORIGIN").filter(|v| !v.trim().is_empty()) {
            config.web_origin = origin.trim_end_matches('/').to_string();
        }
        config.api_url_override = lookup("ASISTENCIAS_API_URL").filter(|v| !v.trim().is_empty());
        config.debug = lookup("ASISTENCIAS_DEBUG")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        config
    }

    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            api_url_override: Some(endpoint.into()),
            ..Self::default()
        }
    }

    /// Default log filter; `ASISTENCIAS_DEBUG` surfaces the `log_debug!` chatter.
    pub fn log_level(&self) -> log::LevelFilter {
        if self.debug {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        }
    }

    /// Absolute URL of the shared attendance endpoint.
    pub fn endpoint(&self) -> String {
        if let Some(url) = &self.api_url_override {
            return url.clone();
        }
        match self.platform {
            Platform::Native => self.native_url.clone(),
            Platform::Web => format!("{}{}", self.web_origin, self.web_path),
        }
    }
}
