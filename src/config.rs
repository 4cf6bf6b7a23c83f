use secrecy::SecretString;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub generation_api_key: SecretString,
    pub generation_base_url: String,
    pub generation_model: String,
    pub generation_timeout_secs: u64,
    pub upload_dir: String,
    pub tesseract_bin: String,
    pub pdftotext_bin: String,
    pub web_server_host: String,
    pub web_server_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "quizforge-local".to_string()),
            generation_api_key: SecretString::from(
                env::var("GENERATION_API_KEY").unwrap_or_else(|_| "dev_api_key".to_string()),
            ),
            generation_base_url: env::var("GENERATION_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            generation_model: env::var("GENERATION_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            generation_timeout_secs: env::var("GENERATION_TIMEOUT_SECS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(120),
            upload_dir: env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string()),
            tesseract_bin: env::var("TESSERACT_BIN").unwrap_or_else(|_| "tesseract".to_string()),
            pdftotext_bin: env::var("PDFTOTEXT_BIN").unwrap_or_else(|_| "pdftotext".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }

    /// Validate that production-critical configuration is set
    /// Panics if required secrets are using default values
    pub fn validate_for_production(&self) {
        use secrecy::ExposeSecret;

        if self.generation_api_key.expose_secret() == "dev_api_key" {
            panic!(
                "FATAL: GENERATION_API_KEY is using default value! Set GENERATION_API_KEY environment variable."
            );
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "quizforge-test".to_string(),
            generation_api_key: SecretString::from("test_api_key".to_string()),
            generation_base_url: "https://api.openai.com/v1".to_string(),
            generation_model: "gpt-4o-mini".to_string(),
            generation_timeout_secs: 5,
            upload_dir: "uploads-test".to_string(),
            tesseract_bin: "tesseract".to_string(),
            pdftotext_bin: "pdftotext".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
        }
    }
}
