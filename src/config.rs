use std::net::SocketAddr;
use std::path::PathBuf;

/// Process-wide configuration, loaded once in `main` and handed to the
/// router as an axum `Extension`. Handlers never read the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Socket address the HTTP server binds to.
    pub listen_addr: SocketAddr,
    /// Database connection string (Postgres in deployment, SQLite in tests).
    pub database_url: String,
    /// Directory uploaded photos are written into and served back from.
    pub upload_dir: PathBuf,
    /// Hard cap on a single request body (photos included).
    pub max_upload_bytes: usize,
    /// Shared token for the WeChat URL-ownership handshake. `None` means
    /// the handshake endpoint answers with a configuration error.
    pub wechat_token: Option<String>,
    /// Browser-side map keys passed through to the page templates.
    pub tencent_map_api_key: Option<String>,
    pub baidu_map_ak: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, std::net::AddrParseError> {
        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8000".to_string())
            .parse()?;

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://pawtrace.db?mode=rwc".to_string());

        let upload_dir = std::env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("static/uploads"));

        let max_upload_bytes = std::env::var("MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(16 * 1024 * 1024);

        Ok(Self {
            listen_addr,
            database_url,
            upload_dir,
            max_upload_bytes,
            wechat_token: non_empty_var("WECHAT_TOKEN"),
            tencent_map_api_key: non_empty_var("TENCENT_MAP_API_KEY"),
            baidu_map_ak: non_empty_var("BAIDU_MAP_AK"),
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
