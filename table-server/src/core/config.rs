/// 服务器配置 - 点餐服务的所有配置项
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/table-server | 工作目录 (数据库、日志) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | SMS_API_URL | (未设置) | 短信服务商接口地址 |
/// | SMS_API_KEY | (未设置) | 短信服务商密钥 |
/// | SMS_SENDER_ID | (未设置) | 短信签名/发送方标识 |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/table-server HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库和日志文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 运行环境: development | staging | production
    pub environment: String,

    // === 短信网关配置 ===
    /// 短信服务商接口地址 (未设置时使用控制台网关)
    pub sms_api_url: Option<String>,
    /// 短信服务商密钥
    pub sms_api_key: Option<String>,
    /// 短信签名/发送方标识
    pub sms_sender_id: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR")
                .unwrap_or_else(|_| "/var/lib/table-server".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            sms_api_url: std::env::var("SMS_API_URL").ok().filter(|v| !v.is_empty()),
            sms_api_key: std::env::var("SMS_API_KEY").ok().filter(|v| !v.is_empty()),
            sms_sender_id: std::env::var("SMS_SENDER_ID")
                .ok()
                .filter(|v| !v.is_empty()),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 数据库目录 (work_dir/database)
    pub fn database_dir(&self) -> std::path::PathBuf {
        std::path::PathBuf::from(&self.work_dir).join("database")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
