/// nginx `$time_local`, e.g. `16/Oct/2026:10:00:00 +0000`.
pub const TIME_LOCAL_FORMAT: &str = "%d/%b/%Y:%H:%M:%S %z";

/// Breadth of every top-N table in the reference output.
pub const DEFAULT_TOP_N: usize = 9;

pub const DEFAULT_STATUS_CODES: &[u16] = &[503];

pub const DEFAULT_INTERNAL_NETWORKS: &[&str] = &[
    "127.0.0.0/8",
    "10.0.0.0/8",
    "172.16.0.0/12",
    "192.168.0.0/16",
    "169.254.0.0/16",
    "::1/128",
    "fc00::/7",
    "fe80::/10",
];

/// Monitoring agents that identify themselves in the user agent.
pub const DEFAULT_INTERNAL_USER_AGENTS: &[&str] = &["Zabbix", "SWD"];

pub const DEFAULT_STATIC_EXTENSIONS: &[&str] = &[
    "css", "js", "map", "png", "jpg", "jpeg", "gif", "webp", "avif", "svg", "ico", "bmp", "woff",
    "woff2", "ttf", "otf", "eot", "mp3", "mp4", "webm", "ogg", "pdf", "zip", "gz", "txt", "xml",
];

/// Cache labels meaning the request never went through the cache.
pub const CACHE_NONE_LABELS: &[&str] = &["-", "BYPASS"];
