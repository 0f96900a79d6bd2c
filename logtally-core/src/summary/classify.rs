use crate::conf::{ClassifyConfig, ConfigError};
use crate::summary::constants::CACHE_NONE_LABELS;
use crate::summary::types::Record;
use ipnet::IpNet;
use smallvec::SmallVec;
use std::fmt;
use std::net::IpAddr;

//-----------------------------------------------------------------------------
// Labels
//-----------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheClass {
    None,
    Hit,
    Miss,
    Other,
}

impl CacheClass {
    pub const ALL: [CacheClass; 4] = [Self::None, Self::Hit, Self::Miss, Self::Other];

    /// Cache labels are an open set: anything unknown lands in `Other`.
    pub fn from_label(label: &str) -> Self {
        match label {
            "HIT" => Self::Hit,
            "MISS" => Self::Miss,
            l if CACHE_NONE_LABELS.contains(&l) => Self::None,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusClass {
    Success,
    Redirection,
    ClientError,
    ServerError,
}

impl StatusClass {
    pub const ALL: [StatusClass; 4] = [
        Self::Success,
        Self::Redirection,
        Self::ClientError,
        Self::ServerError,
    ];

    /// `None` for 1xx, which has no bucket of its own.
    pub fn from_status(status: u16) -> Option<Self> {
        match status / 100 {
            2 => Some(Self::Success),
            3 => Some(Self::Redirection),
            4 => Some(Self::ClientError),
            5 => Some(Self::ServerError),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentClass {
    Dynamic,
    Static,
}

/// Every bucket a record can be folded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BucketKey {
    Total,
    Cache(CacheClass),
    Status(StatusClass),
    /// A configured status code, matched against final or upstream status.
    Code(u16),
    Internal,
    DynamicCached,
    DynamicUncached,
    Static,
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BucketKey::Total => f.write_str("total"),
            BucketKey::Cache(CacheClass::None) => f.write_str("cache_none"),
            BucketKey::Cache(CacheClass::Hit) => f.write_str("cache_hit"),
            BucketKey::Cache(CacheClass::Miss) => f.write_str("cache_miss"),
            BucketKey::Cache(CacheClass::Other) => f.write_str("cache_other"),
            BucketKey::Status(StatusClass::Success) => f.write_str("2xx"),
            BucketKey::Status(StatusClass::Redirection) => f.write_str("3xx"),
            BucketKey::Status(StatusClass::ClientError) => f.write_str("4xx"),
            BucketKey::Status(StatusClass::ServerError) => f.write_str("5xx"),
            BucketKey::Code(code) => write!(f, "{code}"),
            BucketKey::Internal => f.write_str("internal"),
            BucketKey::DynamicCached => f.write_str("dynamic_cached"),
            BucketKey::DynamicUncached => f.write_str("dynamic_uncached"),
            BucketKey::Static => f.write_str("static"),
        }
    }
}

//-----------------------------------------------------------------------------
// Origin
//-----------------------------------------------------------------------------

/// Decides whether a request came from inside the operator's own network.
pub trait OriginPredicate: Send + Sync {
    fn is_internal(&self, record: &Record) -> bool;
}

/// Internal when the client address sits in one of `networks`, or the user
/// agent contains one of `user_agent_markers`.
#[derive(Debug, Clone, Default)]
pub struct NetworkOrigin {
    networks: Vec<IpNet>,
    user_agent_markers: Vec<String>,
}

impl NetworkOrigin {
    pub fn new(networks: Vec<IpNet>, user_agent_markers: Vec<String>) -> Self {
        Self {
            networks,
            user_agent_markers,
        }
    }
}

impl OriginPredicate for NetworkOrigin {
    fn is_internal(&self, record: &Record) -> bool {
        let in_network = record
            .remote_addr
            .parse::<IpAddr>()
            .is_ok_and(|ip| self.networks.iter().any(|net| net.contains(&ip)));

        in_network
            || self
                .user_agent_markers
                .iter()
                .any(|marker| record.user_agent.contains(marker.as_str()))
    }
}

impl<F> OriginPredicate for F
where
    F: Fn(&Record) -> bool + Send + Sync,
{
    fn is_internal(&self, record: &Record) -> bool {
        self(record)
    }
}

//-----------------------------------------------------------------------------
// Classifier
//-----------------------------------------------------------------------------

pub type BucketKeys = SmallVec<[BucketKey; 8]>;

/// Maps a record to the buckets it belongs to. Pure: the same record always
/// yields the same keys, and every record yields at least `Total`.
pub struct Classifier {
    status_codes: Vec<u16>,
    static_extensions: Vec<String>,
    origin: Box<dyn OriginPredicate>,
}

impl Classifier {
    pub fn new(
        status_codes: Vec<u16>,
        static_extensions: Vec<String>,
        origin: Box<dyn OriginPredicate>,
    ) -> Self {
        let static_extensions = static_extensions
            .into_iter()
            .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
            .collect();

        // A record joins each code bucket at most once.
        let mut codes: Vec<u16> = Vec::with_capacity(status_codes.len());
        for code in status_codes {
            if !codes.contains(&code) {
                codes.push(code);
            }
        }

        Self {
            status_codes: codes,
            static_extensions,
            origin,
        }
    }

    /// Build the default network/user-agent origin predicate from config.
    pub fn from_config(cfg: &ClassifyConfig) -> Result<Self, ConfigError> {
        let networks = cfg
            .internal_networks
            .iter()
            .map(|network| {
                network
                    .parse::<IpNet>()
                    .map_err(|source| ConfigError::InvalidNetwork {
                        network: network.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let origin = NetworkOrigin::new(networks, cfg.internal_user_agents.clone());

        Ok(Self::new(
            cfg.status_codes.clone(),
            cfg.static_extensions.clone(),
            Box::new(origin),
        ))
    }

    pub fn status_codes(&self) -> &[u16] {
        &self.status_codes
    }

    pub fn classify(&self, record: &Record) -> BucketKeys {
        let mut keys = BucketKeys::new();
        keys.push(BucketKey::Total);

        let cache = CacheClass::from_label(&record.cache_status);
        keys.push(BucketKey::Cache(cache));

        if let Some(class) = StatusClass::from_status(record.status) {
            keys.push(BucketKey::Status(class));
        }

        for &code in &self.status_codes {
            if record.status == code || record.upstream_status.contains(&code) {
                keys.push(BucketKey::Code(code));
            }
        }

        if self.origin.is_internal(record) {
            keys.push(BucketKey::Internal);
        }

        keys.push(match (self.content_class(record), cache) {
            (ContentClass::Static, _) => BucketKey::Static,
            (ContentClass::Dynamic, CacheClass::Hit) => BucketKey::DynamicCached,
            (ContentClass::Dynamic, _) => BucketKey::DynamicUncached,
        });

        keys
    }

    pub fn content_class(&self, record: &Record) -> ContentClass {
        let path = record.path();
        let file = path.rsplit('/').next().unwrap_or(path);

        let is_static = file.rsplit_once('.').is_some_and(|(_, ext)| {
            self.static_extensions
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        });

        if is_static {
            ContentClass::Static
        } else {
            ContentClass::Dynamic
        }
    }
}
