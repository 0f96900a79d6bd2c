mod aggregate_tests;

use crate::conf::ClassifyConfig;
use crate::summary::{Classifier, Record, parse_line};
use std::sync::Arc;

/// Field values of one synthetic access log line.
#[derive(Clone)]
pub struct LineSpec {
    pub host: &'static str,
    pub addr: &'static str,
    pub user: &'static str,
    pub time: &'static str,
    pub request: &'static str,
    pub status: u16,
    pub bytes: u64,
    pub agent: &'static str,
    pub cache: &'static str,
    pub server: &'static str,
    pub request_time: &'static str,
    pub upstream: Option<&'static str>,
}

impl Default for LineSpec {
    fn default() -> Self {
        Self {
            host: "example.com",
            addr: "203.0.113.7",
            user: "-",
            time: "16/Oct/2026:10:00:00 +0000",
            request: "GET /index.php?p=1 HTTP/1.1",
            status: 200,
            bytes: 5120,
            agent: "Mozilla/5.0 (X11; Linux x86_64)",
            cache: "HIT",
            server: "example.com",
            request_time: "0.050",
            upstream: None,
        }
    }
}

impl LineSpec {
    pub fn render(&self) -> String {
        let mut line = format!(
            "{} {} - {} [{}] \"{}\" {} {} \"-\" \"{}\" {} \"{}\" {}",
            self.host,
            self.addr,
            self.user,
            self.time,
            self.request,
            self.status,
            self.bytes,
            self.agent,
            self.cache,
            self.server,
            self.request_time
        );
        if let Some(upstream) = self.upstream {
            line.push(' ');
            line.push_str(upstream);
        }
        line
    }

    pub fn record(&self) -> Record {
        parse_line(&self.render()).unwrap()
    }
}

pub fn default_classifier() -> Arc<Classifier> {
    Arc::new(Classifier::from_config(&ClassifyConfig::default()).unwrap())
}
