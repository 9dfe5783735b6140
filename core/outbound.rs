use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::link::ParsedLink;
use crate::params::ParameterSet;

pub const PROTOCOL: &str = "vless";
pub const DEFAULT_NETWORK: &str = "tcp";
pub const DEFAULT_ENCRYPTION: &str = "none";
pub const FALLBACK_TAG_PREFIX: &str = "out_";

/// Client configuration document: no inbounds, one vless outbound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub inbounds: Vec<Value>,
    pub outbounds: Vec<Outbound>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outbound {
    pub protocol: String,
    pub settings: Value,
    #[serde(rename = "streamSettings")]
    pub stream_settings: Value,
    pub tag: String,
}

impl ClientConfig {
    pub fn outbound(&self) -> Option<&Outbound> {
        self.outbounds.first()
    }
}

/// Transport selected by the `type` parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transport {
    Tcp {
        header_type: Option<String>,
    },
    Ws {
        path: String,
        host: Option<String>,
    },
    Grpc {
        service_name: String,
        multi_mode: bool,
        host: Option<String>,
    },
    /// Unrecognised network names are passed through untouched.
    Other(String),
}

impl Transport {
    pub fn from_params(params: &ParameterSet) -> Self {
        let owned = |name: &str| params.value(name).map(str::to_string);
        match params.value("type").unwrap_or(DEFAULT_NETWORK) {
            "tcp" => Transport::Tcp {
                header_type: owned("headerType"),
            },
            "ws" => Transport::Ws {
                path: owned("path").unwrap_or_default(),
                host: owned("host"),
            },
            "grpc" => Transport::Grpc {
                service_name: owned("serviceName").unwrap_or_default(),
                multi_mode: params.value("mode") == Some("multi"),
                host: owned("host"),
            },
            other => Transport::Other(other.to_string()),
        }
    }

    pub fn network(&self) -> &str {
        match self {
            Transport::Tcp { .. } => "tcp",
            Transport::Ws { .. } => "ws",
            Transport::Grpc { .. } => "grpc",
            Transport::Other(name) => name.as_str(),
        }
    }

    pub fn stream_settings(&self) -> Value {
        let mut settings = json!({ "network": self.network() });
        match self {
            Transport::Tcp {
                header_type: Some(kind),
            } => {
                settings["tcpSettings"] = json!({ "header": { "type": kind } });
            }
            Transport::Tcp { header_type: None } | Transport::Other(_) => {}
            Transport::Ws { path, host } => {
                settings["wsSettings"] = json!({
                    "path": path,
                    "headers": host_headers(host.as_deref()),
                });
            }
            Transport::Grpc {
                service_name,
                multi_mode,
                host,
            } => {
                settings["grpcSettings"] = json!({
                    "serviceName": service_name,
                    "multiMode": multi_mode,
                    "headers": host_headers(host.as_deref()),
                });
            }
        }
        settings
    }
}

fn host_headers(host: Option<&str>) -> Value {
    let mut headers = Map::new();
    if let Some(host) = host {
        headers.insert("Host".to_string(), json!(host));
    }
    Value::Object(headers)
}

/// Removes every object key whose value is `null`, recursively.
pub fn prune_absent(value: &mut Value) {
    match value {
        Value::Object(map) => {
            map.retain(|_, v| !v.is_null());
            for v in map.values_mut() {
                prune_absent(v);
            }
        }
        Value::Array(items) => {
            for v in items.iter_mut() {
                prune_absent(v);
            }
        }
        _ => {}
    }
}

pub fn display_tag(link: &ParsedLink) -> String {
    match link.label.as_deref() {
        Some(label) if !label.is_empty() => label.to_string(),
        _ => format!("{}{}", FALLBACK_TAG_PREFIX, link.host),
    }
}

pub fn build_config(link: &ParsedLink, params: &ParameterSet) -> ClientConfig {
    let mut user = json!({
        "id": link.id,
        "encryption": params.value("security").unwrap_or(DEFAULT_ENCRYPTION),
        "flow": params.value("flow"),
    });
    prune_absent(&mut user);

    let settings = json!({
        "vnext": [{
            "address": link.host,
            "port": link.port,
            "users": [user],
        }]
    });

    let transport = Transport::from_params(params);

    ClientConfig {
        inbounds: Vec::new(),
        outbounds: vec![Outbound {
            protocol: PROTOCOL.to_string(),
            settings,
            stream_settings: transport.stream_settings(),
            tag: display_tag(link),
        }],
    }
}
