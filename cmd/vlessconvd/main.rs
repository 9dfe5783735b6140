use clap::Parser;
use env_logger::Env;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use tiny_http::{Header, Method, Response, Server, StatusCode};

use vlessconv::batch::translate_all;
use vlessconv::settings::{load_settings, validate_settings};
use vlessconv::telemetry::Telemetry;
use vlessconv::translate::translate;

/// Local HTTP front for the vless link translator
#[derive(Parser, Debug)]
#[command(name = "vlessconvd", version, about, long_about = None)]
struct Args {
    /// Settings file (YAML)
    #[arg(long, value_name = "FILE")]
    config: Option<String>,

    /// Listen address, overrides the settings file
    #[arg(long, value_name = "ADDR")]
    bind: Option<String>,

    /// Log level, overrides the settings file
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConvertRequest {
    link: String,
}

#[derive(Debug, Deserialize)]
struct BatchRequest {
    links_text: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    ok: bool,
    error: String,
}

fn main() {
    let args = Args::parse();

    let mut settings = match load_settings(args.config.as_deref()) {
        Ok(s) => s,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };
    if let Some(bind) = args.bind {
        settings.bind = bind;
    }
    if let Some(level) = args.log_level {
        settings.log_level = level;
    }
    if let Err(err) = validate_settings(&settings) {
        eprintln!("{}", err);
        std::process::exit(1);
    }

    env_logger::init_from_env(Env::default().default_filter_or(settings.log_level.clone()));

    let server = match Server::http(&settings.bind) {
        Ok(s) => s,
        Err(err) => {
            error!("failed to bind {}: {}", settings.bind, err);
            std::process::exit(1);
        }
    };
    info!("vlessconvd listening on http://{}", settings.bind);

    let telemetry = Telemetry::new();

    for mut request in server.incoming_requests() {
        let method = request.method().clone();
        let url = request.url().to_string();

        let mut body = String::new();
        if method == Method::Post && request.as_reader().read_to_string(&mut body).is_err() {
            let _ = request.respond(json_response(400, &error_body("failed to read request")));
            continue;
        }

        let (status, payload) = route(&method, &url, &body, &telemetry);
        if status >= 400 {
            warn!("{} {} -> {}", method, url, status);
        } else {
            info!("{} {} -> {}", method, url, status);
        }
        let _ = request.respond(json_response(status, &payload));
    }
}

fn route(method: &Method, url: &str, body: &str, telemetry: &Telemetry) -> (u16, String) {
    let path = url.split('?').next().unwrap_or("");
    match (method, path) {
        (Method::Get, "/health") => (200, r#"{"ok":true}"#.to_string()),
        (Method::Get, "/api/telemetry") => (200, to_json(&telemetry.snapshot())),
        (Method::Post, "/api/convert") => match serde_json::from_str::<ConvertRequest>(body) {
            Ok(req) => {
                let result = translate(req.link.trim());
                telemetry.record(&result);
                (200, to_json(&result))
            }
            Err(err) => (400, error_body(&format!("invalid json: {}", err))),
        },
        (Method::Post, "/api/batch") => match serde_json::from_str::<BatchRequest>(body) {
            Ok(req) => {
                let results = translate_all(&req.links_text);
                for result in &results {
                    telemetry.record(result);
                }
                (200, to_json(&results))
            }
            Err(err) => (400, error_body(&format!("invalid json: {}", err))),
        },
        _ => (404, error_body("not found")),
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "{}".to_string())
}

fn error_body(message: &str) -> String {
    to_json(&ErrorResponse {
        ok: false,
        error: message.to_string(),
    })
}

fn json_response(status: u16, body: &str) -> Response<std::io::Cursor<Vec<u8>>> {
    Response::from_string(body)
        .with_header(json_header())
        .with_status_code(StatusCode(status))
}

fn json_header() -> Header {
    Header::from_bytes(&b"Content-Type"[..], &b"application/json; charset=utf-8"[..])
        .expect("static content-type header")
}
