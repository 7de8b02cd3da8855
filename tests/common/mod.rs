//! Shared helpers: an in-process fake upstream and a log capture writer.

#![allow(dead_code)]

use axum::http::{header::CONTENT_TYPE, StatusCode, Uri};
use axum::Router;
use serde_json::{json, Value};
use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::fmt::MakeWriter;

pub struct Reply {
    pub status: StatusCode,
    pub body: String,
    pub delay: Option<Duration>,
}

impl Reply {
    pub fn json(body: Value) -> Self {
        Self::raw(StatusCode::OK, body.to_string())
    }

    pub fn status(status: StatusCode) -> Self {
        Self::raw(status, json!({ "error": status.to_string() }).to_string())
    }

    pub fn raw(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// A request seen by the fake upstream.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub path: String,
    pub query: Vec<(String, String)>,
}

impl Recorded {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

pub struct FakeUpstream {
    pub base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeUpstream {
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

/// Serves every path through `respond` on an ephemeral local port.
pub async fn spawn_upstream<F>(respond: F) -> FakeUpstream
where
    F: Fn(&Recorded) -> Reply + Send + Sync + 'static,
{
    let requests = Arc::new(Mutex::new(Vec::new()));
    let respond = Arc::new(respond);

    let log = requests.clone();
    let app = Router::new().fallback(move |uri: Uri| {
        let log = log.clone();
        let respond = respond.clone();
        async move {
            let recorded = record(&uri);
            log.lock().unwrap().push(recorded.clone());
            let reply = respond(&recorded);
            if let Some(delay) = reply.delay {
                tokio::time::sleep(delay).await;
            }
            (reply.status, [(CONTENT_TYPE, "application/json")], reply.body)
        }
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeUpstream {
        base_url: format!("http://{}", addr),
        requests,
    }
}

fn record(uri: &Uri) -> Recorded {
    let url = reqwest::Url::parse(&format!("http://upstream{}", uri)).unwrap();
    Recorded {
        path: url.path().to_string(),
        query: url
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect(),
    }
}

pub fn country(common: &str, cca3: &str, capital: Option<&str>, region: &str) -> Value {
    json!({
        "name": { "common": common, "official": common },
        "capital": capital.map(|c| vec![c]),
        "region": region,
        "population": 1_000_000,
        "flags": { "png": format!("https://flagcdn.com/w320/{}.png", cca3.to_lowercase()) },
        "cca3": cca3
    })
}

pub fn place(xid: &str, name: &str, lat: f64, lon: f64) -> Value {
    json!({
        "xid": xid,
        "name": name,
        "rate": 3,
        "kinds": "cultural,historic",
        "dist": 120.5,
        "point": { "lon": lon, "lat": lat }
    })
}

pub fn places_envelope(places: Vec<Value>) -> Value {
    json!({ "type": "FeatureCollection", "features": places })
}

#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    pub fn count(&self, needle: &str) -> usize {
        self.contents().matches(needle).count()
    }
}

impl Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Routes this thread's log events into a buffer until the guard drops.
pub fn capture_logs() -> (CapturedLogs, DefaultGuard) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (logs, guard)
}
