//! Minimal HTTP query endpoint: `POST /query` with a JSON body
//! `{ "query_str": "...", "limit": 10, "offset": 0 }`, returning
//! `{ "documents": [doc_id, ...] }`. Always answers 200, even for a query
//! that matches nothing.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Read;
use std::sync::Arc;

use crate::config::Config;
use crate::reader::IndexReader;
use crate::tokenizer::Tokenizer;
use crate::scorer::Scorer;

#[derive(Debug, Deserialize)]
struct QueryRequest {
    query_str: String,
    #[serde(default = "default_limit")]
    limit: usize,
    #[serde(default)]
    offset: usize,
}

fn default_limit() -> usize {
    10
}

#[derive(Debug, Serialize)]
struct QueryResponse {
    documents: Vec<u32>,
}

/// Immutable state shared across request threads: the lexicon and
/// document-length table loaded once, with the postings file opened fresh
/// per lookup.
pub struct ReaderState {
    pub reader: IndexReader,
    pub doc_lengths: HashMap<u32, f64>,
    pub tokenizer: Tokenizer,
}

/// Start the server and block forever, handling requests on a small fixed
/// pool of worker threads.
pub fn serve(state: Arc<ReaderState>, config: &Config, port: u16) -> std::io::Result<()> {
    let server = tiny_http::Server::http(("0.0.0.0", port))
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    tracing::info!(port, dataset = %config.dataset_name, "query server listening");

    let server = Arc::new(server);
    let mut handles = Vec::new();
    for _ in 0..4 {
        let server = Arc::clone(&server);
        let state = Arc::clone(&state);
        handles.push(std::thread::spawn(move || worker_loop(&server, &state)));
    }
    for handle in handles {
        let _ = handle.join();
    }
    Ok(())
}

fn worker_loop(server: &tiny_http::Server, state: &ReaderState) {
    loop {
        let request = match server.recv() {
            Ok(r) => r,
            Err(e) => {
                tracing::info!(error = %e, "query server shutting down");
                return;
            }
        };
        handle_request(request, state);
    }
}

fn handle_request(mut request: tiny_http::Request, state: &ReaderState) {
    let mut body = String::new();
    if let Err(e) = request.as_reader().read_to_string(&mut body) {
        tracing::info!(error = %e, "failed to read query body");
        let _ = request.respond(tiny_http::Response::from_string(
            r#"{"documents":[]}"#,
        ));
        return;
    }

    let parsed: Result<QueryRequest, _> = serde_json::from_str(&body);
    let documents = match parsed {
        Ok(req) => {
            let scorer = Scorer::new(&state.reader, &state.doc_lengths, &state.tokenizer);
            scorer
                .query(&req.query_str, req.limit, req.offset)
                .map(|docs| docs.into_iter().map(|d| d.0).collect())
                .unwrap_or_default()
        }
        Err(e) => {
            tracing::info!(error = %e, "malformed query body");
            Vec::new()
        }
    };

    let response = QueryResponse { documents };
    let body = serde_json::to_string(&response).unwrap_or_else(|_| r#"{"documents":[]}"#.to_string());
    let _ = request.respond(tiny_http::Response::from_string(body));
}
