//! Online dictionary lookup
//!
//! Asks a public dictionary API whether a word is real English. The
//! HTTP call runs on a dedicated worker thread so the UI loop and the
//! turn timer never block on the network; requests and verdicts travel
//! over mpsc channels, each stamped with the attempt id the engine
//! handed out.
//!
//! Failure policy: any transport error, timeout, non-success status, or
//! unreadable body counts as "not a word". The engine never sees a
//! distinct error, so a real word can be penalized during an outage.
//! Verdicts are cached for the process lifetime.

use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Free dictionary API, keyed by the candidate word
const ENDPOINT: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

/// Per-lookup timeout budget
const LOOKUP_TIMEOUT: Duration = Duration::from_secs(8);

/// Handle to the lookup worker thread
pub struct DictionaryChecker {
    requests: mpsc::Sender<(u64, String)>,
    verdicts: mpsc::Receiver<(u64, bool)>,
}

impl DictionaryChecker {
    /// Start the worker thread. It exits on its own once this handle
    /// is dropped and the request channel closes.
    pub fn spawn() -> Self {
        let (request_tx, request_rx) = mpsc::channel::<(u64, String)>();
        let (verdict_tx, verdict_rx) = mpsc::channel();

        thread::spawn(move || {
            // If the client cannot be built, every lookup reports
            // invalid rather than crashing the worker
            let client = reqwest::blocking::Client::builder()
                .timeout(LOOKUP_TIMEOUT)
                .build()
                .ok();
            let mut cache: HashMap<String, bool> = HashMap::new();

            while let Ok((attempt, word)) = request_rx.recv() {
                let valid = match cache.get(&word) {
                    Some(&cached) => cached,
                    None => {
                        let verdict = client
                            .as_ref()
                            .map(|c| lookup(c, &word))
                            .unwrap_or(false);
                        cache.insert(word.clone(), verdict);
                        verdict
                    }
                };
                if verdict_tx.send((attempt, valid)).is_err() {
                    break;
                }
            }
        });

        Self {
            requests: request_tx,
            verdicts: verdict_rx,
        }
    }

    /// Queue a lookup for a normalized word
    pub fn request(&self, attempt: u64, word: String) {
        let _ = self.requests.send((attempt, word));
    }

    /// Non-blocking poll for the next verdict
    pub fn try_recv(&self) -> Option<(u64, bool)> {
        self.verdicts.try_recv().ok()
    }
}

/// One GET against the dictionary API. The word is already lowercase
/// ASCII letters, so it can sit in the URL path as-is.
fn lookup(client: &reqwest::blocking::Client, word: &str) -> bool {
    let url = format!("{}/{}", ENDPOINT, word);
    match client.get(&url).send() {
        Ok(resp) if resp.status().is_success() => resp
            .text()
            .map(|body| entry_found(&body))
            .unwrap_or(false),
        _ => false,
    }
}

/// A word is valid when the API body is a non-empty JSON array of
/// entries. The API reports unknown words with a JSON object, which
/// fails this check like any other malformed body.
fn entry_found(body: &str) -> bool {
    matches!(
        serde_json::from_str::<serde_json::Value>(body),
        Ok(serde_json::Value::Array(entries)) if !entries.is_empty()
    )
}
