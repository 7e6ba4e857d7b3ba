// SPDX-License-Identifier: MIT
//! Stage 5 — optional storage bucket provisioning.
//!
//! Two fixed private buckets created through the storage REST API. The
//! service role key exists only in request headers for the duration of the
//! two calls; it is never written anywhere.

use serde_json::json;

use crate::outcome::StepOutcome;

/// Bucket names, both private. Submitted in this order.
pub const BUCKETS: [&str; 2] = ["case-files", "reports"];

/// Operator-supplied storage credentials. Blank fields mean "skip".
#[derive(Debug, Clone)]
pub struct StorageOptions {
    pub endpoint: String,
    pub service_key: String,
}

impl StorageOptions {
    /// The stage only runs with both values present.
    pub fn is_usable(&self) -> bool {
        !self.endpoint.trim().is_empty() && !self.service_key.trim().is_empty()
    }
}

/// Create both buckets sequentially; one outcome per bucket.
pub async fn provision_buckets(opts: &StorageOptions) -> Vec<(&'static str, StepOutcome)> {
    let client = reqwest::Client::new();
    let mut results = Vec::with_capacity(BUCKETS.len());
    for name in BUCKETS {
        let outcome = create_bucket(&client, &opts.endpoint, &opts.service_key, name).await;
        results.push((name, outcome));
    }
    results
}

/// `POST <endpoint>/rest/v1/storage/buckets` with the literal payload the
/// provider expects: `{"name": ..., "public": false}`.
pub async fn create_bucket(
    client: &reqwest::Client,
    endpoint: &str,
    service_key: &str,
    name: &str,
) -> StepOutcome {
    let url = format!("{}/rest/v1/storage/buckets", endpoint.trim_end_matches('/'));
    let response = client
        .post(&url)
        .header("apikey", service_key)
        .header("Authorization", format!("Bearer {service_key}"))
        .json(&json!({ "name": name, "public": false }))
        .send()
        .await;

    match response {
        Ok(resp) if resp.status().is_success() => {
            StepOutcome::completed(format!("bucket `{name}` created (private)"))
        }
        Ok(resp) => {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            StepOutcome::failed(format!(
                "bucket `{name}`: HTTP {status} {body} — create it manually in the provider console"
            ))
        }
        Err(e) => StepOutcome::failed(format!(
            "bucket `{name}`: {e} — create it manually in the provider console"
        )),
    }
}
