use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

use ltd_constants::{MAX_ATTEMPTS, USER_AGENT};

#[derive(Clone, Debug)]
pub struct RegistryDocument {
    pub versions: Value,
    pub dist_tags: HashMap<String, String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageInfo {
    pub name: String,
    pub url: String,
}

#[must_use]
pub fn build_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(25)
        .pool_idle_timeout(Some(Duration::from_secs(90)))
        .timeout(Duration::from_secs(45))
        .connect_timeout(Duration::from_secs(20))
        .tcp_keepalive(Some(Duration::from_secs(60)))
        .tcp_nodelay(true)
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

/// `https://registry.npmjs.org/@types%2Fnode` style document URL.
#[must_use]
pub fn metadata_url(registry: &str, name: &str) -> String {
    let encoded_name = urlencoding::encode(name).replace("%40", "@");
    format!("{}/{encoded_name}", registry.trim_end_matches('/'))
}

#[must_use]
pub fn is_url(value: &str) -> bool {
    let base = value.split_once('#').map_or(value, |(base, _)| base);
    base.contains("://")
        || base.starts_with("git@")
        || base.starts_with("git+")
        || base.starts_with('/')
        || base.ends_with(".git")
        || base.ends_with(".tgz")
        || base.ends_with(".tar.gz")
        || base.ends_with(".tar")
}

pub async fn fetch_registry_document(
    client: &reqwest::Client,
    registry: &str,
    name: &str,
) -> anyhow::Result<RegistryDocument> {
    let url = metadata_url(registry, name);
    let mut attempts = 0;

    loop {
        attempts += 1;

        let resp = match client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                if attempts < MAX_ATTEMPTS && (e.is_timeout() || e.is_connect()) {
                    let delay = std::cmp::min(1000 * u64::from(attempts), 5000);
                    tokio::time::sleep(Duration::from_millis(delay)).await;
                    continue;
                }
                return Err(if e.is_timeout() {
                    anyhow::anyhow!("Request timeout for {} after {} attempts", name, attempts)
                } else if e.is_connect() {
                    anyhow::anyhow!("Connection failed for {}: {}", name, e)
                } else {
                    anyhow::anyhow!("Network error for {}: {}", name, e)
                });
            }
        };

        let resp = match resp.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                if attempts < MAX_ATTEMPTS
                    && (e.status() == Some(reqwest::StatusCode::TOO_MANY_REQUESTS)
                        || e.status() == Some(reqwest::StatusCode::INTERNAL_SERVER_ERROR)
                        || e.status() == Some(reqwest::StatusCode::SERVICE_UNAVAILABLE))
                {
                    tokio::time::sleep(Duration::from_millis(1000 * u64::from(attempts))).await;
                    continue;
                }
                return Err(anyhow::anyhow!("HTTP error for {}: {}", name, e));
            }
        };

        let text = resp
            .text()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read response text for {}: {}", name, e))?;

        let json: Value = serde_json::from_str(&text).map_err(|e| {
            anyhow::anyhow!(
                "Failed to parse JSON for {} (response length: {}): {}",
                name,
                text.len(),
                e
            )
        })?;

        return Ok(parse_registry_document(&json));
    }
}

#[must_use]
pub fn parse_registry_document(json: &Value) -> RegistryDocument {
    let dist_tags = json
        .get("dist-tags")
        .and_then(Value::as_object)
        .map(|tags| {
            tags.iter()
                .filter_map(|(tag, version)| Some((tag.clone(), version.as_str()?.to_string())))
                .collect()
        })
        .unwrap_or_default();

    RegistryDocument {
        versions: json
            .get("versions")
            .cloned()
            .unwrap_or_else(|| Value::Object(serde_json::Map::new())),
        dist_tags,
    }
}

impl RegistryDocument {
    /// `requested` may be a version or a dist-tag.
    #[must_use]
    pub fn package_info(&self, key: &str, requested: &str) -> Option<PackageInfo> {
        let version = self
            .dist_tags
            .get(requested)
            .map_or(requested, String::as_str);
        let entry = self.versions.get(version)?;
        let url = entry
            .get("dist")
            .and_then(|dist| dist.get("tarball"))
            .and_then(Value::as_str)
            .filter(|url| !url.is_empty())?;
        let name = entry.get("name").and_then(Value::as_str).unwrap_or(key);

        Some(PackageInfo {
            name: name.to_string(),
            url: url.to_string(),
        })
    }
}

/// Falls back to `version_or_url` itself when the registry has no match.
pub async fn get_package_info(
    client: &reqwest::Client,
    registry: &str,
    key: &str,
    version_or_url: &str,
) -> PackageInfo {
    let fallback = PackageInfo {
        name: key.to_string(),
        url: version_or_url.to_string(),
    };

    if is_url(version_or_url) {
        return fallback;
    }

    match fetch_registry_document(client, registry, key).await {
        Ok(document) => document
            .package_info(key, version_or_url)
            .unwrap_or(fallback),
        Err(_) => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ltd_constants::REGISTRY_URL;
    use serde_json::json;

    fn node_document() -> RegistryDocument {
        parse_registry_document(&json!({
            "name": "@types/node",
            "dist-tags": {"latest": "12.11.1", "ts3.4": "12.7.0"},
            "versions": {
                "12.7.0": {
                    "name": "@types/node",
                    "dist": {"tarball": "https://registry.npmjs.org/@types/node/-/node-12.7.0.tgz"}
                },
                "12.11.1": {
                    "name": "@types/node",
                    "dist": {"tarball": "https://registry.npmjs.org/@types/node/-/node-12.11.1.tgz"}
                },
                "12.0.0": {"name": "@types/node"}
            }
        }))
    }

    #[test]
    fn test_exact_version() {
        assert_eq!(
            node_document().package_info("@types/node", "12.11.1"),
            Some(PackageInfo {
                name: "@types/node".to_string(),
                url: "https://registry.npmjs.org/@types/node/-/node-12.11.1.tgz".to_string(),
            })
        );
    }

    #[test]
    fn test_dist_tag() {
        let info = node_document().package_info("@types/node", "latest").unwrap();
        assert!(info.url.ends_with("node-12.11.1.tgz"));
        let info = node_document().package_info("@types/node", "ts3.4").unwrap();
        assert!(info.url.ends_with("node-12.7.0.tgz"));
    }

    #[test]
    fn test_missing_version_or_tarball() {
        assert_eq!(node_document().package_info("@types/node", "99.0.0"), None);
        assert_eq!(node_document().package_info("@types/node", "12.0.0"), None);
    }

    #[test]
    fn test_empty_document() {
        let document = parse_registry_document(&json!({}));
        assert!(document.dist_tags.is_empty());
        assert_eq!(document.package_info("x", "1.0.0"), None);
    }

    #[test]
    fn test_metadata_url_keeps_scope() {
        assert_eq!(
            metadata_url("https://registry.npmjs.org/", "@types/node"),
            "https://registry.npmjs.org/@types%2Fnode"
        );
        assert_eq!(
            metadata_url(REGISTRY_URL, "lodash"),
            "https://registry.npmjs.org/lodash"
        );
    }

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/pkg.tgz"));
        assert!(is_url("git@github.com:owner/repo.git"));
        assert!(is_url("ssh://git@github.com/owner/repo"));
        assert!(!is_url("12.11.1"));
        assert!(!is_url("latest"));
        assert!(!is_url("^1.0.0"));
        assert!(is_url("/srv/repos/types.git#v2::types"));
        assert!(is_url("https://github.com/o/r#main"));
    }

    #[tokio::test]
    async fn test_url_value_skips_registry() {
        let client = build_client();
        let info = get_package_info(
            &client,
            "http://127.0.0.1:9",
            "types",
            "https://github.com/owner/types.git#main",
        )
        .await;
        assert_eq!(info.name, "types");
        assert_eq!(info.url, "https://github.com/owner/types.git#main");
    }

    async fn serve_once(status: &'static str, body: String) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                let mut buf = vec![0u8; 8192];
                let _ = stream.read(&mut buf).await;
                let response = format!(
                    "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes()).await;
                let _ = stream.shutdown().await;
            }
        });
        base
    }

    #[tokio::test]
    async fn test_registry_hit_resolves_dist_tag() {
        let document = json!({
            "dist-tags": {"latest": "2.0.0"},
            "versions": {
                "2.0.0": {"name": "pkg", "dist": {"tarball": "http://cdn.test/pkg-2.0.0.tgz"}}
            }
        });
        let base = serve_once("200 OK", document.to_string()).await;

        let info = get_package_info(&build_client(), &base, "pkg", "latest").await;

        assert_eq!(
            info,
            PackageInfo {
                name: "pkg".to_string(),
                url: "http://cdn.test/pkg-2.0.0.tgz".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_registry_miss_falls_back_to_value() {
        let base = serve_once("404 Not Found", String::new()).await;

        let info = get_package_info(&build_client(), &base, "pkg", "1.0.0").await;

        assert_eq!(info.name, "pkg");
        assert_eq!(info.url, "1.0.0");
    }
}
