// Itinerary loading from a local export or the remote API
use crate::config::Config;
use crate::error::{JekinError, Result};
use crate::models::Itinerary;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItinerarySource {
    File(PathBuf),
    Url { url: String, token: Option<String> },
}

impl ItinerarySource {
    /// Pick a source: explicit file, then explicit URL, then the configured URL
    pub fn resolve(
        file: Option<PathBuf>,
        url: Option<String>,
        config: &Config,
    ) -> Result<Self> {
        if let Some(path) = file {
            return Ok(Self::File(path));
        }

        let token = config.source_token().map(str::to_string);

        if let Some(url) = url {
            return Ok(Self::Url { url, token });
        }

        match config.source_url() {
            Some(url) => Ok(Self::Url {
                url: url.to_string(),
                token,
            }),
            None => Err(JekinError::ItineraryError(
                "No itinerary source. Pass --file or --url, or set source.url in the config file / JEKIN_ITINERARY_URL".to_string(),
            )),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Url { url, .. } => url.clone(),
        }
    }

    pub async fn load(&self) -> Result<Itinerary> {
        match self {
            Self::File(path) => load_file(path),
            Self::Url { url, token } => fetch(url, token.as_deref()).await,
        }
    }
}

fn load_file(path: &Path) -> Result<Itinerary> {
    tracing::debug!("Reading itinerary from {}", path.display());
    let contents = fs::read_to_string(path).map_err(|e| {
        JekinError::ItineraryError(format!("Failed to read {}: {}", path.display(), e))
    })?;
    parse_itinerary(&contents)
}

async fn fetch(url: &str, token: Option<&str>) -> Result<Itinerary> {
    tracing::debug!("Fetching itinerary from {}", url);

    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;

    let mut request = client.get(url).header(reqwest::header::ACCEPT, "application/json");
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }

    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(JekinError::ItineraryError(format!(
            "Itinerary endpoint returned {}",
            status
        )));
    }

    let body = response.text().await?;
    parse_itinerary(&body)
}

/// Accepts either the full `{ "flights": [...] }` object or a bare array of legs
pub fn parse_itinerary(body: &str) -> Result<Itinerary> {
    let value: serde_json::Value = serde_json::from_str(body)?;

    let itinerary = if value.is_array() {
        Itinerary {
            flights: serde_json::from_value(value)?,
            pdb: None,
        }
    } else {
        serde_json::from_value(value)?
    };

    tracing::debug!("Loaded {} flight legs", itinerary.flights.len());
    Ok(itinerary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = r#"{
        "flights": [
            { "flightNumber": "NF10", "departureDate": "2025-06-15 14:30:00",
              "arrivalDate": "2025-06-15 17:45:00", "isInternational": true },
            { "flightNumber": "NF211", "departureDate": null, "isInternational": false }
        ],
        "pdb": { "date": "2025-06-10" }
    }"#;

    #[test]
    fn test_parse_full_object() {
        let itinerary = parse_itinerary(SAMPLE).unwrap();
        assert_eq!(itinerary.flights.len(), 2);
        assert!(itinerary.flights[1].departure.is_none());
        assert!(itinerary.pdb.is_some());
    }

    #[test]
    fn test_parse_bare_array() {
        let itinerary =
            parse_itinerary(r#"[{ "flightNumber": "NF10", "isInternational": true }]"#).unwrap();
        assert_eq!(itinerary.flights.len(), 1);
        assert!(itinerary.pdb.is_none());
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(parse_itinerary("<html>"), Err(JekinError::Json(_))));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("itinerary.json");
        fs::write(&path, SAMPLE).unwrap();

        let itinerary = ItinerarySource::File(path).load().await.unwrap();
        assert_eq!(itinerary.flights[0].flight_number, "NF10");
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let source = ItinerarySource::File(dir.path().join("absent.json"));
        assert!(matches!(
            source.load().await,
            Err(JekinError::ItineraryError(_))
        ));
    }

    #[test]
    fn test_resolve_priority() {
        let mut config = Config::default();
        config.source.url = Some("https://api.example.org/itinerary".to_string());
        config.source.token = Some("secret".to_string());

        let source =
            ItinerarySource::resolve(Some(PathBuf::from("legs.json")), None, &config).unwrap();
        assert_eq!(source, ItinerarySource::File(PathBuf::from("legs.json")));

        let source = ItinerarySource::resolve(
            None,
            Some("https://other.example.org".to_string()),
            &config,
        )
        .unwrap();
        assert_eq!(
            source,
            ItinerarySource::Url {
                url: "https://other.example.org".to_string(),
                token: Some("secret".to_string()),
            }
        );

        let source = ItinerarySource::resolve(None, None, &config).unwrap();
        assert_eq!(source.describe(), "https://api.example.org/itinerary");
    }

    #[test]
    fn test_resolve_without_any_source() {
        let mut config = Config::default();
        config.source.url = Some("  ".to_string());
        assert!(ItinerarySource::resolve(None, None, &config).is_err());
    }
}
