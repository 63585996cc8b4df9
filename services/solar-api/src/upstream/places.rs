//! Places autocomplete and details proxy client.

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use solar_common::{GeoPoint, SolarError, SolarResult};
use tracing::instrument;

use super::{read_json, transport_error};
use crate::config::ApiConfig;

const AUTOCOMPLETE_FIELD_MASK: &str = "suggestions.placePrediction.placeId,\
suggestions.placePrediction.text,\
suggestions.placePrediction.structuredFormat.mainText,\
suggestions.placePrediction.structuredFormat.secondaryText";

const DETAILS_FIELD_MASK: &str = "id,displayName,formattedAddress,location";

/// Radius of the location bias circle around the caller's origin.
const LOCATION_BIAS_RADIUS_METERS: f64 = 50_000.0;

/// One autocomplete suggestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceSuggestion {
    pub place_id: String,
    pub primary_text: String,
    pub secondary_text: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct TextView {
    text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StructuredFormatView {
    main_text: Option<TextView>,
    secondary_text: Option<TextView>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PlacePredictionView {
    place_id: Option<String>,
    text: Option<TextView>,
    structured_format: Option<StructuredFormatView>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct SuggestionView {
    place_prediction: Option<PlacePredictionView>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct AutocompleteView {
    suggestions: Vec<SuggestionView>,
}

/// Suggestions from an autocomplete payload.
///
/// Entries without a place id or without any primary text are dropped.
pub fn parse_suggestions(payload: &Value) -> Vec<PlaceSuggestion> {
    let view = AutocompleteView::deserialize(payload).unwrap_or_default();
    view.suggestions
        .into_iter()
        .filter_map(|s| {
            let prediction = s.place_prediction?;
            let place_id = prediction.place_id.filter(|id| !id.is_empty())?;
            let structured = prediction.structured_format.unwrap_or_default();
            let primary_text = structured
                .main_text
                .and_then(|t| t.text)
                .or_else(|| prediction.text.and_then(|t| t.text))
                .filter(|t| !t.is_empty())?;
            let secondary_text = structured
                .secondary_text
                .and_then(|t| t.text)
                .unwrap_or_default();
            Some(PlaceSuggestion {
                place_id,
                primary_text,
                secondary_text,
            })
        })
        .collect()
}

/// Resolved place.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceDetails {
    pub place_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PlaceDetailsView {
    id: Option<String>,
    display_name: Option<TextView>,
    formatted_address: Option<String>,
    location: Option<Value>,
}

/// Details from a place payload, falling back to the requested id.
pub fn parse_details(payload: &Value, requested_id: &str) -> PlaceDetails {
    let view = PlaceDetailsView::deserialize(payload).unwrap_or_default();
    PlaceDetails {
        place_id: view.id.unwrap_or_else(|| requested_id.to_string()),
        name: view.display_name.and_then(|d| d.text),
        formatted_address: view.formatted_address,
        location: view.location,
    }
}

/// Google Places (New) client.
pub struct PlacesClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl PlacesClient {
    pub fn new(client: Client, config: &ApiConfig) -> Self {
        Self {
            client,
            base_url: config.places_api_base.clone(),
            api_key: config.places_api_key.clone(),
        }
    }

    fn key(&self) -> SolarResult<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| SolarError::configuration("Missing Google Places API key in environment"))
    }

    #[instrument(skip(self, session_token))]
    pub async fn autocomplete(
        &self,
        input: &str,
        session_token: &str,
        origin: Option<GeoPoint>,
    ) -> SolarResult<Vec<PlaceSuggestion>> {
        let key = self.key()?;
        let body = autocomplete_body(input, session_token, origin);

        let response = self
            .client
            .post(format!("{}/places:autocomplete", self.base_url))
            .header("X-Goog-Api-Key", key)
            .header("X-Goog-FieldMask", AUTOCOMPLETE_FIELD_MASK)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;

        let payload = read_json("Places autocomplete", response).await?;
        Ok(parse_suggestions(&payload))
    }

    #[instrument(skip(self, session_token))]
    pub async fn details(
        &self,
        place_id: &str,
        session_token: Option<&str>,
    ) -> SolarResult<PlaceDetails> {
        let key = self.key()?;

        let mut url = Url::parse(&format!("{}/places", self.base_url))
            .map_err(|e| SolarError::configuration(format!("Invalid PLACES_API_BASE: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| SolarError::configuration("PLACES_API_BASE cannot be a base URL"))?
            .push(place_id);
        if let Some(token) = session_token {
            url.query_pairs_mut().append_pair("sessionToken", token);
        }

        let response = self
            .client
            .get(url)
            .header("X-Goog-Api-Key", key)
            .header("X-Goog-FieldMask", DETAILS_FIELD_MASK)
            .send()
            .await
            .map_err(transport_error)?;

        let payload = read_json("Places details", response).await?;
        Ok(parse_details(&payload, place_id))
    }
}

fn autocomplete_body(input: &str, session_token: &str, origin: Option<GeoPoint>) -> Value {
    let mut body = json!({
        "input": input,
        "sessionToken": session_token,
        "languageCode": "en",
        "includedPrimaryTypes": ["street_address", "premise", "plus_code"],
    });
    if let Some(origin) = origin {
        body["locationBias"] = json!({
            "circle": {
                "center": { "latitude": origin.latitude, "longitude": origin.longitude },
                "radius": LOCATION_BIAS_RADIUS_METERS,
            }
        });
    }
    body
}
