use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};

use crate::error::Error;

static API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
static MODEL: &str = "openai/gpt-oss-20b";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealRecommendation {
    pub name: String,
    /// 1-10.
    pub tastyness: f64,
    /// 0-1.
    pub confidence_score: f64,
}

#[derive(Debug, Deserialize)]
struct RecommendationResponse {
    recommendations: Vec<MealRecommendation>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    content: String,
}

/// Rates `meal_names` against a free-text taste description. An empty meal
/// list is trivially "no recommendations" and never touches the network;
/// anything the model returns outside the expected JSON shape is an error
/// the caller may ignore, since nothing in the core depends on this call.
pub async fn classify(
    client: &reqwest::Client,
    api_key: &str,
    meal_names: &[String],
    preference: &str,
) -> crate::Result<Vec<MealRecommendation>> {
    if meal_names.is_empty() {
        return Ok(Vec::new());
    }

    let example = serde_json::json!({
        "recommendations": [{
            "name": "Högrevsburgare",
            "tastyness": "number (0-10)",
            "confidenceScore": "number (0-1)",
        }]
    });
    let system = format!(
        "You are a gastronomic expert recommending meals to a user from a list of \
         available meals and the users preferences or taste. Rate ALL meals the user \
         is MOST LIKELY to enjoy. You output the recommendations in JSON.\n The JSON \
         object MUST adhere to the following example {}",
        serde_json::to_string_pretty(&example)?
    );
    let user = format!(
        "{preference}\n Veckans tillgängliga rätter är: \n{}",
        meal_names.join("\n")
    );
    let body = serde_json::json!({
        "model": MODEL,
        "temperature": 0,
        "stream": false,
        "response_format": { "type": "json_object" },
        "messages": [
            { "role": "system", "content": system },
            { "role": "user", "content": user },
        ],
    });

    let response = client
        .post(API_URL)
        .bearer_auth(api_key)
        .header(CONTENT_TYPE, "application/json")
        .body(serde_json::to_string(&body)?)
        .send()
        .await?
        .error_for_status()?;
    let completion: ChatCompletion = serde_json::from_str(&response.text().await?)?;
    let first = completion
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| Error::Recommendation("completion contained no choices".to_string()))?;
    let parsed: RecommendationResponse = serde_json::from_str(&first.message.content)?;
    Ok(parsed.recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::make_client;

    #[tokio::test]
    async fn empty_meal_list_short_circuits() {
        let client = make_client();
        let recommendations = classify(&client, "unused-key", &[], "allt som är mört")
            .await
            .unwrap();
        assert!(recommendations.is_empty());
    }

    #[test]
    fn recommendation_payload_round_trips() {
        let json = r#"{"recommendations":[
            {"name":"Högrevsburgare","tastyness":9,"confidenceScore":0.8}
        ]}"#;
        let parsed: RecommendationResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed.recommendations,
            vec![MealRecommendation {
                name: "Högrevsburgare".to_string(),
                tastyness: 9.0,
                confidence_score: 0.8,
            }]
        );
    }
}
