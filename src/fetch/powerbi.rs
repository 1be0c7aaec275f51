// src/fetch/powerbi.rs

//! Power BI `querydata` fetcher.
//!
//! Issues the single measure query the public dashboard itself sends and
//! pulls the measure text out of the deeply nested response. Transport
//! failure, a non-success status, and a missing field anywhere on the
//! expected path are all the same outcome: the release text could not be
//! retrieved.

use reqwest::header::{CONTENT_TYPE, ORIGIN, REFERER};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::config::ReleaseConfig;
use crate::error::{AppError, Result};

/// Response envelope, modelled only as deep as the one consumed field.
/// Every level defaults so a partially present structure deserializes and
/// simply yields no measure text.
#[derive(Debug, Default, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    results: Vec<QueryResult>,
}

#[derive(Debug, Default, Deserialize)]
struct QueryResult {
    #[serde(default)]
    result: ResultEnvelope,
}

#[derive(Debug, Default, Deserialize)]
struct ResultEnvelope {
    #[serde(default)]
    data: DataEnvelope,
}

#[derive(Debug, Default, Deserialize)]
struct DataEnvelope {
    #[serde(default)]
    dsr: Dsr,
}

#[derive(Debug, Default, Deserialize)]
struct Dsr {
    #[serde(rename = "DS", default)]
    data_sets: Vec<DataSet>,
}

#[derive(Debug, Default, Deserialize)]
struct DataSet {
    #[serde(rename = "PH", default)]
    primary: Vec<PrimaryRows>,
}

#[derive(Debug, Default, Deserialize)]
struct PrimaryRows {
    #[serde(rename = "DM0", default)]
    rows: Vec<MeasureRow>,
}

#[derive(Debug, Default, Deserialize)]
struct MeasureRow {
    #[serde(rename = "M0")]
    measure: Option<String>,
}

/// Walk `results[0].result.data.dsr.DS[0].PH[0].DM0[0].M0`.
fn measure_text(response: &QueryResponse) -> Option<&str> {
    response
        .results
        .first()?
        .result
        .data
        .dsr
        .data_sets
        .first()?
        .primary
        .first()?
        .rows
        .first()?
        .measure
        .as_deref()
}

/// Build the `SemanticQueryDataShapeCommand` payload selecting one measure
/// from one entity.
fn query_payload(config: &ReleaseConfig) -> Value {
    json!({
        "version": "1.0.0",
        "queries": [{
            "Query": {
                "Commands": [{
                    "SemanticQueryDataShapeCommand": {
                        "Query": {
                            "Version": 2,
                            "From": [{
                                "Name": "t",
                                "Entity": config.entity,
                                "Type": 0
                            }],
                            "Select": [{
                                "Measure": {
                                    "Expression": {
                                        "SourceRef": {"Source": "t"}
                                    },
                                    "Property": config.measure
                                },
                                "Name": format!("{}.{}", config.entity, config.measure),
                                "NativeReferenceName": config.measure
                            }]
                        },
                        "Binding": {
                            "Primary": {
                                "Groupings": [{"Projections": [0]}]
                            },
                            "DataReduction": {
                                "DataVolume": 3,
                                "Primary": {"Top": {}}
                            },
                            "Version": 1
                        },
                        "ExecutionMetricsKind": 1
                    }
                }]
            },
            "QueryId": "",
            "ApplicationContext": {
                "DatasetId": config.dataset_id
            }
        }],
        "cancelQueries": [],
        "modelId": config.model_id
    })
}

/// Fetch the raw release text from the dashboard.
pub async fn fetch_release_text(
    client: &reqwest::Client,
    config: &ReleaseConfig,
) -> Result<String> {
    log::info!("Querying Power BI API...");

    let response = client
        .post(&config.endpoint)
        .header(CONTENT_TYPE, "application/json;charset=UTF-8")
        .header("x-powerbi-resourcekey", &config.resource_key)
        .header(ORIGIN, &config.origin)
        .header(REFERER, &config.referer)
        .json(&query_payload(config))
        .send()
        .await?
        .error_for_status()?;

    let body: QueryResponse = response.json().await?;

    let text = measure_text(&body)
        .ok_or_else(|| AppError::retrieval("measure field missing from query response"))?;

    log::info!("Retrieved: {text}");
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_response(measure: &str) -> QueryResponse {
        serde_json::from_value(json!({
            "results": [{
                "result": {
                    "data": {
                        "dsr": {
                            "DS": [{
                                "PH": [{
                                    "DM0": [{"M0": measure}]
                                }]
                            }]
                        }
                    }
                }
            }]
        }))
        .unwrap()
    }

    #[test]
    fn extracts_measure_from_full_response() {
        let response = sample_response("Content last updated on: 16 Dec 2025");
        assert_eq!(
            measure_text(&response),
            Some("Content last updated on: 16 Dec 2025")
        );
    }

    #[test]
    fn partial_structures_yield_no_measure() {
        // Truncations at every level of the path.
        let cases = [
            json!({}),
            json!({"results": []}),
            json!({"results": [{}]}),
            json!({"results": [{"result": {}}]}),
            json!({"results": [{"result": {"data": {}}}]}),
            json!({"results": [{"result": {"data": {"dsr": {}}}}]}),
            json!({"results": [{"result": {"data": {"dsr": {"DS": []}}}}]}),
            json!({"results": [{"result": {"data": {"dsr": {"DS": [{"PH": []}]}}}}]}),
            json!({"results": [{"result": {"data": {"dsr": {"DS": [{"PH": [{"DM0": []}]}]}}}}]}),
            json!({"results": [{"result": {"data": {"dsr": {"DS": [{"PH": [{"DM0": [{}]}]}]}}}}]}),
        ];

        for case in cases {
            let response: QueryResponse = serde_json::from_value(case.clone()).unwrap();
            assert_eq!(measure_text(&response), None, "case: {case}");
        }
    }

    #[test]
    fn payload_selects_configured_measure() {
        let config = ReleaseConfig::default();
        let payload = query_payload(&config);

        let command = &payload["queries"][0]["Query"]["Commands"][0]
            ["SemanticQueryDataShapeCommand"]["Query"];
        assert_eq!(command["From"][0]["Entity"], json!(config.entity));
        assert_eq!(
            command["Select"][0]["Measure"]["Property"],
            json!(config.measure)
        );
        assert_eq!(
            payload["queries"][0]["ApplicationContext"]["DatasetId"],
            json!(config.dataset_id)
        );
        assert_eq!(payload["modelId"], json!(config.model_id));
    }
}
