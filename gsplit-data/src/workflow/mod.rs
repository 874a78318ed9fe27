//! Detection workflow response format.
//!
//! The workflow answers with either `{"outputs": [map, ...]}` or the output
//! map itself. Output keys are inconsistent about spaces and underscores
//! (`"pint results"`, `"split_results"`), so keys are normalised before they
//! are matched to a [`ModelOutput`]. Each value is a prediction-set object or
//! an array whose first element is one.

use gsplit_core::{
    CropOrigin, Detection, DetectionClientError, DetectionResults, DetectionSet, ImageSize,
    ModelOutput,
};
use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
struct WireImage {
    width: f64,
    height: f64,
}

#[derive(Debug, Default, Deserialize)]
struct WireOrigin {
    #[serde(default)]
    offset_x: f64,
    #[serde(default)]
    offset_y: f64,
}

#[derive(Debug, Deserialize)]
struct WirePrediction {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    confidence: f64,
    #[serde(rename = "class", default)]
    class_label: String,
    #[serde(default)]
    parent_origin: Option<WireOrigin>,
}

#[derive(Debug, Deserialize)]
struct WireSet {
    #[serde(default)]
    image: Option<WireImage>,
    #[serde(default)]
    predictions: Vec<Value>,
}

/// Lower-case a workflow output key and replace spaces with underscores.
#[must_use]
pub fn normalise_key(key: &str) -> String {
    key.trim().to_ascii_lowercase().replace(' ', "_")
}

/// Model output a normalised key belongs to, if any.
#[must_use]
pub fn model_for_key(normalised: &str) -> Option<ModelOutput> {
    match normalised {
        "pint_results" => Some(ModelOutput::Region),
        "split_results" => Some(ModelOutput::Line),
        "g_bar_results" | "reference_results" => Some(ModelOutput::Reference),
        _ => None,
    }
}

/// Parse a workflow response body.
///
/// Unknown outputs are ignored and missing ones become empty sets.
/// Predictions that fail validation are skipped with a warning.
///
/// # Errors
/// Returns [`DetectionClientError::Parse`] when the body is not JSON, has no
/// output map, or a recognised output is not a prediction set.
pub fn parse_workflow_response(body: &[u8]) -> Result<DetectionResults, DetectionClientError> {
    let document: Value = serde_json::from_slice(body).map_err(parse_error)?;
    let outputs = output_map(&document)?;
    let mut results = DetectionResults::new();
    for (key, value) in outputs {
        let Some(model) = model_for_key(&normalise_key(key)) else {
            log::debug!("ignoring workflow output {key:?}");
            continue;
        };
        let Some(set_value) = first_set(value) else {
            log::debug!("workflow output {key:?} is empty");
            continue;
        };
        results.insert(model, parse_set(set_value, key)?);
    }
    Ok(results)
}

fn parse_error(err: impl std::fmt::Display) -> DetectionClientError {
    DetectionClientError::Parse {
        message: err.to_string(),
    }
}

fn output_map(document: &Value) -> Result<&Map<String, Value>, DetectionClientError> {
    let candidate = match document.get("outputs") {
        Some(Value::Array(items)) => items.first().ok_or_else(|| DetectionClientError::Parse {
            message: "workflow returned an empty outputs array".to_owned(),
        })?,
        _ => document,
    };
    candidate.as_object().ok_or_else(|| DetectionClientError::Parse {
        message: "workflow outputs are not an object".to_owned(),
    })
}

fn first_set(value: &Value) -> Option<&Value> {
    match value {
        Value::Null => None,
        Value::Array(items) => items.first(),
        other => Some(other),
    }
}

fn parse_set(value: &Value, key: &str) -> Result<DetectionSet, DetectionClientError> {
    let wire = WireSet::deserialize(value)
        .map_err(|err| parse_error(format!("output {key:?}: {err}")))?;
    let image = wire
        .image
        .map_or_else(ImageSize::default, |image| ImageSize::new(image.width, image.height));

    let mut origin = None;
    let mut predictions = Vec::with_capacity(wire.predictions.len());
    for raw in wire.predictions {
        let prediction = match WirePrediction::deserialize(&raw) {
            Ok(prediction) => prediction,
            Err(err) => {
                log::warn!("skipping malformed prediction in {key:?}: {err}");
                continue;
            }
        };
        if origin.is_none() {
            origin = prediction
                .parent_origin
                .as_ref()
                .map(|parent| CropOrigin::new(parent.offset_x, parent.offset_y));
        }
        match Detection::new(
            prediction.class_label,
            prediction.x,
            prediction.y,
            prediction.width,
            prediction.height,
            prediction.confidence,
        ) {
            Ok(detection) => predictions.push(detection),
            Err(err) => log::warn!("skipping invalid prediction in {key:?}: {err}"),
        }
    }

    let set = DetectionSet::new(image, predictions);
    Ok(match origin {
        Some(crop) => set.with_origin(crop),
        None => set,
    })
}
