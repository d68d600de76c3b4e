use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Incoming `/render` payload.
///
/// Only `chart_type` is required on the wire. Everything else defaults so that sparse
/// requests deserialize and are then judged by [`crate::validate`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RenderRequest {
    pub chart_type: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub x_field: Option<String>,
    #[serde(default)]
    pub y_field: Option<String>,
    #[serde(default)]
    pub end_x_field: Option<String>,
    #[serde(default)]
    pub end_y_field: Option<String>,
    #[serde(default, deserialize_with = "de_null_as_default")]
    pub data: Vec<Row>,
    #[serde(default)]
    pub orientation: Option<String>,
    #[serde(default)]
    pub half: Option<bool>,
    #[serde(default)]
    pub metrics: Option<Vec<String>>,
    #[serde(default)]
    pub values: Option<Vec<f64>>,
    #[serde(default)]
    pub values_compare: Option<Vec<f64>>,
    #[serde(default)]
    pub series: Option<Vec<SeriesSpec>>,
    /// Label for the implicit series built from `data`.
    #[serde(default)]
    pub series_label: Option<String>,
    #[serde(default)]
    pub marker_rules: Option<Vec<MarkerRule>>,
    #[serde(default)]
    pub highlight_rules: Option<Vec<HighlightRule>>,
}

impl RenderRequest {
    pub fn new(chart_type: impl Into<String>) -> Self {
        Self {
            chart_type: chart_type.into(),
            ..Default::default()
        }
    }

    /// Coordinate field names with the `x`/`y`/`end_x`/`end_y` defaults applied.
    pub fn field_names(&self) -> FieldNames {
        fn pick(v: &Option<String>, default: &str) -> String {
            match v.as_deref().map(str::trim) {
                Some(s) if !s.is_empty() => s.to_string(),
                _ => default.to_string(),
            }
        }
        FieldNames {
            x: pick(&self.x_field, "x"),
            y: pick(&self.y_field, "y"),
            end_x: pick(&self.end_x_field, "end_x"),
            end_y: pick(&self.end_y_field, "end_y"),
        }
    }

    pub fn orientation(&self) -> Orientation {
        Orientation::parse(self.orientation.as_deref())
    }

    pub fn half(&self) -> bool {
        self.half.unwrap_or(false)
    }

    pub fn metrics(&self) -> &[String] {
        self.metrics.as_deref().unwrap_or_default()
    }

    pub fn values(&self) -> &[f64] {
        self.values.as_deref().unwrap_or_default()
    }

    pub fn series_specs(&self) -> &[SeriesSpec] {
        self.series.as_deref().unwrap_or_default()
    }

    pub fn marker_rules(&self) -> &[MarkerRule] {
        self.marker_rules.as_deref().unwrap_or_default()
    }

    pub fn highlight_rules(&self) -> &[HighlightRule] {
        self.highlight_rules.as_deref().unwrap_or_default()
    }
}

/// Resolved coordinate field names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNames {
    pub x: String,
    pub y: String,
    pub end_x: String,
    pub end_y: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        RenderRequest::default().field_names()
    }
}

/// Supported chart families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartType {
    ShotMap,
    PassMap,
    Heatmap,
    PitchPlot,
    PassNetwork,
    Radar,
    Pizza,
    Bumpy,
}

impl ChartType {
    pub const ALL: [ChartType; 8] = [
        ChartType::ShotMap,
        ChartType::PassMap,
        ChartType::Heatmap,
        ChartType::PitchPlot,
        ChartType::PassNetwork,
        ChartType::Radar,
        ChartType::Pizza,
        ChartType::Bumpy,
    ];

    /// Case-insensitive lookup; surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Option<ChartType> {
        let key = raw.trim().to_ascii_lowercase();
        ChartType::ALL.into_iter().find(|t| t.as_str() == key)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartType::ShotMap => "shot_map",
            ChartType::PassMap => "pass_map",
            ChartType::Heatmap => "heatmap",
            ChartType::PitchPlot => "pitch_plot",
            ChartType::PassNetwork => "pass_network",
            ChartType::Radar => "radar",
            ChartType::Pizza => "pizza",
            ChartType::Bumpy => "bumpy",
        }
    }

    /// Drawn on a pitch.
    pub fn is_spatial(&self) -> bool {
        matches!(
            self,
            ChartType::ShotMap
                | ChartType::PassMap
                | ChartType::Heatmap
                | ChartType::PitchPlot
                | ChartType::PassNetwork
        )
    }

    /// Whether a `penalty_area` highlight rule changes how this chart is drawn.
    pub fn honors_penalty_highlight(&self) -> bool {
        matches!(
            self,
            ChartType::ShotMap | ChartType::PassMap | ChartType::PitchPlot
        )
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pitch orientation. Anything other than `vertical` is horizontal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    pub fn parse(raw: Option<&str>) -> Orientation {
        match raw.map(|s| s.trim().to_ascii_lowercase()) {
            Some(s) if s == "vertical" => Orientation::Vertical,
            _ => Orientation::Horizontal,
        }
    }
}

/// One data row: an open JSON object read through typed accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(Map<String, Value>);

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Finite numeric value of `field`.
    ///
    /// JSON numbers and numeric strings are accepted. Absent, null, non-numeric and
    /// non-finite values all read as `None`.
    pub fn number(&self, field: &str) -> Option<f64> {
        let v = match self.0.get(field)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }?;
        v.is_finite().then_some(v)
    }

    /// Non-blank textual value of `field` (numbers are rendered as text).
    pub fn text(&self, field: &str) -> Option<String> {
        match self.0.get(field)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Row(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// A caller-supplied series. `data` feeds pitch charts, `values` feeds the ranking chart.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SeriesSpec {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default, deserialize_with = "de_null_as_default")]
    pub data: Vec<Row>,
    #[serde(default, deserialize_with = "de_ranks")]
    pub values: Vec<Option<f64>>,
}

/// `{target, marker}`: override the marker shape used for `shot` or `pass` points.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MarkerRule {
    #[serde(default)]
    pub target: Option<String>,
    #[serde(default)]
    pub marker: Option<String>,
}

/// `{type, color}`: recolor points inside a pitch zone.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HighlightRule {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Successful `/render` response. Serializes to exactly two keys.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderResponse {
    pub image_base64: String,
    pub mime: String,
}

/// Liveness payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
}

pub fn health() -> HealthStatus {
    HealthStatus {
        status: "ok".into(),
    }
}

/// Serde helper: treat an explicit `null` like a missing field.
fn de_null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Serde helper: a list of ranks where each entry may be a number, a numeric string or null.
fn de_ranks<'de, D>(deserializer: D) -> Result<Vec<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<LenientNumber>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|n| n.0)
        .collect())
}

struct LenientNumber(Option<f64>);

impl<'de> Deserialize<'de> for LenientNumber {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};
        struct NumVisitor;

        impl<'de> Visitor<'de> for NumVisitor {
            type Value = LenientNumber;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a number, a numeric string or null")
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(LenientNumber(Some(v as f64)))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(LenientNumber(Some(v as f64)))
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(LenientNumber(v.is_finite().then_some(v)))
            }

            fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                let t = s.trim();
                if t.is_empty() {
                    return Ok(LenientNumber(None));
                }
                t.parse::<f64>()
                    .map(|v| LenientNumber(v.is_finite().then_some(v)))
                    .map_err(E::custom)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(LenientNumber(None))
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(LenientNumber(None))
            }
        }

        deserializer.deserialize_any(NumVisitor)
    }
}
