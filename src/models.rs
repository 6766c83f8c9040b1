use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};

/// Body sent to the style service.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StyleRequest {
    pub prompt: String,
}

/// A generated presentation theme. Every listed field is required; a response
/// that omits one fails to decode instead of rendering blanks.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StyleResult {
    pub theme_name: String,
    pub style_description: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub background_color: String,
    pub text_color: String,
    pub title_font: String,
    pub body_font: String,
    pub title_size: f64,
    pub body_size: f64,
    pub mood: String,
    pub layout_style: String,
    pub use_gradients: bool,
    pub use_shadows: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_placeholder_style: Option<PlaceholderStyle>,
}

/// How image placeholders are tinted when the theme is applied to slides.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderStyle {
    Light,
    Dark,
    Themed,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StyleResponse {
    pub success: bool,
    #[serde(default)]
    pub style: Option<serde_json::Value>, // decoded separately so a bad style is reported as such
    #[serde(default)]
    pub error: Option<String>,
}

/// A style the user generated, with the time it arrived.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct GeneratedStyle {
    pub style: StyleResult,
    pub generated_at: DateTime<Utc>,
}

/// Payload of a downstream "generate presentation" request that carries an
/// adopted style under `customStyle`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PresentationRequest {
    pub title: String,
    pub topic: String,
    #[serde(default)]
    pub sections: Vec<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default = "default_notes_style")]
    pub notes_style: String,
    #[serde(default)]
    pub custom_style: Option<StyleResult>,
}

fn default_notes_style() -> String { "Detailed".to_string() }

impl PresentationRequest {
    pub fn new(title: impl Into<String>, topic: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            topic: topic.into(),
            sections: Vec::new(),
            theme: None,
            notes_style: default_notes_style(),
            custom_style: None,
        }
    }

    /// Attach an adopted style; it overrides any named theme downstream.
    pub fn with_custom_style(mut self, style: StyleResult) -> Self {
        self.custom_style = Some(style);
        self
    }
}

#[cfg(test)]
pub(crate) fn sample_style() -> StyleResult {
    StyleResult {
        theme_name: "Corporate Trust".into(),
        style_description: "Calm blues with crisp gray accents".into(),
        primary_color: "#1E3A8A".into(),
        secondary_color: "#64748B".into(),
        accent_color: "#F59E0B".into(),
        background_color: "#FFFFFF".into(),
        text_color: "#111827".into(),
        title_font: "Montserrat".into(),
        body_font: "Open Sans".into(),
        title_size: 40.0,
        body_size: 18.0,
        mood: "professional".into(),
        layout_style: "structured".into(),
        use_gradients: false,
        use_shadows: true,
        image_placeholder_style: None,
    }
}
