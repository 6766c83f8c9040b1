//! Plain-text rendering of the customizer.

use std::fmt::Write;

use crate::{color::{placeholder_color, swatch}, models::StyleResult};

/// Everything needed to draw the customizer, captured at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub examples: [&'static str; 5],
    pub prompt: String,
    pub loading: bool,
    pub submit_enabled: bool,
    pub error: Option<String>,
    pub style: Option<StyleResult>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    pub color: bool,
}

fn truncate(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((i, _)) => format!("{}...", &s[..i]),
        None => s.to_string(),
    }
}

fn yes_no(flag: bool) -> &'static str { if flag { "Yes" } else { "No" } }

// Sizes arrive as JSON numbers; show 40 rather than 40.0.
fn points(size: f64) -> String {
    if size.fract() == 0.0 { format!("{}", size as i64) } else { format!("{}", size) }
}

pub fn render(view: &ViewModel, opts: RenderOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "🎨 Custom Style Generator");
    let _ = writeln!(out, "Describe your desired presentation style and let AI create a custom theme for you!");
    let _ = writeln!(out);

    let _ = writeln!(out, "Try these examples:");
    for (i, example) in view.examples.iter().enumerate() {
        let _ = writeln!(out, "  [{}] {}", i + 1, truncate(example, 30));
    }
    let _ = writeln!(out);

    if view.prompt.is_empty() {
        let _ = writeln!(out, "Prompt: (empty)");
    } else {
        let _ = writeln!(out, "Prompt: {}", view.prompt);
    }

    let label = if view.loading { "🔄 Generating Style..." } else { "✨ Generate Custom Style" };
    if view.submit_enabled {
        let _ = writeln!(out, "{}", label);
    } else {
        let _ = writeln!(out, "{} [disabled]", label);
    }

    if let Some(error) = &view.error {
        let _ = writeln!(out);
        let _ = writeln!(out, "⚠️ {}", error);
    }

    if let Some(style) = &view.style {
        let _ = writeln!(out);
        out.push_str(&render_preview(style, opts));
    }
    out
}

pub fn render_preview(style: &StyleResult, opts: RenderOptions) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "✨ {}", style.theme_name);
    let _ = writeln!(out, "{}", style.style_description);
    let _ = writeln!(out);

    let _ = writeln!(out, "Colors:");
    for (label, color) in [
        ("Primary", &style.primary_color),
        ("Secondary", &style.secondary_color),
        ("Accent", &style.accent_color),
        ("Background", &style.background_color),
        ("Text", &style.text_color),
    ] {
        let _ = writeln!(out, "  {} {}", swatch(color, label, opts.color), color);
    }

    let _ = writeln!(out, "Fonts:");
    let _ = writeln!(out, "  - Title: {} ({}pt)", style.title_font, points(style.title_size));
    let _ = writeln!(out, "  - Body: {} ({}pt)", style.body_font, points(style.body_size));

    let _ = writeln!(out, "Style Details:");
    let _ = writeln!(out, "  - Mood: {}", style.mood);
    let _ = writeln!(out, "  - Layout: {}", style.layout_style);
    let _ = writeln!(out, "  - Gradients: {}", yes_no(style.use_gradients));
    let _ = writeln!(out, "  - Shadows: {}", yes_no(style.use_shadows));
    if let Some(placeholder) = style.image_placeholder_style {
        let _ = writeln!(
            out,
            "  - Image placeholders: {}",
            placeholder_color(placeholder, &style.background_color).to_hex()
        );
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "✅ Use This Style");
    out
}
