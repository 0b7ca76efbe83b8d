//! HTML fragments for individual widgets.

use serde_json::Value;

use crate::types::{DecodedWidget, Escaping, WidgetData, WidgetKind};

/// Render one decoded widget. Unsupported types render as an empty string.
pub fn render_widget(widget: &DecodedWidget, escaping: Escaping) -> String {
    match &widget.kind {
        WidgetKind::Text => render_text(widget, escaping),
        WidgetKind::Image => render_image(widget, escaping),
        WidgetKind::Shape => render_shape(widget, escaping),
        WidgetKind::Unknown(_) => String::new(),
    }
}

fn render_text(widget: &DecodedWidget, escaping: Escaping) -> String {
    format!(
        r#"<div class="widget-container" style="left: {}px; top: {}px;"><p style="font-size: {}px; color: {};">{}</p></div>"#,
        px(widget.position.x),
        px(widget.position.y),
        data_text(&widget.data, "fontSize", escaping),
        data_text(&widget.data, "fontColor", escaping),
        data_text(&widget.data, "text", escaping),
    )
}

fn render_image(widget: &DecodedWidget, escaping: Escaping) -> String {
    format!(
        r#"<div class="widget-container" style="left: {}px; top: {}px;"><img src="{}" alt="Image" style="width: {}px; height: {}px;" /></div>"#,
        px(widget.position.x),
        px(widget.position.y),
        data_text(&widget.data, "imageUrl", escaping),
        px(widget.size.width),
        px(widget.size.height),
    )
}

fn render_shape(widget: &DecodedWidget, escaping: Escaping) -> String {
    format!(
        r#"<div class="widget-container" style="left: {}px; top: {}px; width: {}px; height: {}px; background-color: {};"></div>"#,
        px(widget.position.x),
        px(widget.position.y),
        px(widget.size.width),
        px(widget.size.height),
        data_text(&widget.data, "color", escaping),
    )
}

/// Format a pixel value the way it was stored: `10` stays `10`, `10.5` stays `10.5`.
pub fn px(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Text form of a data member; missing and `null` members are empty.
fn data_text(data: &WidgetData, key: &str, escaping: Escaping) -> String {
    let raw = match data.get(key) {
        None | Some(Value::Null) => return String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };
    escape(&raw, escaping)
}

/// Apply `escaping` to a stored string before it is placed in markup.
pub fn escape(s: &str, escaping: Escaping) -> String {
    match escaping {
        Escaping::Html => escape_html(s),
        Escaping::Raw => s.to_string(),
    }
}

/// Escape text for both element content and double-quoted attribute values.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
