//! Decoding of the JSON-encoded attribute blobs stored on each widget.
//!
//! Every blob is decoded on its own. A blob that is empty, not JSON, or JSON
//! of the wrong shape falls back to that field's default; the other two
//! fields are unaffected, and the widget is still rendered.

use serde::de::DeserializeOwned;

use crate::types::{
    AttributeDecodeError, AttributeField, DecodedWidget, Position, Size, WidgetData, WidgetKind,
    WidgetRecord,
};

/// Decode a `{"x": number, "y": number}` blob.
pub fn try_decode_position(raw: &str) -> Result<Position, AttributeDecodeError> {
    decode_json(raw, AttributeField::Position)
}

/// Decode a `{"width": number, "height": number}` blob.
pub fn try_decode_size(raw: &str) -> Result<Size, AttributeDecodeError> {
    decode_json(raw, AttributeField::Size)
}

/// Decode the type-specific payload. Anything but a JSON object is rejected.
pub fn try_decode_data(raw: &str) -> Result<WidgetData, AttributeDecodeError> {
    decode_json(raw, AttributeField::Data)
}

fn decode_json<T: DeserializeOwned>(
    raw: &str,
    field: AttributeField,
) -> Result<T, AttributeDecodeError> {
    if raw.trim().is_empty() {
        return Err(AttributeDecodeError {
            field,
            reason: "empty value".to_string(),
        });
    }
    serde_json::from_str(raw).map_err(|e| AttributeDecodeError {
        field,
        reason: e.to_string(),
    })
}

/// Decode all three attribute blobs of a widget, substituting defaults.
pub fn decode_widget(record: &WidgetRecord) -> DecodedWidget {
    let data = try_decode_data(&record.data).unwrap_or_else(|e| {
        tracing::warn!("Widget '{}': {e}; using empty data", record.id);
        WidgetData::new()
    });
    let position = try_decode_position(&record.position).unwrap_or_else(|e| {
        tracing::warn!("Widget '{}': {e}; using (0, 0)", record.id);
        Position::default()
    });
    let size = try_decode_size(&record.size).unwrap_or_else(|e| {
        tracing::warn!("Widget '{}': {e}; using 100x100", record.id);
        Size::default()
    });

    DecodedWidget {
        id: record.id.clone(),
        kind: WidgetKind::parse(&record.widget_type),
        position,
        size,
        data,
        z_index: record.z_index.unwrap_or(0),
    }
}

/// Every attribute blob of `record` that would fall back to its default.
pub fn attribute_issues(record: &WidgetRecord) -> Vec<AttributeDecodeError> {
    [
        try_decode_data(&record.data).err(),
        try_decode_position(&record.position).err(),
        try_decode_size(&record.size).err(),
    ]
    .into_iter()
    .flatten()
    .collect()
}
