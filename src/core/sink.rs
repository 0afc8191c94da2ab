//! Display sinks.

use std::io::Write;

use crate::state::DisplayState;

/// Receiver of derived display states.
///
/// Each call hands over one complete value; a sink never sees a partial update.
pub trait DisplaySink {
    fn show(&mut self, state: DisplayState);
}

/// Writes every display state as one JSON line.
pub struct JsonLineSink<W: Write> {
    writer: W,
    icon_dir: Option<std::path::PathBuf>,
}

impl<W: Write> JsonLineSink<W> {
    pub fn new(writer: W, icon_dir: Option<std::path::PathBuf>) -> Self {
        Self { writer, icon_dir }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DisplaySink for JsonLineSink<W> {
    fn show(&mut self, state: DisplayState) {
        let icon = crate::core::icons::resolve_icon(self.icon_dir.as_deref(), state.icon_key);
        let line = serde_json::json!({
            "icon_key": state.icon_key,
            "icon": icon.to_string(),
            "hover_text": state.hover_text,
            "panel_label": state.panel_label,
        });
        if let Err(e) = writeln!(self.writer, "{line}").and_then(|()| self.writer.flush()) {
            tracing::warn!(error = %e, "failed to write status line");
        }
    }
}
