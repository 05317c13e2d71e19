/// Configuration for the GPUI scatter view.
#[derive(Debug, Clone)]
pub struct ChartViewConfig {
    /// Keep the logical canvas aspect ratio when fitting it into the view
    /// bounds. When off, each axis stretches independently.
    pub preserve_aspect: bool,
    /// Font family used for all chart text.
    pub font_family: String,
}

impl Default for ChartViewConfig {
    fn default() -> Self {
        Self {
            preserve_aspect: true,
            font_family: ".SystemUIFont".to_string(),
        }
    }
}
