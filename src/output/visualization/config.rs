//! Plot configuration shared across visualization functions

use plotters::prelude::*;

/// Configuration for customizing plots
///
/// # Fields
///
/// - `width`, `height`: Dimensions in pixels
/// - `title`: Plot title
/// - `xlabel`, `ylabel`: Axis labels
/// - `stage_colors`: Optional colors, one per stage
/// - `background`: Background color
/// - `line_width`: Line thickness in pixels
/// - `show_grid`: Whether to show grid lines
/// - `marker_spacing`: Time points between two species-B markers
///
/// # Example
///
/// ```rust
/// use leach_rs::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::cascade("Column test 3");
/// config.stage_colors = Some(vec![BLUE, RED, GREEN, MAGENTA]);
/// config.width = 1920;
/// assert_eq!(config.xlabel, "Irrigation time (h)");
/// ```
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: "Plot")
    pub title: String,

    /// X-axis label (default: auto-set by plot type)
    pub xlabel: String,

    /// Y-axis label (default: "Concentration (g/L)")
    pub ylabel: String,

    /// Optional colors for stages (one per stage)
    ///
    /// If None, uses default palette: [BLUE, RED, GREEN, MAGENTA, CYAN, ...]
    pub stage_colors: Option<Vec<RGBColor>>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Show grid lines (default: true)
    pub show_grid: bool,

    /// Draw a species-B marker every `marker_spacing` time points (default: 40)
    pub marker_spacing: usize,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Plot".to_string(),
            xlabel: String::new(), // Set by specific plot type
            ylabel: "Concentration (g/L)".to_string(),
            stage_colors: None,
            background: WHITE,
            line_width: 2,
            show_grid: true,
            marker_spacing: 40,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (default title will be used)
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    /// Create config for cascade concentration curves with optional custom title
    ///
    /// Sets xlabel to "Irrigation time (h)" and title to custom value or
    /// "Concentration vs. Time"
    ///
    /// ```rust,ignore
    /// let config = PlotConfig::cascade("Heap 4, q = 0.0002");
    /// let config = PlotConfig::cascade(NO_TITLE);
    /// ```
    pub fn cascade(title: impl IntoOptionalTitle) -> Self {
        Self {
            xlabel: "Irrigation time (h)".to_string(),
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Concentration vs. Time".to_string()),
            ..Self::default()
        }
    }

    /// Get color for stage at index i
    ///
    /// Uses custom colors if provided, otherwise falls back to default palette
    pub(crate) fn get_stage_color(&self, stage_index: usize) -> RGBColor {
        if let Some(colors) = &self.stage_colors
            && stage_index < colors.len()
        {
            return colors[stage_index];
        }

        // Default palette
        const DEFAULT_COLORS: [RGBColor; 8] = [
            BLUE,
            RED,
            GREEN,
            MAGENTA,
            CYAN,
            BLACK,
            RGBColor(255, 165, 0), // Orange
            RGBColor(128, 0, 128), // Purple
        ];

        DEFAULT_COLORS[stage_index % DEFAULT_COLORS.len()]
    }
}

// =================================================================================================
// Tests
// =================================================================================================
