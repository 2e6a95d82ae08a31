//! Plot configuration shared across visualization functions

use plotters::prelude::*;

/// Configuration for customizing plots
///
/// # Example
///
/// ```rust
/// use heateq::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::profile("Final temperature");
/// config.line_color = BLUE;
/// config.width = 1920;
/// config.height = 1080;
/// assert_eq!(config.xlabel, "x (m)");
/// ```
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title, no caption when empty (default: "Plot")
    pub title: String,

    /// X-axis label
    pub xlabel: String,

    /// Y-axis label (default: "Temperature (K)")
    pub ylabel: String,

    /// Line color for single-profile plots (default: RED)
    pub line_color: RGBColor,

    /// Colors for multi-profile plots; falls back to a fixed palette
    pub series_colors: Option<Vec<RGBColor>>,

    /// Background color (default: WHITE)
    pub background: RGBColor,

    /// Line width in pixels (default: 2)
    pub line_width: u32,

    /// Draw axes, tick labels and grid lines (default: true)
    pub show_grid: bool,

    /// Draw the series legend (default: true)
    pub show_legend: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Plot".to_string(),
            xlabel: String::new(),
            ylabel: "Temperature (K)".to_string(),
            line_color: RED,
            series_colors: None,
            background: WHITE,
            line_width: 2,
            show_grid: true,
            show_legend: true,
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

/// No custom title: the default title of the plot type is used
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    /// Config for temperature profiles `u(x)`
    ///
    /// Sets xlabel to "x (m)" and title to the custom value or
    /// "Temperature Profile".
    pub fn profile(title: impl IntoOptionalTitle) -> Self {
        Self {
            xlabel: "x (m)".to_string(),
            title: title
                .into_optional_title()
                .unwrap_or_else(|| "Temperature Profile".to_string()),
            ..Self::default()
        }
    }

    /// Bare lines: no caption, axes or legend
    pub fn minimal() -> Self {
        Self {
            title: String::new(),
            show_grid: false,
            show_legend: false,
            ..Self::profile(NO_TITLE)
        }
    }

    /// Color of series `index`
    pub(crate) fn series_color(&self, index: usize) -> RGBColor {
        if let Some(colors) = &self.series_colors
            && index < colors.len()
        {
            return colors[index];
        }

        const PALETTE: [RGBColor; 8] = [
            RED,
            BLUE,
            GREEN,
            MAGENTA,
            CYAN,
            BLACK,
            RGBColor(255, 165, 0),
            RGBColor(128, 0, 128),
        ];

        PALETTE[index % PALETTE.len()]
    }
}

// =================================================================================================
// Tests
// =================================================================================================
