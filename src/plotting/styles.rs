use plotters::style::{RGBAColor, RGBColor};

/// Tango palette, one color per command in declaration order.
pub const TANGO_COLORS: [RGBColor; 7] = [
    RGBColor(0xcc, 0x00, 0x00), // Scarlet Red
    RGBColor(0x75, 0x50, 0x7b), // Plum
    RGBColor(0x34, 0x65, 0xa4), // Sky Blue
    RGBColor(0x73, 0xd2, 0x16), // Chameleon
    RGBColor(0xc1, 0x7d, 0x11), // Chocolate
    RGBColor(0xf5, 0x79, 0x00), // Orange
    RGBColor(0xed, 0xd4, 0x00), // Butter
];

/// Chart theme configuration
pub struct ChartTheme {
    pub background_color: RGBAColor,
    pub text_color: RGBAColor,
    pub grid_color: RGBAColor,
    pub axis_color: RGBAColor,
    pub legend_background: RGBAColor,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background_color: RGBAColor(255, 255, 255, 1.0),
            text_color: RGBAColor(0, 0, 0, 1.0),
            grid_color: RGBAColor(0, 0, 0, 0.1),
            axis_color: RGBAColor(0, 0, 0, 1.0),
            legend_background: RGBAColor(255, 255, 255, 0.8),
        }
    }
}

/// Chart style configuration
///
/// The default is a 16:9 image at 100 dpi. The bottom half is reserved for the
/// vertical revision labels.
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub line_width: u32,
    pub marker_size: u32,
    pub font_size: u32,
    pub margin_top: u32,
    pub margin_right: u32,
    pub x_label_area_size: u32,
    pub y_label_area_size: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1600,
            height: 900,
            line_width: 2,
            marker_size: 4,
            font_size: 15,
            margin_top: 27,
            margin_right: 48,
            x_label_area_size: 450,
            y_label_area_size: 112,
        }
    }
}
