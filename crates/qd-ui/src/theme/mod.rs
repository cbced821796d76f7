//! Night-map theme built from the dashboard palette

use std::collections::BTreeMap;

use egui::{Color32, Context, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};

use qd_core::MagnitudeBand;
use qd_views::colors;

/// Theme configuration
pub struct Theme {
    pub dark_mode: bool,
}

impl Default for Theme {
    fn default() -> Self {
        Self { dark_mode: true }
    }
}

/// Fill colors for the dark theme, lifted step by step from the map background
struct Palette {
    panel: Color32,
    widget: Color32,
    hover: Color32,
    active: Color32,
    text: Color32,
}

impl Palette {
    fn night() -> Self {
        Self {
            panel: lighten(colors::BACKGROUND, 8),
            widget: lighten(colors::BACKGROUND, 20),
            hover: lighten(colors::BACKGROUND, 34),
            active: lighten(colors::BACKGROUND, 46),
            text: Color32::from_rgb(226, 232, 240),
        }
    }
}

fn lighten(color: Color32, amount: u8) -> Color32 {
    Color32::from_rgb(
        color.r().saturating_add(amount),
        color.g().saturating_add(amount),
        color.b().saturating_add(amount),
    )
}

/// Apply the dashboard theme
pub fn apply_theme(ctx: &Context, theme: &Theme) {
    let mut visuals = if theme.dark_mode {
        night_visuals()
    } else {
        Visuals::light()
    };
    visuals.selection.bg_fill = accent_color().linear_multiply(0.3);
    visuals.selection.stroke = Stroke::new(1.0, accent_color());
    visuals.hyperlink_color = accent_color();
    visuals.error_fg_color = error_color();

    let mut style = Style::default();
    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    style.spacing.slider_width = 180.0;
    style.text_styles = text_styles();

    ctx.set_style(style);
    ctx.set_visuals(visuals);
}

fn night_visuals() -> Visuals {
    let palette = Palette::night();
    let mut visuals = Visuals::dark();

    visuals.window_fill = palette.panel;
    visuals.panel_fill = palette.panel;
    visuals.extreme_bg_color = colors::BACKGROUND;
    visuals.faint_bg_color = palette.widget;
    visuals.code_bg_color = palette.widget;

    let states = [
        (&mut visuals.widgets.noninteractive, palette.widget, colors::GRATICULE),
        (&mut visuals.widgets.inactive, palette.widget, palette.hover),
        (&mut visuals.widgets.hovered, palette.hover, palette.active),
        (&mut visuals.widgets.active, palette.active, accent_color()),
    ];
    for (widget, fill, outline) in states {
        widget.bg_fill = fill;
        widget.weak_bg_fill = fill;
        widget.bg_stroke = Stroke::new(1.0, outline);
        widget.fg_stroke = Stroke::new(1.0, palette.text);
        widget.rounding = Rounding::same(4.0);
    }
    visuals
}

fn text_styles() -> BTreeMap<TextStyle, FontId> {
    [
        (TextStyle::Small, FontId::new(11.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(13.0, FontFamily::Proportional)),
        (TextStyle::Button, FontId::new(13.0, FontFamily::Proportional)),
        (TextStyle::Heading, FontId::new(20.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(12.0, FontFamily::Monospace)),
    ]
    .into()
}

/// Same blue as the timeline's count columns
pub fn accent_color() -> Color32 {
    colors::COUNT_BARS
}

pub fn error_color() -> Color32 {
    colors::band_color(MagnitudeBand::Strong)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_night_theme_uses_map_palette() {
        let ctx = Context::default();
        apply_theme(&ctx, &Theme::default());

        let style = ctx.style();
        assert_eq!(style.visuals.extreme_bg_color, colors::BACKGROUND);
        assert_eq!(style.visuals.selection.stroke.color, colors::COUNT_BARS);
        assert_eq!(style.visuals.widgets.active.bg_stroke.color, colors::COUNT_BARS);
        assert!(style.visuals.dark_mode);
    }

    #[test]
    fn test_light_theme_keeps_accent() {
        let ctx = Context::default();
        apply_theme(&ctx, &Theme { dark_mode: false });

        let style = ctx.style();
        assert!(!style.visuals.dark_mode);
        assert_eq!(style.visuals.hyperlink_color, accent_color());
    }

    #[test]
    fn test_lighten_saturates() {
        assert_eq!(lighten(Color32::from_rgb(250, 10, 0), 10), Color32::from_rgb(255, 20, 10));
    }
}
