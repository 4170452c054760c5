use eframe::egui::{
    self,
    style::{
        Selection,
        WidgetVisuals,
    },
    Color32,
    RichText,
    Stroke,
    Visuals,
};

#[derive(Clone)]
pub struct Theme {
    dark: Palette,
    light: Palette,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dracula()
    }
}

impl Theme {
    pub fn dracula() -> Self {
        Theme { dark: Palette::dracula(), light: Palette::dracula_light() }
    }

    pub fn palette(&self, ctx: &egui::Context) -> &Palette {
        if ctx.style().visuals.dark_mode {
            &self.dark
        } else {
            &self.light
        }
    }

    pub fn heading(&self, ctx: &egui::Context, content: &str) -> RichText {
        RichText::new(content).color(self.palette(ctx).purple).strong()
    }

    pub fn label(&self, ctx: &egui::Context, content: &str) -> RichText {
        RichText::new(content).color(self.palette(ctx).comment)
    }
}

/// Colours from the Dracula scheme; the light variant is a softened take on it.
#[derive(Clone)]
pub struct Palette {
    pub background: Color32,
    pub foreground: Color32,
    pub selection: Color32,
    pub comment: Color32,
    pub red: Color32,
    pub orange: Color32,
    pub green: Color32,
    pub purple: Color32,
    pub cyan: Color32,
    pub pink: Color32,
    pub background_dark: Color32,
    pub background_light: Color32,
}

impl Palette {
    fn dracula() -> Self {
        Self {
            background: Color32::from_rgb(0x28, 0x2a, 0x36),
            foreground: Color32::from_rgb(0xf8, 0xf8, 0xf2),
            selection: Color32::from_rgb(0x44, 0x47, 0x5a),
            comment: Color32::from_rgb(0x62, 0x72, 0xa4),
            red: Color32::from_rgb(0xff, 0x55, 0x55),
            orange: Color32::from_rgb(0xff, 0xb8, 0x6c),
            green: Color32::from_rgb(0x50, 0xfa, 0x7b),
            purple: Color32::from_rgb(189, 147, 249),
            cyan: Color32::from_rgb(139, 233, 253),
            pink: Color32::from_rgb(255, 121, 198),
            background_dark: Color32::from_rgb(33, 35, 53),
            background_light: Color32::from_rgb(52, 54, 66),
        }
    }

    fn dracula_light() -> Self {
        Self {
            background: Color32::from_rgb(248, 248, 242),
            foreground: Color32::from_rgb(40, 42, 54),
            selection: Color32::from_rgb(200, 200, 220),
            comment: Color32::from_rgb(120, 130, 160),
            red: Color32::from_rgb(200, 80, 80),
            orange: Color32::from_rgb(220, 150, 90),
            green: Color32::from_rgb(80, 200, 120),
            purple: Color32::from_rgb(150, 120, 220),
            cyan: Color32::from_rgb(80, 190, 230),
            pink: Color32::from_rgb(230, 130, 200),
            background_dark: Color32::from_rgb(245, 245, 240),
            background_light: Color32::from_rgb(255, 255, 250),
        }
    }
}

pub fn set_theme(ctx: &egui::Context, theme: &Theme) {
    set_theme_variant(ctx, &theme.dark, true);
    set_theme_variant(ctx, &theme.light, false);
}

pub fn with_alpha(color: Color32, alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}

fn set_theme_variant(ctx: &egui::Context, palette: &Palette, is_dark: bool) {
    let (default, variant) = match is_dark {
        true => (Visuals::dark(), egui::Theme::Dark),
        false => (Visuals::light(), egui::Theme::Light),
    };

    let widget = |base: WidgetVisuals, fill: Color32, stroke: Color32| WidgetVisuals {
        bg_fill: fill,
        weak_bg_fill: fill,
        bg_stroke: Stroke { color: stroke, ..base.bg_stroke },
        fg_stroke: Stroke { color: palette.foreground, ..base.fg_stroke },
        ..base
    };

    let mut visuals = Visuals {
        dark_mode: is_dark,
        selection: Selection {
            bg_fill: palette.selection,
            stroke: Stroke { color: palette.foreground, ..default.selection.stroke },
        },
        hyperlink_color: palette.cyan,
        error_fg_color: palette.red,
        warn_fg_color: palette.orange,
        window_fill: palette.background,
        panel_fill: palette.background_dark,
        extreme_bg_color: palette.background,
        ..default.clone()
    };

    visuals.widgets.noninteractive =
        widget(default.widgets.noninteractive, palette.background, palette.background_dark);
    visuals.widgets.inactive =
        widget(default.widgets.inactive, palette.background_light, palette.background_dark);
    visuals.widgets.hovered = widget(default.widgets.hovered, palette.selection, palette.cyan);
    visuals.widgets.active = widget(default.widgets.active, palette.selection, palette.cyan);

    ctx.set_visuals_of(variant, visuals);
}
