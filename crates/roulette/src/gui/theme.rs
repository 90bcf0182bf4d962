use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;
use wheelkit::SegmentColor;

pub struct ThemeColors {
    pub red: Srgba<f64>,
    pub black: Srgba<f64>,
    pub rim: Srgba<f64>,
    pub pocket_text: Srgba<f64>,
    pub label_disc: Srgba<f64>,
    pub stopper: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            red: Self::lookup_color(context, "roulette_red", Srgba::new(0.8, 0.1, 0.1, 1.0), None),
            black: Self::lookup_color(
                context,
                "roulette_black",
                Srgba::new(0.08, 0.08, 0.08, 1.0),
                None,
            ),
            rim: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.85, 0.7, 0.3, 1.0),
                Some(0.9),
            ),
            pocket_text: Srgba::new(1.0, 1.0, 1.0, 1.0),
            label_disc: Self::lookup_color(
                context,
                "theme_base_color",
                Srgba::new(0.95, 0.95, 0.95, 1.0),
                Some(0.95),
            ),
            stopper: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                Srgba::new(0.9, 0.75, 0.2, 1.0),
                Some(1.0),
            ),
        }
    }

    pub fn segment(&self, color: SegmentColor) -> Srgba<f64> {
        match color {
            SegmentColor::Red => self.red,
            SegmentColor::Black => self.black,
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
@define-color roulette_red #cc1a1a;
@define-color roulette_black #141414;

.roulette-window, .roulette-drawing-area {
    background-color: #000000;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
