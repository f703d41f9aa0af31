use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub background: Srgba<f64>,
    pub label: Srgba<f64>,
    pub error: Srgba<f64>,
    pub placeholder: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            background: Self::lookup_color(
                context,
                "theme_base_color",
                Srgba::new(0.94, 0.94, 0.94, 1.0),
                Some(1.0),
            ),
            label: Self::lookup_color(
                context,
                "theme_text_color",
                Srgba::new(0.0, 0.0, 0.0, 1.0),
                None,
            ),
            error: Self::lookup_color(
                context,
                "error_color",
                Srgba::new(1.0, 0.0, 0.0, 1.0),
                Some(1.0),
            ),
            placeholder: Self::lookup_color(
                context,
                "insensitive_bg_color",
                Srgba::new(0.6, 0.6, 0.6, 0.35),
                Some(0.35),
            ),
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
.carousel-canvas {
    background: none;
    background-color: transparent;
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
