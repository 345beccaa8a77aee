use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub rim: Srgba<f64>,
    pub hub: Srgba<f64>,
    pub placeholder: Srgba<f64>,
    pub pointer: Srgba<f64>,
    pub text: Srgba<f64>,
    pub label: Srgba<f64>,
    pub label_halo: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            rim: Self::lookup_color(
                context,
                "theme_unfocused_bg_color",
                Srgba::new(0.2, 0.25, 0.33, 1.0),
                None,
            ),
            hub: Self::lookup_color(
                context,
                "theme_bg_color",
                Srgba::new(0.12, 0.16, 0.23, 1.0),
                Some(1.0),
            ),
            placeholder: Self::lookup_color(
                context,
                "theme_base_color",
                Srgba::new(0.12, 0.16, 0.23, 1.0),
                None,
            ),
            pointer: Self::lookup_color(
                context,
                "error_color",
                Srgba::new(0.94, 0.27, 0.27, 1.0),
                Some(1.0),
            ),
            text: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.58, 0.64, 0.72, 1.0),
                Some(0.8),
            ),
            // labels sit on bright slice colors in every theme
            label: Srgba::new(0.0, 0.0, 0.0, 1.0),
            label_halo: Srgba::new(1.0, 1.0, 1.0, 0.8),
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
.spinwheel-spin {
    font-size: 1.6em;
    font-weight: bold;
    padding: 12px 48px;
    border-radius: 999px;
}
.spinwheel-ticker {
    font-size: 1.3em;
    font-weight: bold;
}
.spinwheel-winner {
    font-size: 2em;
    font-weight: 800;
    color: @warning_color;
}
.spinwheel-drawing-area {
    background: none;
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
