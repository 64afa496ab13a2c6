use dial::Preferences;
use dial::color::Color;
use gtk::gdk;
use gtk4 as gtk;
use palette::Srgb;

pub struct FaceColors {
    pub background: Srgb<f64>,
    pub hand: Srgb<f64>,
    pub dot: Srgb<f64>,
    pub hour: Srgb<f64>,
    pub hand_outline: Option<Srgb<f64>>,
}

impl FaceColors {
    pub fn from_prefs(prefs: &Preferences) -> Self {
        Self {
            background: Self::to_cairo(prefs.background),
            hand: Self::to_cairo(prefs.hand),
            dot: Self::to_cairo(prefs.dot),
            hour: Self::to_cairo(prefs.hour),
            hand_outline: prefs.hand_outline.map(Self::to_cairo),
        }
    }

    fn to_cairo(color: Color) -> Srgb<f64> {
        color.rgb().into_format()
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.macroclock-window, .macroclock-face {
    background: none;
    background-color: black;
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
