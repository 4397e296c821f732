use std::time::Duration;

pub const SERVICE_URL: &str = "https://catacombing.org/isotopia/";

// Pending builds are re-checked by reloading once after this delay
pub const POLL_DELAY: Duration = Duration::from_secs(30);

pub const CONFIG_DIR_NAME: &str = "isotopia";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const STATE_FILE_NAME: &str = "address";

// Audio backend packages
pub const PULSEAUDIO_PACKAGE: &str = "pulseaudio";
pub const PIPEWIRE_PACKAGE: &str = "pipewire-pulse";

/// Packages and option states a desktop environment brings along.
///
/// `locked` options are forced on and cannot be deselected, `defaults` are forced on
/// but remain editable.
pub struct DePreset {
    pub mandatory: &'static [&'static str],
    pub locked: &'static [&'static str],
    pub defaults: &'static [&'static str],
}

pub const CATACOMB_PRESET: DePreset = DePreset {
    mandatory: &["catacomb-meta", "tremor", "tinydm"],
    locked: &[
        "comp-catacomb",
        "osk-squeekboard",
        "launcher-tzompantli",
        "panel-epitaph",
        "misc-swayidle",
    ],
    defaults: &[
        "wp-tabula",
        "browser-kumo",
        "terminal-alacritty",
        "clock-catacomb",
        "camera-megapixels",
        "misc-grim",
        "misc-wfrecorder",
    ],
};

pub const SXMO_PRESET: DePreset = DePreset {
    mandatory: &["danctnix-sxmo-ui-meta", "sxmo-utils-sway", "glibc-locales"],
    locked: &[
        "comp-sway",
        "osk-wvkbd",
        "launcher-bemenu",
        "wp-swaybg",
        "terminal-foot",
        "img-imv",
        "misc-swayidle",
        "misc-grim",
        "misc-mako",
    ],
    defaults: &["camera-megapixels", "editor-vim"],
};

pub const PHOSH_PRESET: DePreset = DePreset {
    mandatory: &[
        "danctnix-phosh-ui-meta",
        "danctnix-tweaks-app-phosh",
        "cups",
        "cups-filters",
        "evince-mobile",
        "geary",
        "ghostscript",
        "glibc-locales",
        "gnome-calculator",
        "gnome-calendar-mobile",
        "gnome-contacts-mobile",
        "gnome-sound-recorder",
        "gnome-usage",
        "gnome-weather",
        "gsfonts",
        "gst-plugins-bad",
        "gst-plugins-good",
        "gtk3-mobile",
        "mesa",
        "mmsd-tng",
        "networkmanager-openvpn",
        "noto-fonts-emoji",
        "power-profiles-daemon",
        "xdg-user-dirs",
    ],
    locked: &[],
    defaults: &[
        "osk-squeekboard",
        "browser-ff-mobile",
        "terminal-gnome",
        "editor-gnome",
        "clock-gnome",
        "calls-gnome",
        "sms-chatty",
        "camera-megapixels",
        "music-lollypop",
        "img-eog",
        "fm-portfolio",
        "maps-gnome",
    ],
};

pub const PLASMA_PRESET: DePreset = DePreset {
    mandatory: &[
        "buho",
        "calindori",
        "cups",
        "cups-filters",
        "danctnix-pm-ui-meta",
        "discover",
        "ghostscript",
        "glibc-locales",
        "gsfonts",
        "gst-plugins-bad",
        "gst-plugins-good",
        "kaccounts-providers",
        "kalk",
        "kweather",
        "mesa",
        "modemmanager",
        "networkmanager-openvpn",
        "noto-fonts",
        "noto-fonts-cjk",
        "noto-fonts-emoji",
        "packagekit-qt6",
        "plasma",
        "plasma-mobile-autologin",
        "plasma-mobile-sounds",
        "plasma-phonebook",
        "plasma-settings",
        "xdg-desktop-portal-kde",
        "xdg-user-dirs",
    ],
    locked: &["osk-maliit"],
    defaults: &[
        "browser-angelfish",
        "terminal-qmlkonsole",
        "editor-maui",
        "clock-kclock",
        "calls-plasma",
        "sms-spacebar",
        "camera-megapixels",
        "music-elisa",
        "img-koko",
        "fm-indexfm",
    ],
};

// Every selectable optional package as (identifier, space separated package names).
// The built-in catalog installs each option under its own identifier, config.toml
// can point an identifier at different packages.
pub const OPTION_CATALOG: &[(&str, &str)] = &[
    ("comp-catacomb", "comp-catacomb"),
    ("comp-sway", "comp-sway"),
    ("osk-squeekboard", "osk-squeekboard"),
    ("osk-wvkbd", "osk-wvkbd"),
    ("osk-maliit", "osk-maliit"),
    ("launcher-tzompantli", "launcher-tzompantli"),
    ("launcher-bemenu", "launcher-bemenu"),
    ("panel-epitaph", "panel-epitaph"),
    ("wp-tabula", "wp-tabula"),
    ("wp-swaybg", "wp-swaybg"),
    ("browser-kumo", "browser-kumo"),
    ("browser-ff-mobile", "browser-ff-mobile"),
    ("browser-angelfish", "browser-angelfish"),
    ("terminal-alacritty", "terminal-alacritty"),
    ("terminal-foot", "terminal-foot"),
    ("terminal-gnome", "terminal-gnome"),
    ("terminal-qmlkonsole", "terminal-qmlkonsole"),
    ("editor-vim", "editor-vim"),
    ("editor-gnome", "editor-gnome"),
    ("editor-maui", "editor-maui"),
    ("clock-catacomb", "clock-catacomb"),
    ("clock-gnome", "clock-gnome"),
    ("clock-kclock", "clock-kclock"),
    ("calls-gnome", "calls-gnome"),
    ("calls-plasma", "calls-plasma"),
    ("sms-chatty", "sms-chatty"),
    ("sms-spacebar", "sms-spacebar"),
    ("camera-megapixels", "camera-megapixels"),
    ("music-lollypop", "music-lollypop"),
    ("music-elisa", "music-elisa"),
    ("img-imv", "img-imv"),
    ("img-eog", "img-eog"),
    ("img-koko", "img-koko"),
    ("fm-portfolio", "fm-portfolio"),
    ("fm-indexfm", "fm-indexfm"),
    ("maps-gnome", "maps-gnome"),
    ("misc-swayidle", "misc-swayidle"),
    ("misc-grim", "misc-grim"),
    ("misc-mako", "misc-mako"),
    ("misc-wfrecorder", "misc-wfrecorder"),
];
