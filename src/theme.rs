use std::sync::{Arc, Mutex};

use chrono::{Local, Timelike};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Duration, interval};

use crate::storage::Storage;

const THEME_KEY: &str = "bilemedilema-theme";
const AUTO_SWITCH_KEY: &str = "bilemedilema-auto-switch";
const AUTO_SWITCH_PERIOD: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: &'static str,
    pub text: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub border: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub key: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub colors: Palette,
}

pub const THEMES: [Theme; 5] = [
    Theme {
        key: "light",
        name: "Açık Tema",
        icon: "☀️",
        colors: Palette {
            bg: "#FFFFFF",
            text: "#111827",
            primary: "#8B5CF6",
            secondary: "#F3F4F6",
            border: "#E5E7EB",
        },
    },
    Theme {
        key: "dark",
        name: "Koyu Tema",
        icon: "🌙",
        colors: Palette {
            bg: "#1F2937",
            text: "#F9FAFB",
            primary: "#A78BFA",
            secondary: "#374151",
            border: "#4B5563",
        },
    },
    Theme {
        key: "midnight",
        name: "Gece Yarısı",
        icon: "🌃",
        colors: Palette {
            bg: "#0F172A",
            text: "#F1F5F9",
            primary: "#818CF8",
            secondary: "#1E293B",
            border: "#334155",
        },
    },
    Theme {
        key: "ocean",
        name: "Okyanus",
        icon: "🌊",
        colors: Palette {
            bg: "#0C4A6E",
            text: "#F0F9FF",
            primary: "#38BDF8",
            secondary: "#075985",
            border: "#0369A1",
        },
    },
    Theme {
        key: "forest",
        name: "Orman",
        icon: "🌲",
        colors: Palette {
            bg: "#14532D",
            text: "#F0FDF4",
            primary: "#4ADE80",
            secondary: "#166534",
            border: "#15803D",
        },
    },
];

pub fn theme_by_key(key: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|theme| theme.key == key)
}

/// The palette as CSS custom-property pairs, ready to set on the document
/// root.
pub fn css_variables(theme: &Theme) -> [(&'static str, &'static str); 5] {
    [
        ("--theme-bg", theme.colors.bg),
        ("--theme-text", theme.colors.text),
        ("--theme-primary", theme.colors.primary),
        ("--theme-secondary", theme.colors.secondary),
        ("--theme-border", theme.colors.border),
    ]
}

/// Every theme except light also raises the legacy dark flag.
pub fn is_dark(theme: &Theme) -> bool {
    theme.key != "light"
}

/// Which key the day/night automation wants right now, if a switch is due.
/// Daytime (06:00–18:00) forces light; night only darkens an explicit light
/// theme and leaves the fancier dark variants alone.
fn auto_switch_target(hour: u32, current_key: &str) -> Option<&'static str> {
    if (6..18).contains(&hour) {
        (current_key != "light").then_some("light")
    } else {
        (current_key == "light").then_some("dark")
    }
}

/// Owns the active theme and the persisted auto-switch preference. Changes
/// fan out over a watch channel so the host can restyle when the automation
/// flips the theme at dusk.
pub struct ThemeSwitcher {
    storage: Arc<dyn Storage>,
    current: Arc<Mutex<&'static Theme>>,
    changes: Arc<watch::Sender<&'static Theme>>,
    auto_switch: bool,
    auto_task: Option<JoinHandle<()>>,
}

impl ThemeSwitcher {
    /// Restore the persisted theme (falling back to light) without starting
    /// the automation; call [`Self::set_auto_switch`] once a runtime exists.
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        let current = storage
            .get(THEME_KEY)
            .as_deref()
            .and_then(theme_by_key)
            .unwrap_or(&THEMES[0]);
        let auto_switch = storage.get(AUTO_SWITCH_KEY).as_deref() == Some("true");
        let (changes, _) = watch::channel(current);
        Self {
            storage,
            current: Arc::new(Mutex::new(current)),
            changes: Arc::new(changes),
            auto_switch,
            auto_task: None,
        }
    }

    pub fn current(&self) -> &'static Theme {
        *self.current.lock().unwrap()
    }

    pub fn auto_switch(&self) -> bool {
        self.auto_switch
    }

    pub fn subscribe(&self) -> watch::Receiver<&'static Theme> {
        self.changes.subscribe()
    }

    /// Select a theme by key and persist the choice. Unknown keys change
    /// nothing.
    pub fn apply(&self, key: &str) -> Option<&'static Theme> {
        apply_theme(&self.storage, &self.current, &self.changes, key)
    }

    pub fn set_auto_switch(&mut self, enabled: bool) {
        self.auto_switch = enabled;
        self.storage
            .set(AUTO_SWITCH_KEY, if enabled { "true" } else { "false" });
        if enabled {
            self.start_auto_task();
        } else if let Some(task) = self.auto_task.take() {
            task.abort();
        }
    }

    fn start_auto_task(&mut self) {
        if self.auto_task.is_some() {
            return;
        }
        let storage = self.storage.clone();
        let current = self.current.clone();
        let changes = self.changes.clone();
        self.auto_task = Some(tokio::spawn(async move {
            let mut tick = interval(AUTO_SWITCH_PERIOD);
            loop {
                tick.tick().await;
                let hour = Local::now().hour();
                let current_key = current.lock().unwrap().key;
                if let Some(target) = auto_switch_target(hour, current_key) {
                    apply_theme(&storage, &current, &changes, target);
                }
            }
        }));
    }
}

fn apply_theme(
    storage: &Arc<dyn Storage>,
    current: &Arc<Mutex<&'static Theme>>,
    changes: &watch::Sender<&'static Theme>,
    key: &str,
) -> Option<&'static Theme> {
    let theme = theme_by_key(key)?;
    *current.lock().unwrap() = theme;
    storage.set(THEME_KEY, theme.key);
    let _ = changes.send(theme);
    Some(theme)
}

impl Drop for ThemeSwitcher {
    fn drop(&mut self) {
        if let Some(task) = self.auto_task.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn falls_back_to_light() {
        let switcher = ThemeSwitcher::new(Arc::new(MemoryStorage::default()));
        assert_eq!(switcher.current().key, "light");
        assert!(!switcher.auto_switch());
        assert!(!is_dark(switcher.current()));
    }

    #[test]
    fn apply_persists_and_notifies() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::default());
        let switcher = ThemeSwitcher::new(storage.clone());
        let changes = switcher.subscribe();

        let theme = switcher.apply("ocean").unwrap();
        assert_eq!(theme.name, "Okyanus");
        assert!(is_dark(theme));
        assert_eq!(changes.borrow().key, "ocean");
        assert_eq!(storage.get("bilemedilema-theme").as_deref(), Some("ocean"));

        // Unknown keys change nothing.
        assert!(switcher.apply("sepia").is_none());
        assert_eq!(switcher.current().key, "ocean");

        let restored = ThemeSwitcher::new(storage);
        assert_eq!(restored.current().key, "ocean");
    }

    #[test]
    fn css_variables_expose_the_full_palette() {
        let vars = css_variables(&THEMES[0]);
        assert_eq!(vars[0], ("--theme-bg", "#FFFFFF"));
        assert_eq!(vars[2], ("--theme-primary", "#8B5CF6"));
    }

    #[test]
    fn auto_switch_hours() {
        // Daytime forces light from any theme.
        assert_eq!(auto_switch_target(6, "dark"), Some("light"));
        assert_eq!(auto_switch_target(12, "midnight"), Some("light"));
        assert_eq!(auto_switch_target(12, "light"), None);
        // Night only darkens an explicit light theme.
        assert_eq!(auto_switch_target(18, "light"), Some("dark"));
        assert_eq!(auto_switch_target(2, "light"), Some("dark"));
        assert_eq!(auto_switch_target(2, "ocean"), None);
    }
}
