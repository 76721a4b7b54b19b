use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Duration, interval};

pub const CLOSED_LABEL: &str = "Anket Kapandı";
const LAST_FIVE_BANNER: &str = "⚠️ SON 5 DAKİKA!";
const LAST_THIRTY_BANNER: &str = "🔥 SON 30 DAKİKA!";

/// How loudly the remaining time should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Critical,
    Urgent,
    Warning,
    Caution,
    Normal,
    Safe,
}

/// One rendered countdown frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountdownView {
    Closed,
    Open {
        urgency: Urgency,
        time_text: String,
        banner: Option<&'static str>,
        pulse: bool,
    },
}

/// Render the time left until `expires_at` into the tiered display the poll
/// cards use. The tier decides both the wording and the styling hints.
pub fn render_remaining(expires_at: DateTime<Utc>, now: DateTime<Utc>) -> CountdownView {
    let ms = (expires_at - now).num_milliseconds();
    if ms <= 0 {
        return CountdownView::Closed;
    }

    let days = ms / 86_400_000;
    let hours = (ms % 86_400_000) / 3_600_000;
    let minutes = (ms % 3_600_000) / 60_000;
    let seconds = (ms % 60_000) / 1_000;

    let (urgency, time_text, banner) = if ms < 5 * 60_000 {
        (
            Urgency::Critical,
            format!("{minutes}:{seconds:02}"),
            Some(LAST_FIVE_BANNER),
        )
    } else if ms < 30 * 60_000 {
        (
            Urgency::Urgent,
            format!("{minutes} dakika {seconds} saniye"),
            Some(LAST_THIRTY_BANNER),
        )
    } else if ms < 3_600_000 {
        (Urgency::Warning, format!("{minutes} dakika"), None)
    } else if ms < 6 * 3_600_000 {
        (Urgency::Caution, format!("{hours} saat {minutes} dakika"), None)
    } else if ms < 24 * 3_600_000 {
        (Urgency::Normal, format!("{hours} saat"), None)
    } else if days == 1 {
        (Urgency::Safe, format!("1 gün {hours} saat"), None)
    } else {
        (Urgency::Safe, format!("{days} gün"), None)
    };

    CountdownView::Open {
        urgency,
        time_text,
        banner,
        pulse: matches!(urgency, Urgency::Critical | Urgency::Urgent),
    }
}

/// One-second ticker for a poll's expiry. Publishes frames over a watch
/// channel, ends itself when the poll closes, and can be stopped early; the
/// handle dies with its owner.
#[derive(Debug)]
pub struct Countdown {
    handle: JoinHandle<()>,
    view: watch::Receiver<CountdownView>,
}

impl Countdown {
    pub fn start(expires_at: DateTime<Utc>) -> Self {
        let (tx, rx) = watch::channel(render_remaining(expires_at, Utc::now()));
        let handle = tokio::spawn(async move {
            let mut tick = interval(Duration::from_secs(1));
            loop {
                tick.tick().await;
                let view = render_remaining(expires_at, Utc::now());
                let closed = view == CountdownView::Closed;
                if tx.send(view).is_err() {
                    break;
                }
                if closed {
                    break;
                }
            }
        });
        Self { handle, view: rx }
    }

    pub fn view(&self) -> watch::Receiver<CountdownView> {
        self.view.clone()
    }

    pub fn stop(&self) {
        self.handle.abort();
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn view_at(seconds_left: i64) -> CountdownView {
        let now = Utc::now();
        render_remaining(now + TimeDelta::seconds(seconds_left), now)
    }

    #[test]
    fn expired_is_closed() {
        assert_eq!(view_at(0), CountdownView::Closed);
        assert_eq!(view_at(-10), CountdownView::Closed);
    }

    #[test]
    fn critical_under_five_minutes() {
        let CountdownView::Open {
            urgency,
            time_text,
            banner,
            pulse,
        } = view_at(4 * 60 + 5)
        else {
            panic!("expected open countdown");
        };
        assert_eq!(urgency, Urgency::Critical);
        assert_eq!(time_text, "4:05");
        assert_eq!(banner, Some(LAST_FIVE_BANNER));
        assert!(pulse);
    }

    #[test]
    fn urgent_under_thirty_minutes() {
        let CountdownView::Open {
            urgency,
            time_text,
            banner,
            pulse,
        } = view_at(12 * 60 + 30)
        else {
            panic!("expected open countdown");
        };
        assert_eq!(urgency, Urgency::Urgent);
        assert_eq!(time_text, "12 dakika 30 saniye");
        assert_eq!(banner, Some(LAST_THIRTY_BANNER));
        assert!(pulse);
    }

    #[test]
    fn quiet_tiers_have_no_banner_or_pulse() {
        let CountdownView::Open {
            urgency,
            time_text,
            banner,
            pulse,
        } = view_at(45 * 60)
        else {
            panic!("expected open countdown");
        };
        assert_eq!(urgency, Urgency::Warning);
        assert_eq!(time_text, "45 dakika");
        assert_eq!(banner, None);
        assert!(!pulse);

        let CountdownView::Open { urgency, time_text, .. } = view_at(3 * 3600 + 20 * 60) else {
            panic!("expected open countdown");
        };
        assert_eq!(urgency, Urgency::Caution);
        assert_eq!(time_text, "3 saat 20 dakika");

        let CountdownView::Open { urgency, time_text, .. } = view_at(10 * 3600) else {
            panic!("expected open countdown");
        };
        assert_eq!(urgency, Urgency::Normal);
        assert_eq!(time_text, "10 saat");
    }

    #[test]
    fn safe_tier_spells_out_single_days() {
        let CountdownView::Open { time_text, .. } = view_at(86_400 + 5 * 3600) else {
            panic!("expected open countdown");
        };
        assert_eq!(time_text, "1 gün 5 saat");

        let CountdownView::Open { time_text, .. } = view_at(86_400 * 4) else {
            panic!("expected open countdown");
        };
        assert_eq!(time_text, "4 gün");
    }
}
