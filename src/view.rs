use crate::poll::{OptionId, OptionResult, PostId};

pub const LOADING_LABEL: &str = "Yükleniyor...";

/// One selectable row of a poll card. The label fields mirror what the
/// server rendered; the renderer only ever patches them in place.
#[derive(Debug, Clone)]
pub struct OptionCard {
    pub option_id: OptionId,
    pub label: String,
    pub percent_label: String,
    pub votes_label: String,
    /// Width of the result bar, as a CSS percentage string.
    pub bar_width: String,
    pub selected: bool,
    pub disabled: bool,
}

impl OptionCard {
    pub fn new(option_id: OptionId, label: impl Into<String>) -> Self {
        Self {
            option_id,
            label: label.into(),
            percent_label: "0%".to_owned(),
            votes_label: "0 oy".to_owned(),
            bar_width: "0%".to_owned(),
            selected: false,
            disabled: false,
        }
    }
}

/// Submit button of a multi-select card. While a submission is in flight the
/// label shows the spinner text and the original is stashed so it can be
/// restored exactly, whatever it said.
#[derive(Debug, Clone)]
pub struct SubmitButton {
    pub label: String,
    pub disabled: bool,
    saved_label: Option<String>,
}

impl SubmitButton {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            disabled: false,
            saved_label: None,
        }
    }

    pub fn begin_loading(&mut self) {
        if self.saved_label.is_none() {
            self.saved_label = Some(self.label.clone());
        }
        self.label = LOADING_LABEL.to_owned();
        self.disabled = true;
    }

    pub fn end_loading(&mut self) {
        if let Some(original) = self.saved_label.take() {
            self.label = original;
        }
        self.disabled = false;
    }

    pub fn is_loading(&self) -> bool {
        self.saved_label.is_some()
    }
}

/// Client-side stand-in for one server-rendered poll. Construction data
/// comes from the markup's data attributes; the engine never templates poll
/// structure, only the result numbers.
#[derive(Debug, Clone)]
pub struct PollCard {
    pub post_id: PostId,
    pub vote_url: String,
    pub allow_multiple: bool,
    pub total_votes_label: String,
    pub options: Vec<OptionCard>,
    pub submit: SubmitButton,
}

impl PollCard {
    pub fn new(
        post_id: PostId,
        vote_url: impl Into<String>,
        allow_multiple: bool,
        options: Vec<OptionCard>,
    ) -> Self {
        Self {
            post_id,
            vote_url: vote_url.into(),
            allow_multiple,
            total_votes_label: "Toplam 0 oy".to_owned(),
            options,
            submit: SubmitButton::new("Oyla"),
        }
    }

    pub fn option(&self, option_id: OptionId) -> Option<&OptionCard> {
        self.options.iter().find(|o| o.option_id == option_id)
    }

    pub fn option_mut(&mut self, option_id: OptionId) -> Option<&mut OptionCard> {
        self.options.iter_mut().find(|o| o.option_id == option_id)
    }

    /// Patch a results payload into the matching rows. Rows the payload does
    /// not mention keep their current labels, and the total is recomputed
    /// here from the per-option counts rather than trusted from the server.
    pub fn apply_results(&mut self, results: &[OptionResult]) {
        let total: i64 = results.iter().map(|r| r.vote_count).sum();
        self.total_votes_label = format!("Toplam {total} oy");

        for result in results {
            let Some(option) = self.option_mut(result.option_id) else {
                continue;
            };
            let percent = result.percentage.round() as i64;
            option.percent_label = format!("{percent}%");
            option.votes_label = format!("{} oy", result.vote_count);
            option.bar_width = format!("{percent}%");
        }
    }

    pub fn set_options_disabled(&mut self, disabled: bool) {
        for option in &mut self.options {
            option.disabled = disabled;
        }
    }

    pub fn set_option_selected(&mut self, option_id: OptionId, selected: bool) {
        if let Some(option) = self.option_mut(option_id) {
            option.selected = selected;
        }
    }

    pub fn clear_selected(&mut self) {
        for option in &mut self.options {
            option.selected = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> PollCard {
        PollCard::new(
            5,
            "/post/5/vote/",
            false,
            vec![OptionCard::new(1, "Evet"), OptionCard::new(2, "Hayır")],
        )
    }

    #[test]
    fn results_round_and_patch_matching_rows() {
        let mut card = card();
        card.apply_results(&[
            OptionResult {
                option_id: 1,
                vote_count: 10,
                percentage: 66.7,
            },
            OptionResult {
                option_id: 2,
                vote_count: 5,
                percentage: 33.3,
            },
        ]);

        let first = card.option(1).unwrap();
        assert_eq!(first.percent_label, "67%");
        assert_eq!(first.votes_label, "10 oy");
        assert_eq!(first.bar_width, "67%");
        let second = card.option(2).unwrap();
        assert_eq!(second.percent_label, "33%");
        assert_eq!(card.total_votes_label, "Toplam 15 oy");
    }

    #[test]
    fn unknown_option_ids_are_skipped() {
        let mut card = card();
        card.apply_results(&[OptionResult {
            option_id: 99,
            vote_count: 3,
            percentage: 100.0,
        }]);
        // Total still comes from the payload; the rows stay untouched.
        assert_eq!(card.total_votes_label, "Toplam 3 oy");
        assert_eq!(card.option(1).unwrap().percent_label, "0%");
    }

    #[test]
    fn loading_restores_the_exact_label() {
        let mut button = SubmitButton::new("Oyla (2 seçenek)");
        button.begin_loading();
        assert_eq!(button.label, LOADING_LABEL);
        assert!(button.disabled);
        assert!(button.is_loading());

        button.end_loading();
        assert_eq!(button.label, "Oyla (2 seçenek)");
        assert!(!button.disabled);
        assert!(!button.is_loading());
    }

    #[test]
    fn nested_begin_loading_keeps_the_first_saved_label() {
        let mut button = SubmitButton::new("Oyla");
        button.begin_loading();
        button.begin_loading();
        button.end_loading();
        assert_eq!(button.label, "Oyla");
    }
}
