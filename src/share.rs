use url::Url;

/// Share-intent link builders. Text and URLs go through standard query
/// encoding; opening the window stays with the host.

pub fn twitter(url: &str, text: &str) -> Url {
    Url::parse_with_params(
        "https://twitter.com/intent/tweet",
        &[("url", url), ("text", text)],
    )
    .expect("share base url")
}

pub fn facebook(url: &str) -> Url {
    Url::parse_with_params("https://www.facebook.com/sharer/sharer.php", &[("u", url)])
        .expect("share base url")
}

/// WhatsApp takes a single parameter carrying both the text and the link.
pub fn whatsapp(url: &str, text: &str) -> Url {
    Url::parse_with_params("https://wa.me/", &[("text", format!("{text} {url}"))])
        .expect("share base url")
}

pub fn telegram(url: &str, text: &str) -> Url {
    Url::parse_with_params("https://t.me/share/url", &[("url", url), ("text", text)])
        .expect("share base url")
}

pub fn linkedin(url: &str) -> Url {
    Url::parse_with_params(
        "https://www.linkedin.com/sharing/share-offsite/",
        &[("url", url)],
    )
    .expect("share base url")
}

#[cfg(test)]
mod tests {
    use super::*;

    const POST_URL: &str = "https://bilemedilema.com/post/5/";

    #[test]
    fn twitter_encodes_both_parameters() {
        let link = twitter(POST_URL, "Hangisi? Oyla!");
        assert_eq!(link.host_str(), Some("twitter.com"));
        assert_eq!(link.path(), "/intent/tweet");
        assert_eq!(
            link.query(),
            Some("url=https%3A%2F%2Fbilemedilema.com%2Fpost%2F5%2F&text=Hangisi%3F+Oyla%21")
        );
    }

    #[test]
    fn whatsapp_joins_text_and_url() {
        let link = whatsapp(POST_URL, "Bak şuna");
        let (key, value) = link.query_pairs().next().unwrap();
        assert_eq!(key, "text");
        assert_eq!(value, format!("Bak şuna {POST_URL}"));
    }

    #[test]
    fn single_parameter_targets() {
        assert_eq!(
            facebook(POST_URL).query_pairs().next().unwrap().0,
            "u"
        );
        let telegram = telegram(POST_URL, "oyla");
        assert_eq!(telegram.host_str(), Some("t.me"));
        let linkedin = linkedin(POST_URL);
        assert_eq!(linkedin.path(), "/sharing/share-offsite/");
    }
}
