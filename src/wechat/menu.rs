/// One entry of the official-account menu: the article card sent back when
/// a user taps the matching menu button.
pub struct MenuArticle {
    pub title: &'static str,
    pub description: &'static str,
    pub pic_url: &'static str,
    pub url: &'static str,
}

const SITE: &str = "https://board.pawtrace.cn";

static LATEST_REPORTS: MenuArticle = MenuArticle {
    title: "Latest pet reports",
    description: "Browse the newest lost and found pet reports",
    pic_url: "https://board.pawtrace.cn/static/cards/listing.png",
    url: SITE,
};

static REPORT_LOST: MenuArticle = MenuArticle {
    title: "Report a lost pet",
    description: "Pet gone missing? Publish a lost-pet report",
    pic_url: "https://board.pawtrace.cn/static/cards/lost.png",
    url: "https://board.pawtrace.cn/report/lost",
};

static REPORT_FOUND: MenuArticle = MenuArticle {
    title: "Report a found pet",
    description: "Found someone's pet? Help it get home",
    pic_url: "https://board.pawtrace.cn/static/cards/found.png",
    url: "https://board.pawtrace.cn/report/found",
};

/// Maps a menu-click `EventKey` to its article card. Unknown keys get no
/// reply at all (the handler answers with an empty 200).
pub fn article_for_key(key: &str) -> Option<&'static MenuArticle> {
    match key {
        "MENU_LATEST_REPORTS" => Some(&LATEST_REPORTS),
        "MENU_REPORT_LOST" => Some(&REPORT_LOST),
        "MENU_REPORT_FOUND" => Some(&REPORT_FOUND),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_resolve() {
        assert!(article_for_key("MENU_LATEST_REPORTS").is_some());
        assert!(article_for_key("MENU_REPORT_LOST").is_some());
        assert!(article_for_key("MENU_REPORT_FOUND").is_some());
    }

    #[test]
    fn unknown_key_resolves_to_nothing() {
        assert!(article_for_key("MENU_SOMETHING_ELSE").is_none());
        assert!(article_for_key("").is_none());
    }
}
