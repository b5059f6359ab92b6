pub mod listing;
pub mod reports;
pub mod wechat;

use tower_cookies::{Cookie, Cookies};

const FLASH_COOKIE: &str = "pawtrace_flash";

/// Transient notification carried across the post-submit redirect. Only a
/// short code travels in the cookie; the wording lives here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flash {
    LostCreated,
    FoundCreated,
    LostCreatedCoordsIgnored,
    FoundCreatedCoordsIgnored,
    MarkedFound,
    AlreadyFound,
}

impl Flash {
    fn code(self) -> &'static str {
        match self {
            Flash::LostCreated => "lost_created",
            Flash::FoundCreated => "found_created",
            Flash::LostCreatedCoordsIgnored => "lost_created_coords_ignored",
            Flash::FoundCreatedCoordsIgnored => "found_created_coords_ignored",
            Flash::MarkedFound => "marked_found",
            Flash::AlreadyFound => "already_found",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "lost_created" => Some(Flash::LostCreated),
            "found_created" => Some(Flash::FoundCreated),
            "lost_created_coords_ignored" => Some(Flash::LostCreatedCoordsIgnored),
            "found_created_coords_ignored" => Some(Flash::FoundCreatedCoordsIgnored),
            "marked_found" => Some(Flash::MarkedFound),
            "already_found" => Some(Flash::AlreadyFound),
            _ => None,
        }
    }

    /// `success` / `info` — picks the banner style on the page.
    pub fn kind(self) -> &'static str {
        match self {
            Flash::AlreadyFound => "info",
            _ => "success",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Flash::LostCreated => "Lost-pet report published!",
            Flash::FoundCreated => "Found-pet report published!",
            Flash::LostCreatedCoordsIgnored => {
                "Lost-pet report published! (The map coordinates could not be read and were left out.)"
            }
            Flash::FoundCreatedCoordsIgnored => {
                "Found-pet report published! (The map coordinates could not be read and were left out.)"
            }
            Flash::MarkedFound => "The report has been marked as found!",
            Flash::AlreadyFound => "This report was already marked as found.",
        }
    }
}

pub fn set_flash(cookies: &Cookies, flash: Flash) {
    let mut cookie = Cookie::new(FLASH_COOKIE, flash.code());
    cookie.set_path("/");
    cookies.add(cookie);
}

/// Reads and clears the flash cookie, one-shot.
pub fn take_flash(cookies: &Cookies) -> Option<Flash> {
    let flash = cookies
        .get(FLASH_COOKIE)
        .and_then(|c| Flash::from_code(c.value()))?;
    let mut removal = Cookie::new(FLASH_COOKIE, "");
    removal.set_path("/");
    cookies.remove(removal);
    Some(flash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flash_codes_round_trip() {
        for flash in [
            Flash::LostCreated,
            Flash::FoundCreated,
            Flash::LostCreatedCoordsIgnored,
            Flash::FoundCreatedCoordsIgnored,
            Flash::MarkedFound,
            Flash::AlreadyFound,
        ] {
            assert_eq!(Flash::from_code(flash.code()), Some(flash));
        }
        assert_eq!(Flash::from_code("garbage"), None);
    }

    #[test]
    fn already_found_is_informational_not_success() {
        assert_eq!(Flash::AlreadyFound.kind(), "info");
        assert_eq!(Flash::MarkedFound.kind(), "success");
    }
}
