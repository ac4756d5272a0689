//! Emails carrying verification and login links.

use askama::Template;
use chrono::Duration;

#[derive(Template)]
#[template(path = "verification_email.html")]
pub struct VerificationEmail<'a> {
    pub link: &'a str,
    pub validity: String,
}

impl VerificationEmail<'_> {
    pub const SUBJECT: &'static str = "Bestätigen Sie Ihre E-Mail-Adresse";
}

#[derive(Template)]
#[template(path = "login_email.html")]
pub struct LoginEmail<'a> {
    pub link: &'a str,
    pub validity: String,
}

impl LoginEmail<'_> {
    pub const SUBJECT: &'static str = "Ihr Login-Link für Fördercheck.NRW";
}

/// German rendering of a link lifetime, e.g. "24 Stunden" or "30 Minuten".
pub fn describe_validity(validity: Duration) -> String {
    let minutes = validity.num_minutes();
    match (minutes % 60, minutes / 60) {
        (0, 1) => "1 Stunde".to_owned(),
        (0, hours) if hours > 0 => format!("{hours} Stunden"),
        _ if minutes == 1 => "1 Minute".to_owned(),
        _ => format!("{minutes} Minuten"),
    }
}
