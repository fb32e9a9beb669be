//! Stored weekly plans: listing, editing, confirmation, nutrition, and sharing.

use chrono::{Datelike, Days, NaiveDate};
use rand::distributions::Alphanumeric;
use rand::Rng;

pub mod handlers;
pub mod store;

pub const SHARE_TOKEN_LEN: usize = 26;

/// The Monday on or before `date`. Plans are keyed by this date.
pub fn week_start_for(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_monday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Lowercase alphanumeric token used in public share links.
pub fn generate_share_token<R: Rng + ?Sized>(rng: &mut R) -> String {
    (0..SHARE_TOKEN_LEN)
        .map(|_| char::from(rng.sample(Alphanumeric)).to_ascii_lowercase())
        .collect()
}

pub fn share_url(frontend_url: &str, token: &str) -> String {
    format!("{}/meal-plan/{token}", frontend_url.trim_end_matches('/'))
}
