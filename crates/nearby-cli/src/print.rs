//! Terminal rendering of view snapshots.

use std::fmt::Write as _;

use chrono::NaiveDateTime;
use nearby_app::render::{render_cards, render_markers, CardList, LocationCard, MapView, MarkerKind};
use nearby_app::{DisplayState, ViewMode, ViewSnapshot};
use nearby_core::{Contrast, OpenStatus, Preferences, Theme};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Heading,
    Open,
    Closed,
    Muted,
    Alert,
}

/// ANSI styling derived from the stored display preferences.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Style {
    preferences: Preferences,
    color: bool,
}

impl Style {
    pub(crate) fn new(preferences: Preferences, color: bool) -> Self {
        Self { preferences, color }
    }

    fn code(self, role: Role) -> &'static str {
        let high = self.preferences.contrast == Contrast::High;
        match (role, self.preferences.theme, high) {
            (Role::Heading, Theme::Light, false) => "1",
            (Role::Heading, Theme::Dark, false) => "1;97",
            (Role::Heading, _, true) => "1;4",
            (Role::Open, _, false) => "32",
            (Role::Open, _, true) => "1;92",
            (Role::Closed, _, false) => "31",
            (Role::Closed, _, true) => "1;91",
            (Role::Muted, Theme::Light, false) => "90",
            (Role::Muted, Theme::Dark, false) => "37",
            (Role::Muted, _, true) => "39",
            (Role::Alert, _, false) => "33",
            (Role::Alert, _, true) => "1;93",
        }
    }

    fn paint(self, role: Role, text: &str) -> String {
        if self.color {
            format!("\x1b[{}m{text}\x1b[0m", self.code(role))
        } else {
            text.to_string()
        }
    }
}

/// Render one snapshot as terminal text.
pub(crate) fn render_snapshot(snapshot: &ViewSnapshot<'_>, style: Style, now: NaiveDateTime) -> String {
    let mut out = String::new();
    match &snapshot.display {
        DisplayState::Loading => {
            out.push_str(&style.paint(Role::Muted, "Loading nearby locations..."));
            return out;
        }
        DisplayState::LocationRequired(err) => {
            let _ = writeln!(
                out,
                "{}",
                style.paint(Role::Alert, &format!("Location access is required ({err})."))
            );
            out.push_str("Pass --lat and --lng, or type `retry` once location is available.");
            return out;
        }
        DisplayState::TransientError(message) => {
            let _ = writeln!(
                out,
                "{}",
                style.paint(Role::Alert, &format!("Could not refresh results: {message}"))
            );
        }
        DisplayState::Empty | DisplayState::Populated => {}
    }

    match snapshot.view.view_mode {
        ViewMode::List => {
            match render_cards(snapshot.locations, snapshot.view.user_coordinate, now) {
                CardList::Cards(cards) => {
                    for card in &cards {
                        write_card(&mut out, card, style);
                    }
                }
                // The error line already stands in for an empty list.
                CardList::NoResults
                    if matches!(snapshot.display, DisplayState::TransientError(_)) => {}
                list @ CardList::NoResults => {
                    out.push_str(list.message().unwrap_or_default());
                }
            }
        }
        ViewMode::Map => match snapshot.view.user_coordinate {
            Some(user) => write_map(&mut out, &render_markers(snapshot.locations, user), style),
            None => out.push_str("Map unavailable until your location is known."),
        },
    }
    out.trim_end().to_string()
}

fn write_card(out: &mut String, card: &LocationCard, style: Style) {
    let status_role = match card.status {
        OpenStatus::AlwaysOpen | OpenStatus::Open => Role::Open,
        OpenStatus::Closed => Role::Closed,
        OpenStatus::Unknown => Role::Muted,
    };
    let _ = writeln!(
        out,
        "[{}] {:<9}{}",
        style.paint(status_role, card.status_label()),
        card.category_label,
        style.paint(Role::Heading, &card.name)
    );
    let _ = writeln!(out, "    {}", card.address);

    let mut details = Vec::with_capacity(2);
    if let Some(distance) = &card.distance {
        details.push(distance.clone());
    }
    details.push(format!("rating {} ({} reviews)", card.rating, card.review_count));
    let _ = writeln!(out, "    {}", details.join(" | "));
    let _ = writeln!(out, "    {}", style.paint(Role::Muted, &card.link));
}

fn write_map(out: &mut String, map: &MapView, style: Style) {
    let _ = writeln!(
        out,
        "{}",
        style.paint(Role::Heading, &format!("Map centered on {}", map.center))
    );
    if let Some(bounds) = map.bounds {
        let _ = writeln!(out, "bounds {} to {}", bounds.south_west, bounds.north_east);
    }
    for marker in &map.markers {
        let label = match marker.kind {
            MarkerKind::User => "you",
            MarkerKind::Place(category) => category.label(),
        };
        let _ = writeln!(
            out,
            "  * {:<9}{} {}",
            label,
            marker.title,
            style.paint(Role::Muted, marker.kind.color())
        );
        if let Some(info) = &marker.info {
            let mut line = format!("      {} | {}", info.address, info.distance);
            if let Some(rating) = &info.rating {
                let _ = write!(line, " | {rating}");
            }
            let _ = writeln!(out, "{line}");
            let _ = writeln!(out, "      {}", style.paint(Role::Muted, &info.directions_url));
        }
    }
}
