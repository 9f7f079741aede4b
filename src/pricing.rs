#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EventKind {
    pub name: &'static str,
    pub base_price: u32,
    pub icon: &'static str,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Extra {
    pub name: &'static str,
    pub price: u32,
}

pub const EVENT_KINDS: [EventKind; 6] = [
    EventKind { name: "Wedding", base_price: 800, icon: "💒" },
    EventKind { name: "Birthday Party", base_price: 400, icon: "🎂" },
    EventKind { name: "Corporate Event", base_price: 600, icon: "🏢" },
    EventKind { name: "School Dance", base_price: 350, icon: "🎓" },
    EventKind { name: "Community Event", base_price: 300, icon: "🏘️" },
    EventKind { name: "Other", base_price: 450, icon: "🎉" },
];

pub const EXTRAS: [Extra; 6] = [
    Extra { name: "Basic Sound System", price: 0 },
    Extra { name: "Wireless Microphones", price: 50 },
    Extra { name: "LED Lighting", price: 100 },
    Extra { name: "Fog Machine", price: 75 },
    Extra { name: "Extra Speakers", price: 80 },
    Extra { name: "DJ Booth Setup", price: 60 },
];

pub const MUSIC_GENRES: [&str; 8] = [
    "Top 40 Hits",
    "Hip Hop",
    "Rock",
    "Electronic/EDM",
    "Country",
    "Jazz",
    "Classical",
    "Mixed/Everything",
];

/// Base price when the event type is missing or unknown.
pub const FALLBACK_BASE_PRICE: u32 = 450;
pub const INCLUDED_HOURS: u32 = 4;
pub const HOURLY_RATE: i64 = 80;
pub const COMPETITOR_MARKUP: f64 = 1.8;

pub const MIN_GUESTS: u32 = 10;
pub const MAX_GUESTS: u32 = 500;
pub const MIN_HOURS: u32 = 2;
pub const MAX_HOURS: u32 = 12;

/// Everything the visitor enters across the wizard.
#[derive(Clone, Debug, PartialEq)]
pub struct QuoteRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub event_kind: String,
    pub guests: u32,
    pub hours: u32,
    pub genre: String,
    pub extras: Vec<String>,
    pub date: String,
}

impl Default for QuoteRequest {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: String::new(),
            event_kind: String::new(),
            guests: 0,
            hours: INCLUDED_HOURS,
            genre: String::new(),
            extras: Vec::new(),
            date: String::new(),
        }
    }
}

impl QuoteRequest {
    pub fn toggle_extra(&mut self, name: &str) {
        if let Some(pos) = self.extras.iter().position(|e| e == name) {
            self.extras.remove(pos);
        } else {
            self.extras.push(name.to_string());
        }
    }

    pub fn has_extra(&self, name: &str) -> bool {
        self.extras.iter().any(|e| e == name)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Quote {
    pub ours: i64,
    pub competitor: i64,
}

impl Quote {
    pub fn savings(&self) -> i64 {
        self.competitor - self.ours
    }

    pub fn savings_percent(&self) -> i64 {
        if self.competitor <= 0 {
            return 0;
        }
        (self.savings() as f64 / self.competitor as f64 * 100.0).round() as i64
    }
}

pub fn guest_multiplier(guests: u32) -> f64 {
    if guests > 100 {
        1.3
    } else if guests > 50 {
        1.15
    } else {
        1.0
    }
}

pub fn base_price(event_kind: &str) -> u32 {
    EVENT_KINDS
        .iter()
        .find(|kind| kind.name == event_kind)
        .map(|kind| kind.base_price)
        .unwrap_or(FALLBACK_BASE_PRICE)
}

/// Base price scaled by crowd size, plus or minus the hourly rate for every
/// hour away from the included block, plus flat fees for extras.
pub fn calculate(request: &QuoteRequest) -> Quote {
    let base = f64::from(base_price(&request.event_kind)) * guest_multiplier(request.guests);
    let hours = (i64::from(request.hours) - i64::from(INCLUDED_HOURS)) * HOURLY_RATE;
    let extras: u32 = request
        .extras
        .iter()
        .filter_map(|name| EXTRAS.iter().find(|extra| extra.name == name.as_str()))
        .map(|extra| extra.price)
        .sum();

    let ours = (base + hours as f64 + f64::from(extras)).round() as i64;
    let competitor = (ours as f64 * COMPETITOR_MARKUP).round() as i64;
    Quote { ours, competitor }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(event_kind: &str, guests: u32, hours: u32, extras: &[&str]) -> QuoteRequest {
        QuoteRequest {
            event_kind: event_kind.to_string(),
            guests,
            hours,
            extras: extras.iter().map(|e| e.to_string()).collect(),
            ..QuoteRequest::default()
        }
    }

    #[test]
    fn large_wedding_with_extras() {
        let quote = calculate(&request("Wedding", 120, 6, &["LED Lighting", "Fog Machine"]));
        assert_eq!(quote.ours, 1375);
        assert_eq!(quote.competitor, 2475);
        assert_eq!(quote.savings(), 1100);
        assert_eq!(quote.savings_percent(), 44);
    }

    #[test]
    fn guest_thresholds_are_exclusive() {
        assert_eq!(guest_multiplier(50), 1.0);
        assert_eq!(guest_multiplier(51), 1.15);
        assert_eq!(guest_multiplier(100), 1.15);
        assert_eq!(guest_multiplier(101), 1.3);
    }

    #[test]
    fn unknown_event_kind_uses_fallback_price() {
        let quote = calculate(&request("", 0, INCLUDED_HOURS, &[]));
        assert_eq!(quote.ours, 450);
        assert_eq!(quote.competitor, 810);
    }

    #[test]
    fn short_events_get_cheaper() {
        let quote = calculate(&request("Birthday Party", 60, 2, &[]));
        assert_eq!(quote.ours, 460 - 160);
    }

    #[test]
    fn unknown_extras_are_free() {
        let quote = calculate(&request("School Dance", 20, 4, &["Confetti Cannon", "Basic Sound System"]));
        assert_eq!(quote.ours, 350);
    }

    #[test]
    fn toggling_an_extra_twice_removes_it() {
        let mut req = QuoteRequest::default();
        req.toggle_extra("Fog Machine");
        assert!(req.has_extra("Fog Machine"));
        req.toggle_extra("Wireless Microphones");
        req.toggle_extra("Fog Machine");
        assert_eq!(req.extras, vec!["Wireless Microphones".to_string()]);
    }

    #[test]
    fn default_request_starts_at_included_hours() {
        assert_eq!(QuoteRequest::default().hours, 4);
    }
}
