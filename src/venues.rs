//! Best-known home arenas for clubs the tracked team regularly plays.
//!
//! Used whenever a source gives no usable venue. Matching is by substring so
//! sponsor-decorated names ("Partizan Mozzart Bet", "FC Barcelona B") still
//! resolve. Entries are checked in order and the first hit wins.

const VENUES: &[(&str, &str)] = &[
    ("Partizan", "Stark Arena, Belgrade, Serbia"),
    ("Crvena zvezda", "Aleksandar Nikolic Hall, Belgrade, Serbia"),
    ("Real Madrid", "WiZink Center, Madrid, Spain"),
    ("Barcelona", "Palau Blaugrana, Barcelona, Spain"),
    ("Panathinaikos", "OAKA, Athens, Greece"),
    ("Olympiacos", "Peace and Friendship Stadium, Piraeus, Greece"),
    ("Fenerbahce", "Ulker Sports Arena, Istanbul, Turkey"),
    ("Anadolu Efes", "Sinan Erdem Dome, Istanbul, Turkey"),
    ("Maccabi Tel Aviv", "Menora Mivtachim Arena, Tel Aviv, Israel"),
    ("Zalgiris", "Zalgirio Arena, Kaunas, Lithuania"),
    ("Bayern Munich", "Audi Dome, Munich, Germany"),
    ("ALBA Berlin", "Mercedes-Benz Arena, Berlin, Germany"),
    ("Milano", "Mediolanum Forum, Milan, Italy"),
    ("Virtus Bologna", "Segafredo Arena, Bologna, Italy"),
    ("Monaco", "Salle Gaston Médecin, Monaco"),
    ("Paris", "Adidas Arena, Paris, France"),
    ("Baskonia", "Buesa Arena, Vitoria-Gasteiz, Spain"),
    ("Valencia", "La Fonteta, Valencia, Spain"),
];

/// Resolve a team display name to an arena string.
///
/// Falls back to `"<team> Arena"` when no entry matches, and to
/// `"Unknown Arena"` when the name is missing or blank.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(resolve_venue(Some("Unknown FC")), "Unknown FC Arena");
/// assert_eq!(resolve_venue(None), "Unknown Arena");
/// ```
pub fn resolve_venue(team: Option<&str>) -> String {
    let team = match team.map(str::trim) {
        Some(name) if !name.is_empty() => name,
        _ => return "Unknown Arena".to_string(),
    };

    VENUES
        .iter()
        .find(|(club, _)| team.contains(club))
        .map(|(_, venue)| venue.to_string())
        .unwrap_or_else(|| format!("{team} Arena"))
}
