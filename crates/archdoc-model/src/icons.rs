//! Fixed title-to-symbol lookup for section headings.

/// Symbol used for section titles that are not in the table.
pub const DEFAULT_ICON: &str = "📝";

/// Symbol used for the file composition block.
pub const STATS_ICON: &str = "📊";

const SECTION_ICONS: [(&str, &str); 6] = [
    ("Project Architecture", "🏗️"),
    ("Project Overview", "📋"),
    ("Tech Stack", "💻"),
    ("Key Features in Components", "🧩"),
    ("Implementation Flow", "🔀"),
    ("Future Improvements", "🚀"),
];

/// Resolve the heading symbol for a section title, matched exactly as received.
pub fn section_icon(title: &str) -> &'static str {
    SECTION_ICONS
        .iter()
        .find(|(known, _)| *known == title)
        .map_or(DEFAULT_ICON, |&(_, icon)| icon)
}
