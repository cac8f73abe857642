/// Top-level sections of the interface, derived purely from the URL path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Swap,
    Pools,
    ManagePositions,
    Analytics,
}

/// Section a path belongs to, if any. Position-management flows live under
/// several prefixes (`/pool`, `/add`, `/remove`, `/increase`), none of which
/// may claim the `/pools` listing.
pub fn active_section(path: &str) -> Option<Section> {
    if path.starts_with("/swap") {
        Some(Section::Swap)
    } else if path.starts_with("/pools") {
        Some(Section::Pools)
    } else if is_position_path(path) {
        Some(Section::ManagePositions)
    } else if path.starts_with("/dashboard") {
        Some(Section::Analytics)
    } else {
        None
    }
}

fn is_position_path(path: &str) -> bool {
    (path.starts_with("/pool")
        || path.starts_with("/add")
        || path.starts_with("/remove")
        || path.starts_with("/increase"))
        && !path.starts_with("/pools")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTarget {
    Route(&'static str, Section),
    External(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub label: &'static str,
    pub target: MenuTarget,
    pub desktop_only: bool,
}

impl MenuEntry {
    pub fn is_active(&self, path: &str) -> bool {
        match self.target {
            MenuTarget::Route(_, section) => active_section(path) == Some(section),
            MenuTarget::External(_) => false,
        }
    }
}

const MENU: [MenuEntry; 7] = [
    MenuEntry {
        label: "Swap",
        target: MenuTarget::Route("/swap", Section::Swap),
        desktop_only: false,
    },
    MenuEntry {
        label: "Pools",
        target: MenuTarget::Route("/pools", Section::Pools),
        desktop_only: false,
    },
    MenuEntry {
        label: "Manage Positions",
        target: MenuTarget::Route("/pool", Section::ManagePositions),
        desktop_only: false,
    },
    MenuEntry {
        label: "Perps",
        target: MenuTarget::External("https://perps.forge.trade/"),
        desktop_only: false,
    },
    MenuEntry {
        label: "Liquid Stake",
        target: MenuTarget::External("https://app.stride.zone/?chain=EVMOS"),
        desktop_only: true,
    },
    MenuEntry {
        label: "Assets",
        target: MenuTarget::External("https://assets.forge.trade/"),
        desktop_only: true,
    },
    MenuEntry {
        label: "Analytics",
        target: MenuTarget::Route("/dashboard", Section::Analytics),
        desktop_only: true,
    },
];

pub fn menu_entries() -> &'static [MenuEntry] {
    &MENU
}

/// Entries visible for the current layout; mobile drops the desktop-only
/// links.
pub fn visible_entries(is_mobile: bool) -> impl Iterator<Item = &'static MenuEntry> {
    MENU.iter().filter(move |entry| !(is_mobile && entry.desktop_only))
}

/// Paths that leave the application entirely.
pub fn external_redirect(path: &str) -> Option<&'static str> {
    if path.starts_with("/assets") {
        Some("https://assets.evmos.org")
    } else {
        None
    }
}
