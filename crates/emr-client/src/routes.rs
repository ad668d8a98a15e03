//! Route Table
//!
//! Client-side paths, parsed into a `Route` and passed through the session
//! guard. Kept free of browser types so the guard can be tested natively.

use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};

pub const LOGIN: &str = "/masuk";
pub const LEGACY_LOGIN: &str = "/login";
pub const DASHBOARD: &str = "/beranda";
pub const PATIENTS: &str = "/pasien";
pub const ENCOUNTERS: &str = "/kunjungan";
pub const APPOINTMENTS: &str = "/janji-temu";

const NEW: &str = "baru";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Dashboard,
    Patients,
    NewPatient,
    PatientDetail { id: String },
    Encounters,
    /// Optional `?patient=` preselection
    NewEncounter { patient: Option<String> },
    EncounterDetail { id: String },
    Appointments,
    NewAppointment { patient: Option<String> },
    NotFound,
}

/// Chrome a route renders inside
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shell {
    /// Centered card for the login form
    Auth,
    /// Sidebar and top bar; requires a session
    Main,
    /// No chrome
    Bare,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Render(Route),
    /// Replace the current history entry with this path
    Redirect(String),
}

impl Route {
    /// Parse a path with optional query string. Aliases (`/`, `/login`)
    /// are not routes; [`resolve`] turns them into redirects.
    pub fn parse(location: &str) -> Route {
        let (path, query) = split_location(location);
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            ["masuk"] => Route::Login,
            ["beranda"] => Route::Dashboard,
            ["pasien"] => Route::Patients,
            ["pasien", NEW] => Route::NewPatient,
            ["pasien", id] => Route::PatientDetail { id: decode(id) },
            ["kunjungan"] => Route::Encounters,
            ["kunjungan", NEW] => Route::NewEncounter { patient: query_param(query, "patient") },
            ["kunjungan", id] => Route::EncounterDetail { id: decode(id) },
            ["janji-temu"] => Route::Appointments,
            ["janji-temu", NEW] => Route::NewAppointment { patient: query_param(query, "patient") },
            _ => Route::NotFound,
        }
    }

    /// Canonical location for this route, query included
    pub fn path(&self) -> String {
        match self {
            Route::Login => LOGIN.to_string(),
            Route::Dashboard => DASHBOARD.to_string(),
            Route::Patients => PATIENTS.to_string(),
            Route::NewPatient => format!("{}/{}", PATIENTS, NEW),
            Route::PatientDetail { id } => format!("{}/{}", PATIENTS, encode(id)),
            Route::Encounters => ENCOUNTERS.to_string(),
            Route::NewEncounter { patient } => with_patient(format!("{}/{}", ENCOUNTERS, NEW), patient.as_deref()),
            Route::EncounterDetail { id } => format!("{}/{}", ENCOUNTERS, encode(id)),
            Route::Appointments => APPOINTMENTS.to_string(),
            Route::NewAppointment { patient } => {
                with_patient(format!("{}/{}", APPOINTMENTS, NEW), patient.as_deref())
            }
            Route::NotFound => "/404".to_string(),
        }
    }

    pub fn shell(&self) -> Shell {
        match self {
            Route::Login => Shell::Auth,
            Route::NotFound => Shell::Bare,
            _ => Shell::Main,
        }
    }

    pub fn requires_session(&self) -> bool {
        self.shell() == Shell::Main
    }

    /// Document title suffix
    pub fn title(&self) -> &'static str {
        match self {
            Route::Login => "Masuk",
            Route::Dashboard => "Beranda",
            Route::Patients | Route::PatientDetail { .. } => "Pasien",
            Route::NewPatient => "Pasien Baru",
            Route::Encounters | Route::EncounterDetail { .. } => "Kunjungan",
            Route::NewEncounter { .. } => "Kunjungan Baru",
            Route::Appointments => "Janji Temu",
            Route::NewAppointment { .. } => "Janji Temu Baru",
            Route::NotFound => "Halaman Tidak Ditemukan",
        }
    }
}

/// Decide what to show for `location` given the session state
pub fn resolve(location: &str, authenticated: bool) -> RouteDecision {
    let (path, _) = split_location(location);
    let path = path.trim_end_matches('/');

    if path == LEGACY_LOGIN {
        return RouteDecision::Redirect(LOGIN.to_string());
    }
    if path.is_empty() {
        let target = if authenticated { DASHBOARD } else { LOGIN };
        return RouteDecision::Redirect(target.to_string());
    }

    let route = Route::parse(location);
    match route {
        Route::Login if authenticated => RouteDecision::Redirect(DASHBOARD.to_string()),
        ref r if r.requires_session() && !authenticated => RouteDecision::Redirect(LOGIN.to_string()),
        r => RouteDecision::Render(r),
    }
}

/// One sidebar entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
    pub icon: &'static str,
}

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem { label: "Beranda", href: DASHBOARD, icon: "home" },
    NavItem { label: "Pasien", href: PATIENTS, icon: "users" },
    NavItem { label: "Kunjungan", href: ENCOUNTERS, icon: "file-text" },
    NavItem { label: "Janji Temu", href: APPOINTMENTS, icon: "calendar" },
];

/// A nav entry stays highlighted on its child pages
pub fn is_active(current_path: &str, href: &str) -> bool {
    current_path.starts_with(href)
}

fn split_location(location: &str) -> (&str, &str) {
    let location = location.split('#').next().unwrap_or_default();
    match location.split_once('?') {
        Some((path, query)) => (path, query),
        None => (location, ""),
    }
}

/// First non-empty value of `key` in a query string
pub fn query_param(query: &str, key: &str) -> Option<String> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| decode(&v.replace('+', " ")))
        .filter(|v| !v.is_empty())
}

fn decode(raw: &str) -> String {
    percent_decode_str(raw).decode_utf8_lossy().into_owned()
}

fn encode(raw: &str) -> String {
    utf8_percent_encode(raw, NON_ALPHANUMERIC).to_string()
}

fn with_patient(base: String, patient: Option<&str>) -> String {
    match patient {
        Some(id) if !id.is_empty() => format!("{}?patient={}", base, encode(id)),
        _ => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_table() {
        assert_eq!(Route::parse("/masuk"), Route::Login);
        assert_eq!(Route::parse("/beranda/"), Route::Dashboard);
        assert_eq!(Route::parse("/pasien/baru"), Route::NewPatient);
        assert_eq!(Route::parse("/pasien/abc-123"), Route::PatientDetail { id: "abc-123".into() });
        assert_eq!(Route::parse("/kunjungan/baru?patient=p%201"), Route::NewEncounter { patient: Some("p 1".into()) });
        assert_eq!(Route::parse("/kunjungan/baru?patient="), Route::NewEncounter { patient: None });
        assert_eq!(Route::parse("/kunjungan/e-9"), Route::EncounterDetail { id: "e-9".into() });
        assert_eq!(Route::parse("/janji-temu/baru"), Route::NewAppointment { patient: None });
        assert_eq!(Route::parse("/janji-temu/a-1"), Route::NotFound);
        assert_eq!(Route::parse("/pasien/1/riwayat"), Route::NotFound);
        assert_eq!(Route::parse("/admin"), Route::NotFound);
    }

    #[test]
    fn test_path_round_trips() {
        for route in [
            Route::Dashboard,
            Route::NewPatient,
            Route::PatientDetail { id: "p 1".into() },
            Route::NewEncounter { patient: Some("p-2".into()) },
            Route::NewAppointment { patient: None },
            Route::EncounterDetail { id: "e/1".into() },
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn test_guard_redirects_anonymous_to_login() {
        for path in ["/beranda", "/pasien", "/pasien/baru", "/kunjungan/x", "/janji-temu/baru"] {
            assert_eq!(resolve(path, false), RouteDecision::Redirect(LOGIN.into()), "{}", path);
        }
        assert_eq!(resolve("/", false), RouteDecision::Redirect(LOGIN.into()));
    }

    #[test]
    fn test_guard_authenticated() {
        assert_eq!(resolve("/", true), RouteDecision::Redirect(DASHBOARD.into()));
        assert_eq!(resolve("/masuk", true), RouteDecision::Redirect(DASHBOARD.into()));
        assert_eq!(resolve("/pasien", true), RouteDecision::Render(Route::Patients));
    }

    #[test]
    fn test_aliases_and_not_found() {
        assert_eq!(resolve("/login", false), RouteDecision::Redirect(LOGIN.into()));
        assert_eq!(resolve("/login", true), RouteDecision::Redirect(LOGIN.into()));
        assert_eq!(resolve("/masuk", false), RouteDecision::Render(Route::Login));
        // Unknown paths render without a session check
        assert_eq!(resolve("/tidak-ada", false), RouteDecision::Render(Route::NotFound));
    }

    #[test]
    fn test_nav_active_prefix() {
        assert!(is_active("/pasien/abc", "/pasien"));
        assert!(!is_active("/beranda", "/pasien"));
    }
}
