use crate::inventory::domain::TenantName;

/// Longest sheet name a workbook accepts
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Characters of the tenant name used as the sheet-name prefix
pub const TENANT_PREFIX_LEN: usize = 25;

/// Characters a sheet name may not contain
const FORBIDDEN: [char; 7] = ['[', ']', ':', '*', '?', '/', '\\'];

/// The per-tenant sheet types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SheetKind {
    Main,
    Software,
    Vulnerabilities,
}

impl SheetKind {
    /// Navigation column order
    pub const ALL: [SheetKind; 3] = [SheetKind::Main, SheetKind::Software, SheetKind::Vulnerabilities];

    pub fn suffix(&self) -> &'static str {
        match self {
            SheetKind::Main => "MAIN",
            SheetKind::Software => "SOFTWARE",
            SheetKind::Vulnerabilities => "VULNERABILITIES",
        }
    }

    /// Column header on the navigation sheet
    pub fn label(&self) -> &'static str {
        match self {
            SheetKind::Main => "Main Data",
            SheetKind::Software => "Software",
            SheetKind::Vulnerabilities => "Vulnerabilities",
        }
    }
}

/// Removes forbidden characters, limits the name to [`MAX_SHEET_NAME_LEN`]
/// characters and then strips surrounding apostrophes
pub fn sanitize_sheet_name(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| !FORBIDDEN.contains(c))
        .take(MAX_SHEET_NAME_LEN)
        .collect();
    cleaned.trim_matches('\'').to_string()
}

/// Sheet name of a collected tenant table; `None` when sanitizing leaves
/// nothing
pub fn export_sheet_name(tenant: &str) -> Option<String> {
    let name = sanitize_sheet_name(tenant.trim());
    if name.trim().is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Sheet name `{prefix}_{SUFFIX}` for one tenant sheet
///
/// The prefix is the first [`TENANT_PREFIX_LEN`] characters of the tenant
/// name, sanitized, and shortened further when needed so the suffix always
/// survives the length limit.
pub fn tenant_sheet_name(tenant: &TenantName, kind: SheetKind) -> String {
    let suffix = format!("_{}", kind.suffix());
    let room = MAX_SHEET_NAME_LEN - suffix.len();

    let prefix: String = tenant
        .prefix(TENANT_PREFIX_LEN)
        .chars()
        .filter(|c| !FORBIDDEN.contains(c))
        .collect();
    let prefix: String = prefix.trim_start_matches('\'').chars().take(room).collect();

    format!("{}{}", prefix, suffix)
}
