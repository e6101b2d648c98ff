//! Display-message lookup for reject codes.
//!
//! The core reports stable code tokens only; this table renders them in
//! the storefront's two display languages. Transport layers pick the
//! language from the request locale.

use signup_core::booking::RejectCode;

/// Display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    En,
    Sv,
}

/// Message for a reject code in the requested language.
pub fn reject_message(code: RejectCode, language: Language) -> &'static str {
    match (code, language) {
        (RejectCode::InvalidRoleId, Language::En) => {
            "The selected character role does not exist for this session."
        }
        (RejectCode::InvalidRoleId, Language::Sv) => {
            "Den valda rollen finns inte för det här passet."
        }
        (RejectCode::RoleCapacityExceeded, Language::En) => {
            "That character role is fully booked."
        }
        (RejectCode::RoleCapacityExceeded, Language::Sv) => "Rollen är fullbokad.",
        (RejectCode::SessionCapacityExceeded, Language::En) => "The session is fully booked.",
        (RejectCode::SessionCapacityExceeded, Language::Sv) => "Passet är fullbokat.",
        (RejectCode::MissingRoleSelection, Language::En) => {
            "Please choose a character role for this session."
        }
        (RejectCode::MissingRoleSelection, Language::Sv) => {
            "Välj en roll för att boka det här passet."
        }
        (RejectCode::RoleAssignmentMismatch, Language::En) => {
            "The selected role does not belong to this session."
        }
        (RejectCode::RoleAssignmentMismatch, Language::Sv) => {
            "Det valda rollvalet hör inte till det här passet."
        }
        (RejectCode::SessionNotFound, Language::En) => "The session could not be found.",
        (RejectCode::SessionNotFound, Language::Sv) => "Passet kunde inte hittas.",
        (RejectCode::NoRolesRequired, Language::En) => {
            "This session does not use character roles."
        }
        (RejectCode::NoRolesRequired, Language::Sv) => {
            "Det här passet har inga roller att välja."
        }
        (RejectCode::WaitlistEntryNotFound, Language::En) => {
            "The waitlist entry could not be found."
        }
        (RejectCode::WaitlistEntryNotFound, Language::Sv) => {
            "Väntelisteplatsen kunde inte hittas."
        }
        (RejectCode::WaitlistInvalidState, Language::En) => {
            "The waitlist entry has already been settled."
        }
        (RejectCode::WaitlistInvalidState, Language::Sv) => {
            "Väntelisteplatsen är redan avslutad."
        }
    }
}
