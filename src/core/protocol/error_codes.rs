use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Description given for error codes missing from the table
pub const MISSING_DESCRIPTION: &str = "missing description";

/// Controller error codes and their meanings, in table order
const ERROR_TABLE: &[(&str, &str)] = &[
    ("CMD ERR", "Unrecognized command"),
    ("ADDR ERR", "Bad address"),
    ("CONT NOT READY-1", "Chamber does not support PTCON/Humidity"),
    ("CONT NOT READY-2", "Chamber is not running a program"),
    ("CONT NOT READY-3", "Command not supported by this controller"),
    ("CONT NOT READY-4", "Keys may not be locked while controller is off"),
    ("CONT NOT READY-5", "Specified time signal is not enabled"),
    ("DATA NOT READY", "Specified program does not exist"),
    ("PARA ERR", "Unrecognizable or missing parameter"),
    ("DATA OUT OF RANGE", "Data not within valid range"),
    ("PROTECT ON", "Controller data protection is enabled via HMI"),
    ("PRGM WRITE ERR-1", "Program slot is read-only"),
    ("PRGM WRITE ERR-2", "Not in program edit/overwrite mode"),
    ("PRGM WRITE ERR-3", "Edit request not allowed not in edit mode"),
    ("PRGM WRITE ERR-4", "A program is already being edited"),
    ("PRGM WRITE ERR-5", "A program is already being edited"),
    ("PRGM WRITE ERR-6", "Not in overwrite mode"),
    ("PRGM WRITE ERR-7", "Cannot edit program other than the one in edit mode"),
    ("PRGM WRITE ERR-8", "Steps must be entered in order"),
    ("PRGM WRITE ERR-9", "Invalid counter configuration"),
    ("PRGM WRITE ERR-10", "Cannot edit a running program"),
    ("PRGM WRITE ERR-11", "Missing data for counter or end mode"),
    ("PRGM WRITE ERR-12", "Program is being edited on HMI"),
    ("PRGM WRITE ERR-13", "Invalid step data"),
    ("PRGM WRITE ERR-14", "Cannot set exposure time while ramp control is on."),
    ("PRGM WRITE ERR-15", "Humidity must be enabled for humidity ramp mode"),
    ("INVALID REQ", "Unsupported function"),
    ("CHB NOT READY", "Could not act on given command."),
];

static ERROR_DESCRIPTIONS: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| ERROR_TABLE.iter().copied().collect());

/// Look up the description for a controller error code
///
/// The description is advisory only; the `NA:` sentinel alone decides
/// whether a response is an error.
pub fn describe(code: &str) -> &'static str {
    ERROR_DESCRIPTIONS
        .get(code)
        .copied()
        .unwrap_or(MISSING_DESCRIPTION)
}

/// All known error codes with their descriptions, in table order
pub fn entries() -> &'static [(&'static str, &'static str)] {
    ERROR_TABLE
}
