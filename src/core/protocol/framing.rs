/// Default command/response delimiter used by ESPEC and Watlow controllers
pub const DEFAULT_DELIMITER: &str = "\r\n";

/// Prefix controllers put on responses that report a command error
pub const ERROR_SENTINEL: &[u8] = b"NA:";

/// Build the on-wire frame for a command
///
/// Multi-drop targets get an `<address>,` prefix; the delimiter is always
/// appended. Characters outside the ASCII range are dropped rather than
/// rejected, matching the lenient encoding the controllers expect.
pub fn frame_command(command: &str, address: Option<u8>, delimiter: &str) -> Vec<u8> {
    let mut frame = String::with_capacity(command.len() + delimiter.len() + 4);
    if let Some(address) = address {
        frame.push_str(&address.to_string());
        frame.push(',');
    }
    frame.push_str(command);
    frame.push_str(delimiter);
    encode_ascii_lossy(&frame)
}

/// Encode text as ASCII, silently dropping characters outside the range
pub fn encode_ascii_lossy(text: &str) -> Vec<u8> {
    text.chars()
        .filter(char::is_ascii)
        .map(|c| c as u8)
        .collect()
}

/// Decode bytes as ASCII, silently dropping anything outside the range
pub fn decode_ascii_lossy(bytes: &[u8]) -> String {
    bytes
        .iter()
        .filter(|byte| byte.is_ascii())
        .map(|&byte| byte as char)
        .collect()
}

/// Extract the error key from a delimiter-stripped response payload
///
/// Returns `None` when the payload is a normal response.
pub fn error_code(payload: &[u8]) -> Option<String> {
    let code = payload.strip_prefix(ERROR_SENTINEL)?;
    Some(decode_ascii_lossy(code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_frame_without_address() {
        assert_eq!(frame_command("TEMP?", None, "\r\n"), b"TEMP?\r\n");
    }

    #[test]
    fn test_frame_with_address() {
        assert_eq!(frame_command("TEMP?", Some(2), "\r\n"), b"2,TEMP?\r\n");
    }

    #[test]
    fn test_addressed_frame_is_prefix_plus_plain_frame() {
        let plain = frame_command("MON?", None, "\r\n");
        let addressed = frame_command("MON?", Some(7), "\r\n");
        assert_eq!(addressed, [b"7," as &[u8], &plain].concat());
    }

    #[test]
    fn test_frame_drops_non_ascii() {
        assert_eq!(frame_command("TEMP\u{b1}?", None, "\r\n"), b"TEMP?\r\n");
    }

    #[test]
    fn test_frame_with_custom_delimiter() {
        assert_eq!(frame_command("HUMI?", None, "\r"), b"HUMI?\r");
    }

    #[test]
    fn test_error_code_detected() {
        assert_eq!(error_code(b"NA:CMD ERR"), Some("CMD ERR".to_string()));
    }

    #[test]
    fn test_error_code_empty_key() {
        assert_eq!(error_code(b"NA:"), Some(String::new()));
    }

    #[test]
    fn test_normal_payload_is_not_an_error() {
        assert_eq!(error_code(b"OK:TEMP, S25"), None);
        assert_eq!(error_code(b"23.5,50.0"), None);
        assert_eq!(error_code(b""), None);
    }

    #[test]
    fn test_sentinel_must_lead_the_payload() {
        assert_eq!(error_code(b" NA:CMD ERR"), None);
    }

    #[test]
    fn test_decode_ascii_lossy_drops_high_bytes() {
        assert_eq!(decode_ascii_lossy(&[b'O', 0xEA, b'K']), "OK");
    }

    proptest! {
        #[test]
        fn frame_always_ends_with_delimiter(
            command in "[A-Z0-9?,. ]{0,32}",
            address in proptest::option::of(1u8..=31),
        ) {
            let frame = frame_command(&command, address, "\r\n");
            prop_assert!(frame.ends_with(b"\r\n"));
        }

        #[test]
        fn unaddressed_frame_round_trips(command in "[A-Z0-9?,. ]{1,32}") {
            let frame = frame_command(&command, None, "\r\n");
            prop_assert_eq!(&frame[..frame.len() - 2], command.as_bytes());
        }
    }
}
