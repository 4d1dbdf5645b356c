//! Go literal rendering for values read from a wxGlade document.
//!
//! Every function taking raw document text returns `Err(message)` when the
//! text is malformed; the caller attaches element context.

/// Render a Go interpreted string literal.
pub fn go_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            // The Go compiler rejects a BOM after the start of a file.
            c if c.is_control() || c == '\u{feff}' => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

pub fn go_bool(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn parse_int(raw: &str) -> Result<i64, String> {
    raw.trim()
        .parse::<i64>()
        .map_err(|err| format!("not an integer ({})", err))
}

/// Normalise an integer literal.
pub fn go_int(raw: &str) -> Result<String, String> {
    parse_int(raw).map(|value| value.to_string())
}

/// `wxALIGN_CENTER|wxALL` becomes `wx.ALIGN_CENTER | wx.ALL`.
///
/// Integer parts pass through so that `0` stays a valid flag value.
pub fn wx_constant(raw: &str) -> Result<String, String> {
    let mut parts = Vec::new();
    for part in raw.split('|').map(str::trim) {
        if part.parse::<i64>().is_ok() {
            parts.push(part.to_string());
            continue;
        }
        let name = part
            .strip_prefix("wx")
            .filter(|rest| {
                rest.starts_with(|c: char| c.is_ascii_uppercase())
                    && rest
                        .chars()
                        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
            })
            .ok_or_else(|| format!("{:?} is not a wx constant", part))?;
        parts.push(format!("wx.{}", name));
    }
    Ok(parts.join(" | "))
}

/// `400, 300` becomes `wx.NewSize(400, 300)`.
pub fn size(raw: &str) -> Result<String, String> {
    let values = raw
        .split(',')
        .map(parse_int)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| format!("size must be two integers: {}", err))?;
    match values.as_slice() {
        [width, height] => Ok(format!("wx.NewSize({}, {})", width, height)),
        _ => Err(format!("size must have two components, found {}", values.len())),
    }
}

/// `#1f2e3d` becomes `wx.NewColour(byte(31), byte(46), byte(61))`.
pub fn colour(raw: &str) -> Result<String, String> {
    let hex = raw
        .trim()
        .strip_prefix('#')
        .filter(|hex| hex.len() == 6 && hex.is_ascii())
        .ok_or_else(|| "colour must have the form #rrggbb".to_string())?;
    let channels = (0..3)
        .map(|i| u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| format!("invalid colour channel ({})", err))?;
    Ok(format!(
        "wx.NewColour({})",
        channels
            .iter()
            .map(|channel| format!("byte({})", channel))
            .collect::<Vec<_>>()
            .join(", ")
    ))
}

/// wxGlade writes `1` for a set flag; the setter takes the opposite sense.
pub fn negated_flag(raw: &str) -> Result<String, String> {
    parse_int(raw).map(|value| go_bool(value == 0).to_string())
}
