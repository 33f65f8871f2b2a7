//! Setting value validation.

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "PRINTER_WIDTH" => validate_int_range(value, 1, 4096)?,
        "PIXELATE_WIDTH" => validate_int_range(value, 0, 4096)?,
        "FEED_LINES" => validate_int_range(value, 0, 255)?,
        "OUT_PREFIX" => {
            if value.trim().is_empty() {
                return Err("must not be empty".into());
            }
        }
        "PRINTER_NAME" => {
            if value.len() > 255 {
                return Err("printer name must be at most 255 characters".into());
            }
        }
        "PRINTER_DEVICE" => {}
        k if is_boolean_setting(k) => {
            if value != "true" && value != "false" {
                return Err("must be 'true' or 'false'".into());
            }
        }
        _ => return Err(format!("unknown setting key: {key}")),
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i64, max: i64) -> Result<(), String> {
    let v: i64 = value.trim().parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}

fn is_boolean_setting(key: &str) -> bool {
    matches!(key, "DEBUG_OUTPUT" | "CUT_PAPER")
}
